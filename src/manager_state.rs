use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth_gate::Route;

/// Manager preferences persisted between sessions.
#[derive(Serialize, Deserialize)]
pub struct ManagerState {
    #[serde(default)]
    pub last_route: Option<String>,
    #[serde(default)]
    pub selected_tunnel: Option<String>,
    #[serde(default = "default_auto_check_updates")]
    pub auto_check_updates: bool,
}

fn default_auto_check_updates() -> bool {
    true
}

impl Default for ManagerState {
    fn default() -> Self {
        Self {
            last_route: None,
            selected_tunnel: None,
            auto_check_updates: true,
        }
    }
}

impl ManagerState {
    pub fn state_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trusttunnel")
            .join("manager.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::state_file_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(state) => {
                    log::info!("[manager_state] loaded from {}", path.display());
                    state
                }
                Err(error) => {
                    log::warn!("[manager_state] failed to parse {}: {error}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!(
                    "[manager_state] no state file at {}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::state_file_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            log::warn!(
                "[manager_state] failed to create state directory {}: {error}",
                parent.display()
            );
        }
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(error) = std::fs::write(path, content) {
                    log::warn!("[manager_state] failed to write {}: {error}", path.display());
                }
            }
            Err(error) => {
                log::warn!("[manager_state] failed to serialize state: {error}");
            }
        }
    }

    pub fn last_route(&self) -> Option<Route> {
        self.last_route.as_deref().and_then(Route::from_path)
    }

    pub fn set_last_route(&mut self, route: Route) {
        self.last_route = Some(route.path().to_string());
    }

    pub fn selected_tunnel(&self) -> Option<&str> {
        self.selected_tunnel.as_deref()
    }

    pub fn set_selected_tunnel(&mut self, tunnel: Option<&str>) {
        self.selected_tunnel = tunnel.map(|name| name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("manager.toml");

        let mut state = ManagerState::default();
        state.set_last_route(Route::Tunnels);
        state.set_selected_tunnel(Some("web"));
        state.auto_check_updates = false;
        state.save_to(&path);

        let loaded = ManagerState::load_from(&path);
        assert_eq!(loaded.last_route(), Some(Route::Tunnels));
        assert_eq!(loaded.selected_tunnel(), Some("web"));
        assert!(!loaded.auto_check_updates);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        let state = ManagerState::load_from(&directory.path().join("missing.toml"));
        assert!(state.last_route.is_none());
        assert!(state.auto_check_updates);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("manager.toml");
        std::fs::write(&path, "last_route = [not toml").expect("write");

        let state = ManagerState::load_from(&path);
        assert!(state.last_route.is_none());
        assert!(state.selected_tunnel.is_none());
    }

    #[test]
    fn unknown_route_in_file_is_ignored() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("manager.toml");
        std::fs::write(&path, "last_route = \"/nowhere\"\n").expect("write");

        let state = ManagerState::load_from(&path);
        assert_eq!(state.last_route(), None);
    }
}
