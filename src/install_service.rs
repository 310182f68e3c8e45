use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    cancellation::CancellationToken, registry::ServiceRegistry, service_error::ServiceError,
};

/// Filesystem layout the host manages for the tunnel client binary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallPaths {
    pub userdata_dir: String,
    pub client_dir: String,
    pub bin_dir: String,
    pub binary_path: String,
    pub download_dir: String,
    pub state_path: String,
    pub settings_path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstalledInfo {
    pub version: String,
    pub asset_name: String,
    pub sha256: String,
    pub installed_at: DateTime<Utc>,
    pub binary_path: String,
    pub binary_exists: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: String,
    pub content_type: String,
    pub size: u64,
    pub sha256: String,
    pub os: String,
    pub arch: String,
    pub archive_format: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub name: String,
    pub html_url: String,
    pub published_at: DateTime<Utc>,
    pub asset: ReleaseAsset,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallStatus {
    pub os: String,
    pub arch: String,
    pub paths: InstallPaths,
    #[serde(default)]
    pub github_mirror_url: String,
    #[serde(default)]
    pub installed: Option<InstalledInfo>,
    #[serde(default)]
    pub latest: Option<ReleaseInfo>,
    pub update_available: bool,
    #[serde(default)]
    pub latest_error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallResult {
    pub release: ReleaseInfo,
    pub status: InstallStatus,
}

/// Install capability the host process binds into the registry.
///
/// Failures come back as raw JSON values in whatever shape the host bridge
/// produced; [`InstallFacade`] normalizes them before anyone else sees them.
/// `install_or_update` receives the coordinator's cancellation token and is
/// expected to poll it between download/verify/extract steps.
#[async_trait]
pub trait InstallService: Send + Sync {
    async fn install_or_update(&self, cancel: CancellationToken) -> Result<InstallResult, Value>;
    async fn cancel_install_or_update(&self) -> Result<(), Value>;
    async fn status(&self) -> Result<InstallStatus, Value>;
    async fn remove(&self) -> Result<(), Value>;
    async fn github_mirror_url(&self) -> Result<String, Value>;
    async fn set_github_mirror_url(&self, url: String) -> Result<(), Value>;
}

/// Typed surface over the install capability: fresh registry lookup on every
/// call, arguments forwarded verbatim, every failure a [`ServiceError`].
#[derive(Clone)]
pub struct InstallFacade {
    registry: Arc<ServiceRegistry>,
}

impl InstallFacade {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn install_or_update(
        &self,
        cancel: CancellationToken,
    ) -> Result<InstallResult, ServiceError> {
        let service = self.registry.install()?;
        service
            .install_or_update(cancel)
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn cancel_install_or_update(&self) -> Result<(), ServiceError> {
        let service = self.registry.install()?;
        service
            .cancel_install_or_update()
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn status(&self) -> Result<InstallStatus, ServiceError> {
        let service = self.registry.install()?;
        service.status().await.map_err(ServiceError::normalize)
    }

    pub async fn remove(&self) -> Result<(), ServiceError> {
        let service = self.registry.install()?;
        service.remove().await.map_err(ServiceError::normalize)
    }

    pub async fn github_mirror_url(&self) -> Result<String, ServiceError> {
        let service = self.registry.install()?;
        service
            .github_mirror_url()
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn set_github_mirror_url(&self, url: String) -> Result<(), ServiceError> {
        let service = self.registry.install()?;
        service
            .set_github_mirror_url(url)
            .await
            .map_err(ServiceError::normalize)
    }
}
