use crate::auth_service::AuthFacade;

/// Views the manager can navigate to. `OAuth` is the authorization entry
/// point; `Home` is where authorized users land by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Tunnels,
    Settings,
    OAuth,
}

impl Route {
    pub const DEFAULT: Route = Route::Home;
    pub const ENTRY_POINT: Route = Route::OAuth;

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Tunnels => "/tunnels",
            Self::Settings => "/settings",
            Self::OAuth => "/oauth",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Home),
            "/tunnels" => Some(Self::Tunnels),
            "/settings" => Some(Self::Settings),
            "/oauth" => Some(Self::OAuth),
            _ => None,
        }
    }

    pub fn is_entry_point(&self) -> bool {
        matches!(self, Self::OAuth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

/// Navigation guard: every attempt re-resolves the authorization fact from
/// the host (the token may have been acquired or revoked since the last
/// attempt) and decides allow-or-redirect.
///
/// Fails closed: an unbound auth capability or a failed check counts as
/// unauthorized and routes to the entry point; the navigation layer never
/// sees an error. The gate is attempt-driven only — becoming authorized
/// while sitting on the entry route takes effect on the next attempt.
pub struct AuthGate {
    auth: AuthFacade,
}

impl AuthGate {
    pub fn new(auth: AuthFacade) -> Self {
        Self { auth }
    }

    pub async fn decide(&self, target: Route) -> RouteDecision {
        let authorized = match self.auth.has_valid_authorization().await {
            Ok(ok) => ok,
            Err(error) => {
                log::warn!("[auth_gate] authorization check failed, treating as unauthorized: {error}");
                false
            }
        };

        match (target.is_entry_point(), authorized) {
            // already authorized, the entry point is pointless
            (true, true) => RouteDecision::Redirect(Route::DEFAULT),
            (true, false) => RouteDecision::Allow,
            (false, true) => RouteDecision::Allow,
            (false, false) => RouteDecision::Redirect(Route::ENTRY_POINT),
        }
    }
}
