//! Orchestration core of the TrustTunnel manager.
//!
//! The host process owns the heavy lifting (binary download and
//! verification, the supervised tunnel-client subprocess, the control-plane
//! API) and binds those capabilities into a [`registry::ServiceRegistry`].
//! This crate owns everything above that boundary: typed facades with
//! uniform error normalization, single-flight coordination of the
//! install-or-update operation with cooperative cancellation, the
//! authorization-gated navigation guard, a process-wide busy signal for the
//! UI, and persisted manager preferences.

pub mod auth_gate;
pub mod auth_service;
pub mod busy_signal;
pub mod cancellation;
pub mod install_coordinator;
pub mod install_service;
pub mod manager_state;
pub mod registry;
pub mod runtime_service;
pub mod service_error;
pub mod single_flight;

pub use auth_gate::{AuthGate, Route, RouteDecision};
pub use auth_service::{AuthFacade, AuthService};
pub use busy_signal::BusySignal;
pub use cancellation::CancellationToken;
pub use install_coordinator::InstallCoordinator;
pub use install_service::{InstallFacade, InstallResult, InstallService, InstallStatus};
pub use manager_state::ManagerState;
pub use registry::ServiceRegistry;
pub use runtime_service::{RunnerStatus, RuntimeFacade, RuntimeService};
pub use service_error::ServiceError;
pub use single_flight::SingleFlight;
