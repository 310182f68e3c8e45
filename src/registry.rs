use std::sync::{Arc, Mutex};

use crate::{
    auth_service::AuthService, install_service::InstallService, runtime_service::RuntimeService,
    service_error::ServiceError,
};

/// Late-bound slots for the capabilities the host process wires in.
///
/// The host binds services at its own pace relative to crate init, so lookups
/// happen fresh on every call instead of being resolved once at startup. A
/// missing capability is [`ServiceError::Unbound`], which callers surface as
/// a restart-the-application hint rather than retrying.
#[derive(Default)]
pub struct ServiceRegistry {
    install: Mutex<Option<Arc<dyn InstallService>>>,
    runtime: Mutex<Option<Arc<dyn RuntimeService>>>,
    auth: Mutex<Option<Arc<dyn AuthService>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_install(&self, service: Arc<dyn InstallService>) {
        *self.install.lock().unwrap() = Some(service);
        log::info!("[registry] install service bound");
    }

    pub fn bind_runtime(&self, service: Arc<dyn RuntimeService>) {
        *self.runtime.lock().unwrap() = Some(service);
        log::info!("[registry] runtime service bound");
    }

    pub fn bind_auth(&self, service: Arc<dyn AuthService>) {
        *self.auth.lock().unwrap() = Some(service);
        log::info!("[registry] auth service bound");
    }

    pub fn install(&self) -> Result<Arc<dyn InstallService>, ServiceError> {
        self.install
            .lock()
            .unwrap()
            .clone()
            .ok_or(ServiceError::unbound("install service"))
    }

    pub fn runtime(&self) -> Result<Arc<dyn RuntimeService>, ServiceError> {
        self.runtime
            .lock()
            .unwrap()
            .clone()
            .ok_or(ServiceError::unbound("runtime service"))
    }

    pub fn auth(&self) -> Result<Arc<dyn AuthService>, ServiceError> {
        self.auth
            .lock()
            .unwrap()
            .clone()
            .ok_or(ServiceError::unbound("auth service"))
    }
}
