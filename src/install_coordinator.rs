use std::sync::{Arc, Mutex};

use crate::{
    busy_signal::BusySignal,
    cancellation::CancellationToken,
    install_service::{InstallFacade, InstallResult},
    service_error::ServiceError,
    single_flight::SingleFlight,
};

const INSTALL_KEY: &str = "install-or-update";

#[derive(Default)]
struct InstallFlags {
    installing: bool,
    canceling: bool,
    cancel_token: Option<CancellationToken>,
}

/// Coordinates "install or update the tunnel client" so the operation has at
/// most one in-flight execution.
///
/// Concurrent `start_install` callers join the running operation and all
/// receive its exact outcome. Cancellation is cooperative: `cancel_install`
/// marks the operation's token and forwards a cancellation request to the
/// host; the coordinator returns to idle only when the original operation
/// settles, either way.
#[derive(Clone)]
pub struct InstallCoordinator {
    facade: InstallFacade,
    busy: BusySignal,
    flights: SingleFlight<&'static str, Result<InstallResult, ServiceError>>,
    flags: Arc<Mutex<InstallFlags>>,
}

impl InstallCoordinator {
    pub fn new(facade: InstallFacade, busy: BusySignal) -> Self {
        Self {
            facade,
            busy,
            flights: SingleFlight::new(),
            flags: Arc::new(Mutex::new(InstallFlags::default())),
        }
    }

    pub fn installing(&self) -> bool {
        self.flags.lock().unwrap().installing
    }

    pub fn canceling(&self) -> bool {
        self.flags.lock().unwrap().canceling
    }

    /// Starts an install-or-update, or joins the one already running.
    ///
    /// Flag and slot transitions happen synchronously before the underlying
    /// call is polled, so callers racing ahead of any suspension point still
    /// produce exactly one host invocation.
    pub async fn start_install(&self) -> Result<InstallResult, ServiceError> {
        let facade = self.facade.clone();
        let busy = self.busy.clone();
        let flags = Arc::clone(&self.flags);

        let (outcome, started) = self.flights.run(INSTALL_KEY, move || {
            let token = CancellationToken::new();
            {
                let mut locked = flags.lock().unwrap();
                locked.installing = true;
                locked.canceling = false;
                locked.cancel_token = Some(token.clone());
            }
            async move {
                let result = busy.with_scope(facade.install_or_update(token)).await;
                match &result {
                    Ok(install) => log::info!("[install] completed: {}", install.release.tag_name),
                    Err(error) => log::warn!("[install] failed: {error}"),
                }
                // back to idle on any settlement, before waiters see it
                let mut locked = flags.lock().unwrap();
                locked.installing = false;
                locked.canceling = false;
                locked.cancel_token = None;
                result
            }
        });

        if started {
            log::info!("[install] starting install-or-update");
        } else {
            log::info!("[install] joining in-flight install-or-update");
        }

        outcome.await
    }

    /// Requests cooperative cancellation of the in-flight install.
    ///
    /// No-op when idle or when a cancellation is already pending, including
    /// the race where the operation settled just before this call. A failed
    /// forward resets `canceling` so cancellation can be retried; it never
    /// touches the primary operation's bookkeeping.
    pub async fn cancel_install(&self) -> Result<(), ServiceError> {
        let token = {
            let mut locked = self.flags.lock().unwrap();
            if !locked.installing || locked.canceling {
                return Ok(());
            }
            locked.canceling = true;
            locked.cancel_token.clone()
        };

        if let Some(token) = token {
            token.cancel();
        }

        log::info!("[install] forwarding cancellation request");
        match self.facade.cancel_install_or_update().await {
            Ok(()) => Ok(()),
            Err(error) => {
                self.flags.lock().unwrap().canceling = false;
                log::warn!("[install] cancellation request failed: {error}");
                Err(error)
            }
        }
    }
}
