use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{registry::ServiceRegistry, service_error::ServiceError};

/// Token capability: the host keeps the OAuth token in the system keyring and
/// answers whether a valid one is present.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn has_valid_authorization(&self) -> Result<bool, Value>;
    async fn begin_login(&self) -> Result<(), Value>;
    async fn clear_authorization(&self) -> Result<(), Value>;
}

#[derive(Clone)]
pub struct AuthFacade {
    registry: Arc<ServiceRegistry>,
}

impl AuthFacade {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn has_valid_authorization(&self) -> Result<bool, ServiceError> {
        let service = self.registry.auth()?;
        service
            .has_valid_authorization()
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn begin_login(&self) -> Result<(), ServiceError> {
        let service = self.registry.auth()?;
        service.begin_login().await.map_err(ServiceError::normalize)
    }

    pub async fn clear_authorization(&self) -> Result<(), ServiceError> {
        let service = self.registry.auth()?;
        service
            .clear_authorization()
            .await
            .map_err(ServiceError::normalize)
    }
}
