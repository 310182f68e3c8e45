use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{registry::ServiceRegistry, service_error::ServiceError};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub bandwidth_limit: u64,
    pub max_tunnel_count: u64,
    pub traffic_limit: u64,
    pub traffic_used: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub traffic_limit: u64,
    pub traffic_used: u64,
    pub traffic_remaining: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TunnelSummary {
    pub count: u64,
    pub total: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TunnelItem {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub tunnel_type: String,
    pub status: String,
    pub node_id: u64,
    pub local_ip: String,
    pub local_port: u16,
    pub remote_port: u16,
    pub custom_domain: String,
    pub bandwidth_limit: u64,
    pub remark: String,
    #[serde(default)]
    pub total_in: Option<u64>,
    #[serde(default)]
    pub total_out: Option<u64>,
    #[serde(default)]
    pub total_traffic: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardData {
    pub user: UserInfo,
    pub traffic: TrafficSummary,
    pub tunnel: TunnelSummary,
    #[serde(default)]
    pub tunnels: Vec<TunnelItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunnerStatus {
    pub running: bool,
    pub pid: u32,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tunnel_name: Option<String>,
    #[serde(default)]
    pub node_address: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub log_lines: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TunnelsOverview {
    pub list: Vec<TunnelItem>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_page: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: String,
    pub total_traffic: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyTraffic {
    pub days: u64,
    pub daily_stats: Vec<DailyStat>,
}

/// Runner and dashboard capability: traffic statistics plus start/stop of the
/// supervised tunnel-client subprocess the host owns.
#[async_trait]
pub trait RuntimeService: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardData, Value>;
    async fn runner_status(&self) -> Result<RunnerStatus, Value>;
    async fn start_runner(&self, tunnel_name: String) -> Result<RunnerStatus, Value>;
    async fn stop_runner(&self) -> Result<RunnerStatus, Value>;
    async fn tunnels_overview(
        &self,
        page: u64,
        limit: u64,
        days: u64,
    ) -> Result<TunnelsOverview, Value>;
    async fn traffic_daily(&self, days: u64) -> Result<DailyTraffic, Value>;
}

#[derive(Clone)]
pub struct RuntimeFacade {
    registry: Arc<ServiceRegistry>,
}

impl RuntimeFacade {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn dashboard(&self) -> Result<DashboardData, ServiceError> {
        let service = self.registry.runtime()?;
        service.dashboard().await.map_err(ServiceError::normalize)
    }

    pub async fn runner_status(&self) -> Result<RunnerStatus, ServiceError> {
        let service = self.registry.runtime()?;
        service
            .runner_status()
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn start_runner(&self, tunnel_name: String) -> Result<RunnerStatus, ServiceError> {
        let service = self.registry.runtime()?;
        service
            .start_runner(tunnel_name)
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn stop_runner(&self) -> Result<RunnerStatus, ServiceError> {
        let service = self.registry.runtime()?;
        service.stop_runner().await.map_err(ServiceError::normalize)
    }

    pub async fn tunnels_overview(
        &self,
        page: u64,
        limit: u64,
        days: u64,
    ) -> Result<TunnelsOverview, ServiceError> {
        let service = self.registry.runtime()?;
        service
            .tunnels_overview(page, limit, days)
            .await
            .map_err(ServiceError::normalize)
    }

    pub async fn traffic_daily(&self, days: u64) -> Result<DailyTraffic, ServiceError> {
        let service = self.registry.runtime()?;
        service
            .traffic_daily(days)
            .await
            .map_err(ServiceError::normalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn runner_status_tolerates_sparse_payload() {
        let status: RunnerStatus = serde_json::from_value(json!({
            "running": false,
            "pid": 0
        }))
        .expect("runner status payload");

        assert!(!status.running);
        assert!(status.started_at.is_none());
        assert!(status.log_lines.is_empty());
    }

    #[test]
    fn tunnel_item_maps_type_field() {
        let item: TunnelItem = serde_json::from_value(json!({
            "id": 3,
            "name": "web",
            "type": "http",
            "status": "online",
            "node_id": 1,
            "local_ip": "127.0.0.1",
            "local_port": 8080,
            "remote_port": 443,
            "custom_domain": "",
            "bandwidth_limit": 0,
            "remark": ""
        }))
        .expect("tunnel item payload");

        assert_eq!(item.tunnel_type, "http");
        assert!(item.total_traffic.is_none());
    }
}
