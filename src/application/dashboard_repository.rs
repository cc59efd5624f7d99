// Repository trait for dashboard endpoint access
use crate::domain::dashboard::{DashboardDocument, DashboardRecord};
use async_trait::async_trait;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Probe endpoint health; true once the backing database reports ok
    async fn is_ready(&self) -> anyhow::Result<bool>;

    /// List all dashboards currently known to the endpoint
    async fn list_dashboards(&self) -> anyhow::Result<Vec<DashboardRecord>>;

    /// Delete a dashboard by its server-assigned uid
    async fn delete_dashboard(&self, uid: &str) -> anyhow::Result<()>;

    /// Create a dashboard, overwriting any existing one with the same uid
    async fn create_dashboard(&self, document: &DashboardDocument) -> anyhow::Result<()>;
}
