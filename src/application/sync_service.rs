// Dashboard sync service - Use case for reconciling the remote dashboard set
use crate::application::dashboard_repository::DashboardRepository;
use crate::domain::catalog::{Catalog, CatalogEntry};
use crate::domain::dashboard::{DashboardDocument, DashboardRecord};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Maximum time to wait for the endpoint to become ready.
    pub ready_timeout: Duration,
    /// Interval between health probes.
    pub poll_interval: Duration,
    /// Pause between deleting old dashboards and deploying new ones.
    pub settle_pause: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(2),
            settle_pause: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("grafana did not become ready within {timeout:?}")]
    EndpointUnavailable { timeout: Duration },
    #[error("deployed {deployed} of {total} dashboards")]
    DeploymentIncomplete { deployed: usize, total: usize },
    #[error("verification found {found} production dashboards, expected at least {expected}")]
    VerificationShortfall { found: usize, expected: usize },
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub deleted: usize,
    pub delete_failures: usize,
    pub deployed: usize,
    pub verified: usize,
}

/// Reconciles the endpoint's dashboard set to exactly match the catalog:
/// wait for the endpoint, delete everything it currently holds, recreate
/// every catalog entry from disk, then verify by title prefix.
pub struct SyncService {
    repository: Arc<dyn DashboardRepository>,
    catalog: Catalog,
    settings: SyncSettings,
}

impl SyncService {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        catalog: Catalog,
        settings: SyncSettings,
    ) -> Self {
        Self {
            repository,
            catalog,
            settings,
        }
    }

    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        if !self.wait_until_ready().await {
            return Err(SyncError::EndpointUnavailable {
                timeout: self.settings.ready_timeout,
            });
        }

        let existing = self.list_existing().await;
        if existing.is_empty() {
            tracing::info!("no existing dashboards found, proceeding with fresh deployment");
        } else {
            tracing::info!("found {} existing dashboards, deleting", existing.len());
            let (deleted, failed) = self.delete_all(&existing).await;
            report.deleted = deleted;
            report.delete_failures = failed;
            if failed > 0 {
                tracing::warn!(
                    "{} of {} dashboards could not be deleted",
                    failed,
                    existing.len()
                );
            }
        }

        // Let the endpoint settle after the cleanup
        tokio::time::sleep(self.settings.settle_pause).await;

        let total = self.catalog.len();
        report.deployed = self.deploy_catalog().await;
        tracing::info!("deployed {} of {} dashboards", report.deployed, total);
        if report.deployed != total {
            return Err(SyncError::DeploymentIncomplete {
                deployed: report.deployed,
                total,
            });
        }

        report.verified = self.verify().await;
        if report.verified < total {
            return Err(SyncError::VerificationShortfall {
                found: report.verified,
                expected: total,
            });
        }

        Ok(report)
    }

    async fn wait_until_ready(&self) -> bool {
        tracing::info!("waiting for grafana to become ready");
        let deadline = tokio::time::Instant::now() + self.settings.ready_timeout;
        while tokio::time::Instant::now() < deadline {
            match self.repository.is_ready().await {
                Ok(true) => {
                    tracing::info!("grafana is ready");
                    return true;
                }
                Ok(false) => tracing::debug!("grafana still starting up"),
                Err(e) => tracing::debug!("health probe failed: {e:#}"),
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
        tracing::error!(
            "grafana did not become ready within {:?}",
            self.settings.ready_timeout
        );
        false
    }

    /// Enumeration never fails the run; transport errors degrade to an
    /// empty list.
    async fn list_existing(&self) -> Vec<DashboardRecord> {
        match self.repository.list_dashboards().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("failed to list dashboards: {e:#}");
                Vec::new()
            }
        }
    }

    async fn delete_all(&self, records: &[DashboardRecord]) -> (usize, usize) {
        let mut deleted = 0;
        for record in records {
            match self.repository.delete_dashboard(&record.uid).await {
                Ok(()) => {
                    tracing::info!("deleted dashboard {} ({})", record.uid, record.title);
                    deleted += 1;
                }
                Err(e) => {
                    tracing::error!("failed to delete dashboard {}: {e:#}", record.uid);
                }
            }
        }
        (deleted, records.len() - deleted)
    }

    async fn deploy_catalog(&self) -> usize {
        let mut deployed = 0;
        for entry in self.catalog.entries() {
            tracing::info!("deploying {} dashboard", entry.key);
            let Some(document) = self.load_document(entry).await else {
                continue;
            };
            match self.repository.create_dashboard(&document).await {
                Ok(()) => {
                    tracing::info!(
                        "created dashboard: {}",
                        document.title().unwrap_or(entry.name.as_str())
                    );
                    deployed += 1;
                }
                Err(e) => {
                    tracing::error!("failed to create {} dashboard: {e:#}", entry.key);
                }
            }
        }
        deployed
    }

    /// A missing or unparseable file skips the entry entirely; no partial
    /// remote state is created for it.
    async fn load_document(&self, entry: &CatalogEntry) -> Option<DashboardDocument> {
        let text = match tokio::fs::read_to_string(&entry.path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("cannot read dashboard file {}: {}", entry.path.display(), e);
                return None;
            }
        };
        match DashboardDocument::from_json(&text) {
            Ok(mut document) => {
                document.apply_production_prefix();
                Some(document)
            }
            Err(e) => {
                tracing::error!("invalid dashboard json in {}: {}", entry.path.display(), e);
                None
            }
        }
    }

    /// Lower-bound check only: counts prefixed titles, cannot detect stale
    /// prefixed leftovers from an earlier catalog.
    async fn verify(&self) -> usize {
        let records = self.list_existing().await;
        let production = records.iter().filter(|r| r.is_production()).count();
        tracing::info!("found {} production dashboards", production);
        production
    }
}
