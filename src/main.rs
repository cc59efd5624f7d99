// Main entry point - Dependency injection and sync execution
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::sync_service::SyncService;
use crate::infrastructure::config::{load_dashboards_config, load_grafana_config};
use crate::infrastructure::grafana_repository::GrafanaRepository;
use crate::presentation::runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let grafana_config = load_grafana_config()?;
    let catalog = load_dashboards_config()?.into_catalog()?;
    if catalog.is_empty() {
        tracing::warn!("dashboard catalog is empty, nothing will be deployed");
    }

    // Create repository (infrastructure layer)
    let repository = Arc::new(GrafanaRepository::new(
        grafana_config.grafana.url,
        grafana_config.grafana.username,
        grafana_config.grafana.password,
    ));

    // Create service (application layer)
    let service = SyncService::new(repository, catalog, grafana_config.sync.to_settings());

    runner::execute(&service).await
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_follows_semver() {
        let version = env!("CARGO_PKG_VERSION");
        assert_eq!(version, "0.3.0");
        assert_eq!(version.split('.').count(), 3);
        assert!(
            version
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        );
    }
}
