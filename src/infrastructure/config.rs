use crate::application::sync_service::SyncSettings;
use crate::domain::catalog::{Catalog, CatalogEntry, CatalogError};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct GrafanaConfig {
    pub grafana: GrafanaSettings,
    #[serde(default)]
    pub sync: SyncTunables,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrafanaSettings {
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncTunables {
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_settle_pause_secs")]
    pub settle_pause_secs: u64,
}

fn default_ready_timeout_secs() -> u64 {
    60
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_settle_pause_secs() -> u64 {
    2
}

impl Default for SyncTunables {
    fn default() -> Self {
        Self {
            ready_timeout_secs: default_ready_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            settle_pause_secs: default_settle_pause_secs(),
        }
    }
}

impl SyncTunables {
    pub fn to_settings(&self) -> SyncSettings {
        SyncSettings {
            ready_timeout: Duration::from_secs(self.ready_timeout_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            settle_pause: Duration::from_secs(self.settle_pause_secs),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardsConfig {
    #[serde(default)]
    pub dashboards: Vec<DashboardFileConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardFileConfig {
    pub key: String,
    pub path: PathBuf,
    pub name: String,
}

impl DashboardsConfig {
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::new(
            self.dashboards
                .into_iter()
                .map(|d| CatalogEntry::new(d.key, d.path, d.name))
                .collect(),
        )
    }
}

pub fn load_grafana_config() -> anyhow::Result<GrafanaConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/grafana"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboards_config() -> anyhow::Result<DashboardsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboards"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_grafana(text: &str) -> GrafanaConfig {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_sync_tunables_default_when_section_absent() {
        let parsed = parse_grafana(
            r#"
            [grafana]
            url = "http://localhost:3000"
            username = "admin"
            password = "admin"
            "#,
        );

        assert_eq!(parsed.sync.ready_timeout_secs, 60);
        assert_eq!(parsed.sync.poll_interval_secs, 2);
        assert_eq!(parsed.sync.settle_pause_secs, 2);
        assert_eq!(parsed.sync.to_settings().ready_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_sync_tunables_override() {
        let parsed = parse_grafana(
            r#"
            [grafana]
            url = "http://grafana:3000"
            username = "ops"
            password = "secret"

            [sync]
            ready_timeout_secs = 10
            "#,
        );

        assert_eq!(parsed.grafana.url, "http://grafana:3000");
        assert_eq!(parsed.sync.ready_timeout_secs, 10);
        // unset keys in a present section still take their defaults
        assert_eq!(parsed.sync.poll_interval_secs, 2);
    }

    #[test]
    fn test_dashboards_config_into_catalog() {
        let parsed: DashboardsConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [[dashboards]]
                key = "system_health"
                path = "dashboards/system_health.json"
                name = "System Health & Metrics"

                [[dashboards]]
                key = "data_quality"
                path = "dashboards/data_quality.json"
                name = "Data Quality & Validation"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let catalog = parsed.into_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].key, "system_health");
        assert_eq!(
            catalog.entries()[1].path,
            PathBuf::from("dashboards/data_quality.json")
        );
    }
}
