// Grafana HTTP API repository implementation
use crate::application::dashboard_repository::DashboardRepository;
use crate::domain::dashboard::{DashboardDocument, DashboardRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GrafanaRepository {
    base_url: String,
    username: String,
    password: String,
    // one authenticated session reused for every call
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    database: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    uid: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateDashboardRequest<'a> {
    dashboard: &'a serde_json::Value,
    overwrite: bool,
    #[serde(rename = "folderId")]
    folder_id: i64,
}

impl GrafanaRepository {
    pub fn new(base_url: String, username: String, password: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.password))
    }
}

#[async_trait]
impl DashboardRepository for GrafanaRepository {
    async fn is_ready(&self) -> Result<bool> {
        let response = self
            .request(reqwest::Method::GET, "/api/health")
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .context("Failed to reach health endpoint")?;

        if !response.status().is_success() {
            tracing::debug!("health endpoint returned {}", response.status());
            return Ok(false);
        }

        let health = response
            .json::<HealthResponse>()
            .await
            .context("Failed to parse health response")?;

        Ok(health.database.as_deref() == Some("ok"))
    }

    async fn list_dashboards(&self) -> Result<Vec<DashboardRecord>> {
        let response = self
            .request(reqwest::Method::GET, "/api/search")
            .send()
            .await
            .context("Failed to send search request")?;

        if !response.status().is_success() {
            anyhow::bail!("dashboard search failed with status {}", response.status());
        }

        let hits = response
            .json::<Vec<SearchHit>>()
            .await
            .context("Failed to parse search response")?;

        Ok(hits
            .into_iter()
            .map(|hit| DashboardRecord::new(hit.uid, hit.title.unwrap_or_default()))
            .collect())
    }

    async fn delete_dashboard(&self, uid: &str) -> Result<()> {
        let path = format!("/api/dashboards/uid/{}", urlencoding::encode(uid));
        let response = self
            .request(reqwest::Method::DELETE, &path)
            .send()
            .await
            .with_context(|| format!("Failed to send delete request for {uid}"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "delete of dashboard {} failed with status {}",
                uid,
                response.status()
            );
        }

        Ok(())
    }

    async fn create_dashboard(&self, document: &DashboardDocument) -> Result<()> {
        let payload = CreateDashboardRequest {
            dashboard: document.body(),
            overwrite: true,
            folder_id: 0,
        };

        let response = self
            .request(reqwest::Method::POST, "/api/dashboards/db")
            .timeout(SUBMIT_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .context("Failed to send create request")?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("dashboard create failed with status {status}: {body}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed_from_base_url() {
        let repository = GrafanaRepository::new(
            "http://localhost:3000/".to_string(),
            "admin".to_string(),
            "admin".to_string(),
        );
        assert_eq!(repository.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_create_request_wire_format() {
        let body = serde_json::json!({"title": "PROD: System Health", "panels": []});
        let request = CreateDashboardRequest {
            dashboard: &body,
            overwrite: true,
            folder_id: 0,
        };

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["overwrite"], serde_json::json!(true));
        assert_eq!(encoded["folderId"], serde_json::json!(0));
        assert_eq!(encoded["dashboard"]["title"], "PROD: System Health");
    }
}
