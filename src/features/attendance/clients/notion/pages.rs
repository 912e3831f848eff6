use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::core::config::NotionConfig;
use crate::core::error::{AppError, Result};
use crate::features::attendance::models::AttendanceRecord;
use crate::features::attendance::services::RecordStore;

#[derive(Debug, Serialize)]
struct DatabaseParent<'a> {
    database_id: &'a str,
}

/// Body of `POST /pages`
#[derive(Debug, Serialize)]
struct CreatePageRequest<'a> {
    parent: DatabaseParent<'a>,
    properties: &'a AttendanceRecord,
}

/// Client for the Notion pages API, one page per attendance record
pub struct NotionPagesClient {
    http_client: reqwest::Client,
    config: NotionConfig,
}

impl NotionPagesClient {
    pub fn new(config: NotionConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a page in the configured database.
    ///
    /// Single attempt; a non-success status is returned as
    /// [`AppError::Submission`] carrying the status text.
    // TODO: bound this call with a deadline like the geocoding lookup once
    // an acceptable Notion latency budget is agreed on.
    pub async fn create_page(&self, record: &AttendanceRecord) -> Result<Value> {
        let url = format!("{}/pages", self.config.base_url);
        let request = CreatePageRequest {
            parent: DatabaseParent {
                database_id: &self.config.database_id,
            },
            properties: record,
        };

        tracing::debug!("Creating Notion page: {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", &self.config.api_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Notion: {}", e);
                AppError::Submission(format!("Failed to reach Notion: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Notion response: {}", e);
            AppError::Submission(format!("Failed to read Notion response: {}", e))
        })?;

        if !status.is_success() {
            let payload = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
            tracing::error!("Notion API error: HTTP {} - {}", status, payload);
            return Err(AppError::Submission(format!(
                "Error from Notion: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )));
        }

        serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::error!("Failed to parse Notion response: {}", e);
            AppError::Submission(format!("Failed to parse Notion response: {}", e))
        })
    }
}

#[async_trait]
impl RecordStore for NotionPagesClient {
    async fn create_record(&self, record: &AttendanceRecord) -> Result<Value> {
        self.create_page(record).await
    }
}
