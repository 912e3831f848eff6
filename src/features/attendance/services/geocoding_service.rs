use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::attendance::models::GeocodeResult;
use crate::features::attendance::services::LocationResolver;

/// Nominatim `/reverse` response, only the fields we read
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    pub display_name: Option<String>,
    /// Set instead of a place when Nominatim cannot geocode the point
    pub error: Option<String>,
}

/// Why a reverse lookup produced no place description
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("unexpected content type '{0}'")]
    UnexpectedContentType(String),

    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reverse geocoding through Nominatim.
///
/// Lookups are bounded by the configured timeout. When it elapses the
/// in-flight request is dropped, which closes its connection.
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    zoom: u8,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            zoom: config.zoom,
        })
    }

    /// Look up the place description for a coordinate pair.
    ///
    /// `Ok(None)` means Nominatim answered but had no `display_name`.
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> std::result::Result<Option<String>, GeocodingError> {
        tokio::time::timeout(self.timeout, self.fetch_display_name(latitude, longitude))
            .await
            .map_err(|_| GeocodingError::Timeout(self.timeout))?
    }

    async fn fetch_display_name(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> std::result::Result<Option<String>, GeocodingError> {
        let url = format!("{}/reverse", self.base_url);
        let params = [
            ("format", "json".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("zoom", self.zoom.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        tracing::debug!("Reverse geocoding ({}, {}) via {}", latitude, longitude, url);

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status));
        }

        // Nominatim answers rate limiting and outages with HTML pages
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json_content_type(&content_type) {
            return Err(GeocodingError::UnexpectedContentType(content_type));
        }

        let body = response.bytes().await?;
        let parsed: NominatimReverseResponse = serde_json::from_slice(&body)?;

        if let Some(err) = &parsed.error {
            tracing::debug!("Nominatim could not geocode point: {}", err);
        }

        Ok(parsed.display_name)
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl LocationResolver for GeocodingService {
    async fn resolve(&self, latitude: f64, longitude: f64) -> GeocodeResult {
        match self.reverse_geocode(latitude, longitude).await {
            Ok(display_name) => GeocodeResult::from_display_name(display_name),
            Err(e) => {
                tracing::warn!(
                    "Reverse geocoding failed for ({}, {}), using fallback location: {}",
                    latitude,
                    longitude,
                    e
                );
                GeocodeResult::fallback()
            }
        }
    }
}
