//! Attendance submission pipeline: enrich, build, submit.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveTime};
use serde_json::Value;

use crate::core::config::RecordConfig;
use crate::core::error::Result;
use crate::features::attendance::models::{AttendanceEvent, AttendanceRecord, GeocodeResult};

/// Resolves coordinates to a place description.
///
/// Implementations never fail: anything that goes wrong is reported as
/// [`GeocodeResult::fallback`].
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, latitude: f64, longitude: f64) -> GeocodeResult;
}

/// Persists one attendance record and returns the store's representation of it
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_record(&self, record: &AttendanceRecord) -> Result<Value>;
}

/// Orchestrates a single submission. Holds no per-request state.
pub struct AttendanceService {
    resolver: Arc<dyn LocationResolver>,
    store: Arc<dyn RecordStore>,
    record_config: RecordConfig,
}

impl AttendanceService {
    pub fn new(
        resolver: Arc<dyn LocationResolver>,
        store: Arc<dyn RecordStore>,
        record_config: RecordConfig,
    ) -> Self {
        Self {
            resolver,
            store,
            record_config,
        }
    }

    /// Record a validated event, stamped with the current local time-of-day
    pub async fn submit(&self, event: AttendanceEvent) -> Result<Value> {
        self.submit_at(event, Local::now().time()).await
    }

    pub async fn submit_at(&self, event: AttendanceEvent, submitted_at: NaiveTime) -> Result<Value> {
        let geocode = self
            .resolver
            .resolve(event.latitude, event.longitude)
            .await;

        let record = AttendanceRecord::build(&event, &geocode, submitted_at, &self.record_config);

        let created = self.store.create_record(&record).await?;

        tracing::info!(
            "Attendance recorded: employee={}, action={}, location={}, resolved={}",
            record.name.text(),
            record.action.text(),
            record.location.text(),
            !geocode.is_fallback()
        );

        Ok(created)
    }
}
