//! Fakes for the attendance pipeline's collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::error::{AppError, Result};
use crate::features::attendance::models::{AttendanceEvent, AttendanceRecord, GeocodeResult};
use crate::features::attendance::services::{LocationResolver, RecordStore};

pub fn sample_event() -> AttendanceEvent {
    AttendanceEvent {
        employee_name: "Ana".to_string(),
        timestamp: "2024-05-01T09:00:00Z".to_string(),
        latitude: -34.6,
        longitude: -58.4,
        action_type: "check-in".to_string(),
    }
}

pub fn sample_body() -> Value {
    json!({
        "employeeName": "Ana",
        "timestamp": "2024-05-01T09:00:00Z",
        "latitude": -34.6,
        "longitude": -58.4,
        "actionType": "check-in"
    })
}

/// Resolver returning a fixed place, or the fallback when `name` is `None`
pub struct FakeResolver {
    name: Option<String>,
    calls: AtomicUsize,
}

impl FakeResolver {
    pub fn resolving(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            name: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationResolver for FakeResolver {
    async fn resolve(&self, _latitude: f64, _longitude: f64) -> GeocodeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        GeocodeResult::from_display_name(self.name.clone())
    }
}

/// Store that keeps every record it is given
pub struct RecordingStore {
    failure: Option<String>,
    records: Mutex<Vec<AttendanceRecord>>,
}

impl RecordingStore {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            failure: Some(detail.to_string()),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn create_record(&self, record: &AttendanceRecord) -> Result<Value> {
        if let Some(detail) = &self.failure {
            return Err(AppError::Submission(detail.clone()));
        }

        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(json!({
            "object": "page",
            "id": format!("page-{}", records.len()),
            "properties": record,
        }))
    }
}
