//! Attendance routes

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::attendance::handlers;
use crate::features::attendance::services::AttendanceService;

/// Create routes for the attendance feature
///
/// Public: the front end submitting check-ins is not authenticated.
pub fn routes(service: Arc<AttendanceService>) -> Router {
    Router::new()
        .route("/submit-attendance", post(handlers::submit_attendance))
        .with_state(service)
}
