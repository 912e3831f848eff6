//! Attendance submission handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::attendance::dtos::SubmitAttendanceDto;
use crate::features::attendance::services::AttendanceService;
use crate::shared::types::{violations_from, FailureResponse, ValidationErrorResponse};

/// Record a check-in or check-out
///
/// Resolves the coordinates to a place name (best effort) and creates a page
/// in the attendance database. The 200 body is the created Notion page.
#[utoipa::path(
    post,
    path = "/submit-attendance",
    request_body = SubmitAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded, body is the created record"),
        (status = 400, description = "One entry per invalid field", body = ValidationErrorResponse),
        (status = 500, description = "Record store rejected or could not be reached", body = FailureResponse)
    ),
    tag = "attendance"
)]
pub async fn submit_attendance(
    State(service): State<Arc<AttendanceService>>,
    AppJson(dto): AppJson<SubmitAttendanceDto>,
) -> Result<Json<Value>> {
    let event = dto
        .into_event()
        .map_err(|e| AppError::Validation(violations_from(&e, &SubmitAttendanceDto::FIELDS)))?;

    let created = service.submit(event).await?;

    Ok(Json(created))
}
