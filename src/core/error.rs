use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::constants::SUBMISSION_FAILED_MESSAGE;
use crate::shared::types::{FailureResponse, FieldViolation, ValidationErrorResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!("Rejected request with {} violation(s)", errors.len());
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response()
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse {
                        errors: vec![FieldViolation::body(msg)],
                    }),
                )
                    .into_response()
            }
            AppError::Submission(detail) => {
                tracing::error!("Submission error: {}", detail);
                failure(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                failure(detail)
            }
        }
    }
}

fn failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse {
            message: SUBMISSION_FAILED_MESSAGE.to_string(),
            error,
        }),
    )
        .into_response()
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_errors_list() {
        let response = AppError::Validation(vec![
            FieldViolation::field("employeeName", "Invalid value", None),
            FieldViolation::field("latitude", "Invalid value", Some(serde_json::json!("x"))),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][1]["path"], "latitude");
    }

    #[tokio::test]
    async fn test_submission_maps_to_500_with_message() {
        let response =
            AppError::Submission("Error from Notion: Bad Request".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Failed to record attendance.");
        assert_eq!(body["error"], "Error from Notion: Bad Request");
    }

    #[tokio::test]
    async fn test_bad_request_is_reported_as_body_violation() {
        let response = AppError::BadRequest("Invalid JSON syntax".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["type"], "body");
        assert_eq!(body["errors"][0]["msg"], "Invalid JSON syntax");
    }
}
