use utoipa::{Modify, OpenApi};

use crate::features::attendance::{dtos as attendance_dtos, handlers as attendance_handlers};
use crate::shared::types::{FailureResponse, FieldViolation, ValidationErrorResponse, ViolationKind};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Attendance
        attendance_handlers::submit_attendance,
    ),
    components(
        schemas(
            // Shared
            ViolationKind,
            FieldViolation,
            ValidationErrorResponse,
            FailureResponse,
            // Attendance
            attendance_dtos::SubmitAttendanceDto,
        )
    ),
    tags(
        (name = "attendance", description = "Check-in/check-out recording"),
    ),
    info(
        title = "Presentismo API",
        version = "0.1.0",
        description = "Attendance check-in/check-out recording",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_submit_endpoint() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut openapi);

        assert!(openapi.paths.paths.contains_key("/submit-attendance"));
        assert_eq!(openapi.info.title, "Custom");
        assert_eq!(openapi.info.version, "9.9.9");
    }
}
