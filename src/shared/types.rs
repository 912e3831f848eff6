use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Where a violation was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// A single body field failed its constraint
    Field,
    /// The body as a whole could not be read
    Body,
}

/// One failed input constraint, shaped like express-validator entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// Offending value as received, absent when the field was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<serde_json::Value>,
    pub msg: String,
    /// Field name in the request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub location: String,
}

impl FieldViolation {
    pub fn field(path: &str, msg: impl Into<String>, value: Option<serde_json::Value>) -> Self {
        Self {
            kind: ViolationKind::Field,
            value,
            msg: msg.into(),
            path: Some(path.to_string()),
            location: "body".to_string(),
        }
    }

    pub fn body(msg: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Body,
            value: None,
            msg: msg.into(),
            path: None,
            location: "body".to_string(),
        }
    }
}

/// Flatten `ValidationErrors` into violations, ordered by `field_order`.
///
/// Fields not listed in `field_order` come last, sorted by name.
pub fn violations_from(errors: &ValidationErrors, field_order: &[&str]) -> Vec<FieldViolation> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().cloned().collect();
    fields.sort_by_key(|field| {
        let rank = field_order
            .iter()
            .position(|f| *f == &**field)
            .unwrap_or(field_order.len());
        (rank, field.clone())
    });

    fields
        .iter()
        .flat_map(|field| {
            field_errors
                .get(field)
                .into_iter()
                .flat_map(|errs| errs.iter())
                .map(move |err| {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldViolation::field(field, msg, err.params.get("value").cloned())
                })
        })
        .collect()
}

/// Body of every 400 response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldViolation>,
}

/// Body of every 500 response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FailureResponse {
    pub message: String,
    pub error: String,
}
