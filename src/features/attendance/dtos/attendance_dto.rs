use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

use crate::features::attendance::models::AttendanceEvent;

/// Raw check-in/check-out submission.
///
/// Fields stay untyped until validation so that every bad field can be
/// reported at once instead of failing on the first deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttendanceDto {
    #[serde(default)]
    #[schema(value_type = String, example = "Ana")]
    pub employee_name: Option<Value>,

    /// ISO-8601 date-time of the event
    #[serde(default)]
    #[schema(value_type = String, example = "2024-05-01T09:00:00Z")]
    pub timestamp: Option<Value>,

    #[serde(default)]
    #[schema(value_type = f64, example = json!(-34.6))]
    pub latitude: Option<Value>,

    #[serde(default)]
    #[schema(value_type = f64, example = json!(-58.4))]
    pub longitude: Option<Value>,

    /// e.g. "check-in" or "check-out"
    #[serde(default)]
    #[schema(value_type = String, example = "check-in")]
    pub action_type: Option<Value>,
}

impl SubmitAttendanceDto {
    /// Body field names, in the order violations are reported
    pub const FIELDS: [&'static str; 5] = [
        "employeeName",
        "timestamp",
        "latitude",
        "longitude",
        "actionType",
    ];

    /// Validate every field and build the typed event.
    pub fn into_event(self) -> Result<AttendanceEvent, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let employee_name = collect(
            &mut errors,
            "employeeName",
            non_empty_text(self.employee_name.as_ref()),
        );
        let timestamp = collect(&mut errors, "timestamp", iso8601(self.timestamp.as_ref()));
        let latitude = collect(&mut errors, "latitude", finite_float(self.latitude.as_ref()));
        let longitude = collect(&mut errors, "longitude", finite_float(self.longitude.as_ref()));
        let action_type = collect(
            &mut errors,
            "actionType",
            non_empty_text(self.action_type.as_ref()),
        );

        match (employee_name, timestamp, latitude, longitude, action_type) {
            (
                Some(employee_name),
                Some(timestamp),
                Some(latitude),
                Some(longitude),
                Some(action_type),
            ) => Ok(AttendanceEvent {
                employee_name,
                timestamp,
                latitude,
                longitude,
                action_type,
            }),
            _ => Err(errors),
        }
    }
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, err);
            None
        }
    }
}

fn violation(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
    value: Option<&Value>,
) -> ValidationError {
    let mut err = ValidationError::new(code).with_message(message.into());
    if let Some(value) = value {
        err.add_param(Cow::Borrowed("value"), value);
    }
    err
}

fn non_empty_text(value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(violation("required", "Field is required", None)),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(violation("empty", "Must not be empty", value)),
        Some(_) => Err(violation("type", "Must be a string", value)),
    }
}

/// Date-times carrying a UTC offset: `Z`, `+03:00` or `+0300`
const OFFSET_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y%m%dT%H%M%S%.f%#z",
];

const LOCAL_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
];

/// Accepts extended and basic ISO 8601 date-times, with or without offset,
/// and calendar dates.
fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|f| DateTime::parse_from_str(s, f).is_ok())
        || LOCAL_DATE_TIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(s, "%Y%m%d").is_ok()
}

fn iso8601(value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(violation("required", "Field is required", None)),
        Some(Value::String(s)) if is_iso8601(s.trim()) => Ok(s.trim().to_string()),
        Some(_) => Err(violation("iso8601", "Must be an ISO-8601 date-time", value)),
    }
}

fn finite_float(value: Option<&Value>) -> Result<f64, ValidationError> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(violation("required", "Field is required", None));
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| violation("float", "Must be a finite number", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::violations_from;
    use serde_json::json;

    fn dto(body: Value) -> SubmitAttendanceDto {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "employeeName": "Ana",
            "timestamp": "2024-05-01T09:00:00Z",
            "latitude": -34.6,
            "longitude": -58.4,
            "actionType": "check-in"
        })
    }

    #[test]
    fn test_valid_body_builds_event() {
        let event = dto(valid_body()).into_event().unwrap();

        assert_eq!(event.employee_name, "Ana");
        assert_eq!(event.timestamp, "2024-05-01T09:00:00Z");
        assert_eq!(event.latitude, -34.6);
        assert_eq!(event.longitude, -58.4);
        assert_eq!(event.action_type, "check-in");
    }

    #[test]
    fn test_empty_body_reports_all_five_fields() {
        let errors = dto(json!({})).into_event().unwrap_err();

        let violations = violations_from(&errors, &SubmitAttendanceDto::FIELDS);
        let paths: Vec<_> = violations.iter().filter_map(|v| v.path.as_deref()).collect();

        assert_eq!(paths, SubmitAttendanceDto::FIELDS.to_vec());
    }

    #[test]
    fn test_only_malformed_fields_are_reported() {
        let mut body = valid_body();
        body["latitude"] = json!("north");
        body["actionType"] = json!("   ");

        let errors = dto(body).into_event().unwrap_err();
        let violations = violations_from(&errors, &SubmitAttendanceDto::FIELDS);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path.as_deref(), Some("latitude"));
        assert_eq!(violations[0].value, Some(json!("north")));
        assert_eq!(violations[1].path.as_deref(), Some("actionType"));
    }

    #[test]
    fn test_numeric_strings_are_accepted_as_coordinates() {
        let mut body = valid_body();
        body["latitude"] = json!("-34.6037");
        body["longitude"] = json!(" -58.3816 ");

        let event = dto(body).into_event().unwrap();

        assert_eq!(event.latitude, -34.6037);
        assert_eq!(event.longitude, -58.3816);
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let mut body = valid_body();
        body["latitude"] = json!("NaN");
        body["longitude"] = json!("inf");

        let errors = dto(body).into_event().unwrap_err();

        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_timestamp_formats() {
        for accepted in [
            "2024-05-01T09:00:00Z",
            "2024-05-01T09:00:00.123-03:00",
            "2024-05-01T09:00:00",
            "2024-05-01T09:00",
            "2024-05-01",
            "2024-05-01 09:00:00",
            "2024-05-01T09:00:00+0300",
            "2024-05-01 09:00:00.5-03:00",
            "20240501T090000Z",
            "20240501T090000",
            "20240501",
        ] {
            assert!(is_iso8601(accepted), "{} should be accepted", accepted);
        }

        for rejected in [
            "yesterday",
            "01/05/2024",
            "2024-13-01",
            "2024-05-01T25:00:00Z",
            "",
        ] {
            assert!(!is_iso8601(rejected), "{} should be rejected", rejected);
        }
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let body = json!({
            "employeeName": 42,
            "timestamp": 1714554000,
            "latitude": true,
            "longitude": [1.0],
            "actionType": { "kind": "check-in" }
        });

        let errors = dto(body).into_event().unwrap_err();

        assert_eq!(errors.field_errors().len(), 5);
    }

    #[test]
    fn test_out_of_range_number_is_a_field_violation() {
        let body = r#"{
            "employeeName": "",
            "timestamp": "2024-05-01T09:00:00Z",
            "latitude": 1e400,
            "longitude": -58.4,
            "actionType": "check-in"
        }"#;
        let dto: SubmitAttendanceDto = serde_json::from_str(body).unwrap();

        let errors = dto.into_event().unwrap_err();
        let violations = violations_from(&errors, &SubmitAttendanceDto::FIELDS);
        let paths: Vec<_> = violations.iter().filter_map(|v| v.path.as_deref()).collect();

        assert_eq!(paths, vec!["employeeName", "latitude"]);
    }
}
