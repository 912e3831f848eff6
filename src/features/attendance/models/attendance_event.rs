use crate::shared::constants::FALLBACK_LOCATION;

/// A check-in/check-out event that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceEvent {
    pub employee_name: String,
    /// ISO-8601 text exactly as submitted
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub action_type: String,
}

/// Place description for an event's coordinates, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeResult {
    pub location_name: String,
}

impl GeocodeResult {
    /// Use `display_name` when it carries text, the fallback otherwise
    pub fn from_display_name(display_name: Option<String>) -> Self {
        match display_name {
            Some(name) if !name.trim().is_empty() => Self {
                location_name: name,
            },
            _ => Self::fallback(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            location_name: FALLBACK_LOCATION.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.location_name == FALLBACK_LOCATION
    }
}
