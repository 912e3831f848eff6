use std::fmt::Write;

use chrono::NaiveTime;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::config::{NamePropertyKind, RecordConfig};
use crate::features::attendance::models::{AttendanceEvent, GeocodeResult};
use crate::shared::constants::{
    PROPERTY_ACTION, PROPERTY_DATE, PROPERTY_LOCATION, PROPERTY_NAME, PROPERTY_TIME,
};

/// Notion `{"text": {"content": ...}}` fragment
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RichText {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DateValue {
    pub start: String,
}

/// A Notion property value, serialized as `{"<type>": <payload>}`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Select(SelectOption),
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Date(DateValue),
}

impl PropertyValue {
    pub fn select(name: impl Into<String>) -> Self {
        Self::Select(SelectOption { name: name.into() })
    }

    pub fn title(content: impl Into<String>) -> Self {
        Self::Title(vec![RichText::plain(content)])
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        Self::RichText(vec![RichText::plain(content)])
    }

    pub fn date(start: impl Into<String>) -> Self {
        Self::Date(DateValue {
            start: start.into(),
        })
    }

    /// Plain text carried by the value, whatever its type
    pub fn text(&self) -> &str {
        match self {
            Self::Select(option) => &option.name,
            Self::Title(parts) | Self::RichText(parts) => parts
                .first()
                .map(|p| p.text.content.as_str())
                .unwrap_or_default(),
            Self::Date(date) => &date.start,
        }
    }
}

/// Properties of the Notion page created for one attendance event.
///
/// Serializes to the `properties` object of a create-page request.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub name: PropertyValue,
    pub date: PropertyValue,
    pub location: PropertyValue,
    pub time_of_submission: PropertyValue,
    pub action: PropertyValue,
}

impl AttendanceRecord {
    /// Build the record for `event`, stamping it with `submitted_at`.
    pub fn build(
        event: &AttendanceEvent,
        geocode: &GeocodeResult,
        submitted_at: NaiveTime,
        options: &RecordConfig,
    ) -> Self {
        let name = match options.name_property {
            NamePropertyKind::Select => PropertyValue::select(&event.employee_name),
            NamePropertyKind::Title => PropertyValue::title(&event.employee_name),
        };

        Self {
            name,
            date: PropertyValue::date(&event.timestamp),
            location: PropertyValue::rich_text(&geocode.location_name),
            time_of_submission: PropertyValue::rich_text(render_time(
                submitted_at,
                &options.time_format,
            )),
            action: PropertyValue::select(&event.action_type),
        }
    }
}

fn render_time(time: NaiveTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(format)).is_err() {
        return time.format("%H:%M:%S").to_string();
    }
    out
}

impl Serialize for AttendanceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(PROPERTY_NAME, &self.name)?;
        map.serialize_entry(PROPERTY_DATE, &self.date)?;
        map.serialize_entry(PROPERTY_LOCATION, &self.location)?;
        map.serialize_entry(PROPERTY_TIME, &self.time_of_submission)?;
        map.serialize_entry(PROPERTY_ACTION, &self.action)?;
        map.end()
    }
}
