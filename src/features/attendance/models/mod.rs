mod attendance_event;
mod attendance_record;

pub use attendance_event::{AttendanceEvent, GeocodeResult};
pub use attendance_record::{AttendanceRecord, PropertyValue};
