mod attendance_service;
mod geocoding_service;

pub use attendance_service::{AttendanceService, LocationResolver, RecordStore};
pub use geocoding_service::GeocodingService;
