//! Attendance submission feature.
//!
//! Validates a check-in/check-out event, resolves its coordinates to a place
//! name through Nominatim (falling back to "Ubicación desconocida") and stores
//! it as a page in a Notion database.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/submit-attendance` | No | Record a check-in or check-out |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use clients::notion::NotionPagesClient;
pub use services::{AttendanceService, GeocodingService};
