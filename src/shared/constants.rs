/// Location text stored when reverse geocoding yields nothing usable
pub const FALLBACK_LOCATION: &str = "Ubicación desconocida";

/// Body returned on every failed submission
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to record attendance.";

/// Static text served at `GET /`
pub const SERVICE_BANNER: &str = "API de presentismo";

// =============================================================================
// NOTION PROPERTY NAMES
// =============================================================================

/// Employee name (select or title)
pub const PROPERTY_NAME: &str = "Nombre";

/// Event timestamp (date)
pub const PROPERTY_DATE: &str = "Fecha";

/// Resolved place description (rich text)
pub const PROPERTY_LOCATION: &str = "Ubicacion";

/// Server time-of-day at submission (rich text)
pub const PROPERTY_TIME: &str = "Hora";

/// check-in / check-out (select)
pub const PROPERTY_ACTION: &str = "Accion";
