use chrono::format::{Item, StrftimeItems};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub notion: NotionConfig,
    pub geocoding: GeocodingConfig,
    pub record: RecordConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Notion API settings used to create one page per attendance event
#[derive(Clone)]
pub struct NotionConfig {
    /// Integration secret sent as bearer credential
    pub api_key: String,
    /// Database the pages are created under
    pub database_id: String,
    /// Base URL of the Notion REST API (without trailing slash)
    pub base_url: String,
    /// Value of the `Notion-Version` header
    pub api_version: String,
}

// Keeps the integration secret out of logs.
impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &"***")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Nominatim reverse-geocoding settings
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    /// Deadline for the whole lookup (request + body)
    pub timeout: Duration,
    /// Nominatim detail level, 20 is building level
    pub zoom: u8,
    pub user_agent: String,
}

/// How the Notion `Nombre` property is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePropertyKind {
    #[default]
    Select,
    Title,
}

impl FromStr for NamePropertyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "title" => Ok(Self::Title),
            other => Err(format!(
                "RECORD_NAME_PROPERTY must be 'select' or 'title', got '{}'",
                other
            )),
        }
    }
}

/// Options for building the attendance record payload
#[derive(Debug, Clone)]
pub struct RecordConfig {
    /// chrono format string for the time-of-submission text
    pub time_format: String,
    pub name_property: NamePropertyKind,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            notion: NotionConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
            record: RecordConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Presentismo API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Attendance check-in/check-out recording".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl NotionConfig {
    const DEFAULT_BASE_URL: &'static str = "https://api.notion.com/v1";
    const DEFAULT_API_VERSION: &'static str = "2022-06-28";

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("NOTION_API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "NOTION_API_KEY environment variable is required".to_string())?;

        let database_id = env::var("NOTION_DATABASE_ID")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "NOTION_DATABASE_ID environment variable is required".to_string())?;

        let base_url = env::var("NOTION_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_version =
            env::var("NOTION_VERSION").unwrap_or_else(|_| Self::DEFAULT_API_VERSION.to_string());

        Ok(Self {
            api_key,
            database_id,
            base_url,
            api_version,
        })
    }
}

impl GeocodingConfig {
    const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";
    const DEFAULT_TIMEOUT_MS: u64 = 5000;
    const DEFAULT_ZOOM: u8 = 20;
    const DEFAULT_USER_AGENT: &'static str = "PresentismoCore/1.0 (attendance-tracking)";

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("GEOCODING_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_ms = env::var("GEOCODING_TIMEOUT_MS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEOCODING_TIMEOUT_MS must be a valid number".to_string())?;

        let zoom = env::var("GEOCODING_ZOOM")
            .unwrap_or_else(|_| Self::DEFAULT_ZOOM.to_string())
            .parse::<u8>()
            .ok()
            .filter(|z| *z <= 20)
            .ok_or_else(|| "GEOCODING_ZOOM must be a number between 0 and 20".to_string())?;

        let user_agent = env::var("GEOCODING_USER_AGENT")
            .unwrap_or_else(|_| Self::DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            zoom,
            user_agent,
        })
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(Self::DEFAULT_TIMEOUT_MS),
            zoom: Self::DEFAULT_ZOOM,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RecordConfig {
    pub const DEFAULT_TIME_FORMAT: &'static str = "%-I:%M:%S %p";

    pub fn from_env() -> Result<Self, String> {
        let time_format = env::var("RECORD_TIME_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_TIME_FORMAT.to_string());

        if StrftimeItems::new(&time_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "RECORD_TIME_FORMAT is not a valid time format: '{}'",
                time_format
            ));
        }

        let name_property = env::var("RECORD_NAME_PROPERTY")
            .map(|v| v.parse::<NamePropertyKind>())
            .unwrap_or(Ok(NamePropertyKind::default()))?;

        Ok(Self {
            time_format,
            name_property,
        })
    }
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            time_format: Self::DEFAULT_TIME_FORMAT.to_string(),
            name_property: NamePropertyKind::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_property_kind_parse() {
        assert_eq!(
            "select".parse::<NamePropertyKind>(),
            Ok(NamePropertyKind::Select)
        );
        assert_eq!(
            " Title ".parse::<NamePropertyKind>(),
            Ok(NamePropertyKind::Title)
        );
        assert!("rich_text".parse::<NamePropertyKind>().is_err());
    }

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }

    #[test]
    fn test_notion_config_debug_hides_api_key() {
        let config = NotionConfig {
            api_key: "secret_abc".to_string(),
            database_id: "db".to_string(),
            base_url: "https://api.notion.com/v1".to_string(),
            api_version: "2022-06-28".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret_abc"));
        assert!(rendered.contains("db"));
    }
}
