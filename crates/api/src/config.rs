use std::env;
use std::str::FromStr;

use cityfolio_core::auth::TokenConfig;
use cityfolio_core::media::CloudinaryConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Bearer token signing and lifetime.
    pub token: TokenConfig,
    /// Media host credentials and upload folder.
    pub cloudinary: CloudinaryConfig,
    /// Request-body limit for image uploads.
    pub upload_max_bytes: usize,
    /// Account created at startup and restored by `reset-account`.
    pub admin: AdminCredentials,
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "5000", "u16")?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "10", "u32")?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", "1", "u32")?,
            token: TokenConfig {
                secret: var_or("JWT_SECRET", "dev-secret-change-me-in-production"),
                expiry_hours: parse_var("JWT_EXPIRY_HOURS", "24", "i64")?,
            },
            cloudinary: CloudinaryConfig {
                cloud_name: var_or("CLOUDINARY_CLOUD_NAME", ""),
                api_key: var_or("CLOUDINARY_API_KEY", ""),
                api_secret: var_or("CLOUDINARY_API_SECRET", ""),
                folder: var_or("UPLOAD_FOLDER", "investment-site"),
            },
            upload_max_bytes: parse_var("UPLOAD_MAX_BYTES", "10485760", "usize")?,
            admin: AdminCredentials {
                username: var_or("ADMIN_USERNAME", "admin"),
                email: var_or("ADMIN_EMAIL", "admin@investment-site.com"),
                password: var_or("ADMIN_PASSWORD", "Admin@123456"),
            },
            log_level: var_or("LOG_LEVEL", "info"),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
