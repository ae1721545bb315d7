use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "spectrum-intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process configuration, loaded from the environment once at startup
/// and passed explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Deployment environment name.
    pub environment: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("spectrum_intake.db"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            log_level: "info".to_string(),
            environment: "production".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `SPECTRUM_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_path: std::env::var("SPECTRUM_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            bind_addr: std::env::var("SPECTRUM_BIND_ADDR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bind_addr),
            log_level: std::env::var("SPECTRUM_LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: std::env::var("SPECTRUM_ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Default tracing filter: the service at the configured level, HTTP
    /// plumbing at warn.
    pub fn default_log_filter(&self) -> String {
        format!("spectrum_intake={},tower_http=warn,axum=warn", self.log_level)
    }
}
