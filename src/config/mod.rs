//! Configuration module for the defects backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Default request body cap; large enough for a base64-encoded camera photo.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection string
    pub database_url: String,
    /// Host to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Maximum accepted request body in bytes
    pub body_limit_bytes: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit log lines as JSON
    pub log_json: bool,
}

/// A configuration variable that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DEFECTS_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/defects.sqlite".to_string());

        let host = parse_var("DEFECTS_HOST", "0.0.0.0")?;

        // Hosting platforms commonly hand out the port through plain PORT.
        let port = match env::var("DEFECTS_PORT") {
            Ok(value) => parse_value("DEFECTS_PORT", value)?,
            Err(_) => parse_var("PORT", "3000")?,
        };

        let body_limit_bytes = match env::var("DEFECTS_BODY_LIMIT_BYTES") {
            Ok(value) => parse_value("DEFECTS_BODY_LIMIT_BYTES", value)?,
            Err(_) => DEFAULT_BODY_LIMIT_BYTES,
        };

        let log_level = env::var("DEFECTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("DEFECTS_LOG_JSON")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            host,
            port,
            body_limit_bytes,
            log_level,
            log_json,
        })
    }

    /// The socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(variable).unwrap_or_else(|_| default.to_string());
    parse_value(variable, value)
}

fn parse_value<T: std::str::FromStr>(variable: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError { variable, value })
}
