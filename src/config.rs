//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::domain::EmployerInfo;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Locations of the flat files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Employee CSV file
    pub employee_csv: PathBuf,

    /// Directory holding one `YYYYMM.csv` per month
    pub event_dir: PathBuf,
}

impl StorageConfig {
    /// Default layout below a data directory
    pub fn under(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            employee_csv: data_dir.join("employees").join("employee_data.csv"),
            event_dir: data_dir.join("events"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Flat-file locations
    pub storage: StorageConfig,

    /// Employer printed on every form
    pub employer: EmployerInfo,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let mut storage = StorageConfig::under(data_dir);
        if let Ok(path) = env::var("EMPLOYEE_CSV") {
            storage.employee_csv = path.into();
        }
        if let Ok(path) = env::var("EVENT_DIR") {
            storage.event_dir = path.into();
        }

        let defaults = EmployerInfo::default();
        let employer = EmployerInfo {
            name: env::var("EMPLOYER_NAME").unwrap_or(defaults.name),
            address: env::var("EMPLOYER_ADDRESS").unwrap_or(defaults.address),
            contact: env::var("EMPLOYER_CONTACT").unwrap_or(defaults.contact),
        };

        Ok(Self {
            host,
            port,
            environment,
            log_format,
            storage,
            employer,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
