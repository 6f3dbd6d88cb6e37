//! Configuration for review-export
//!
//! Two kinds of configuration feed a run:
//! - [`Settings`]: where to read, where to write and how to connect. Built once
//!   at the entry point from command-line arguments and the environment.
//! - [`QueryConfig`]: the parameters of the query itself, loaded from the YAML
//!   query file during the run.
//!
//! Settings precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables (including a `.env` file)
//! 3. Default values

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub mod query;

pub use query::{DATE_FORMAT, QueryConfig, parse_query_date};

/// Default location of the query file, relative to the working directory
pub const DEFAULT_QUERY_FILE: &str = "config/consulta.yaml";

/// Default location of the exported CSV, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "data/output/reviews_export.csv";

/// Database holding the review collection
pub const DEFAULT_DATABASE: &str = "ReviewsGplay";

/// Collection holding review documents
pub const DEFAULT_COLLECTION: &str = "reviews";

/// Environment variable holding the connection string
pub const DEFAULT_URI_ENV: &str = "MONGO_URI";

/// Runtime settings for one export run
#[derive(Clone)]
pub struct Settings {
    /// Connection string, if the environment provided one
    pub mongo_uri: Option<String>,

    /// Name of the environment variable the connection string came from
    pub uri_env_var: String,

    /// Path to the YAML query file
    pub query_file: PathBuf,

    /// Path of the CSV file to write
    pub output_file: PathBuf,

    /// Database name
    pub database: String,

    /// Collection name
    pub collection: String,

    /// Connection configuration
    pub connection: ConnectionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server selection and connect timeout in seconds (driver default when unset)
    pub timeout: Option<u64>,

    /// Application name reported to the server
    pub app_name: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: LogLevel,

    /// Enable timestamps in logs
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mongo_uri: None,
            uri_env_var: DEFAULT_URI_ENV.to_string(),
            query_file: PathBuf::from(DEFAULT_QUERY_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            connection: ConnectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            app_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            timestamps: true,
        }
    }
}

// The connection string may carry credentials, so it never reaches logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("mongo_uri", &self.mongo_uri.as_ref().map(|_| "<redacted>"))
            .field("uri_env_var", &self.uri_env_var)
            .field("query_file", &self.query_file)
            .field("output_file", &self.output_file)
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("connection", &self.connection)
            .field("logging", &self.logging)
            .finish()
    }
}

impl Settings {
    /// Create settings with default values and the given connection string
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            mongo_uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Resolve the connection string from the process environment
    ///
    /// Empty values count as unset.
    pub fn uri_from_env(var: &str) -> Option<String> {
        std::env::var(var).ok().filter(|value| !value.is_empty())
    }
}

impl ConnectionConfig {
    /// Get connection timeout as Duration
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
