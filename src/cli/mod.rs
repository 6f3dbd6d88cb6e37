//! Command-line interface for review-export
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Resolving the connection string from the environment
//! - Building the run [`Settings`]

use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_OUTPUT_FILE, DEFAULT_QUERY_FILE,
    DEFAULT_URI_ENV, LogLevel, Settings,
};
use crate::exporter::ReviewExporter;

/// Export app reviews from MongoDB to CSV
#[derive(Parser, Debug)]
#[command(
    name = "review-export",
    version,
    about = ReviewExporter::DESCRIPTION,
    long_about = "Reads appId, store, lang and a date range from a YAML query file, \
fetches the matching reviews from MongoDB and writes them to a CSV file.

The connection string is read from the MONGO_URI environment variable \
(a .env file in the working directory is loaded first)."
)]
pub struct CliArgs {
    /// YAML query file
    #[arg(short = 'c', long = "config", value_name = "FILE", default_value = DEFAULT_QUERY_FILE)]
    pub query_file: PathBuf,

    /// CSV output file
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Database name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Collection name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Environment variable holding the connection string
    #[arg(long, value_name = "VAR", default_value = DEFAULT_URI_ENV)]
    pub uri_env: String,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Application name reported to the server
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Log level
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Omit timestamps from log lines
    #[arg(long)]
    pub no_timestamps: bool,
}

/// CLI interface handler
pub struct CliInterface {
    /// Resolved settings
    settings: Settings,
}

impl CliInterface {
    /// Parse process arguments and read the connection string from the environment
    pub fn new() -> Self {
        let args = CliArgs::parse();
        let uri = Settings::uri_from_env(&args.uri_env);
        Self::from_args(args, uri)
    }

    /// Build the interface from parsed arguments and an already resolved URI
    pub fn from_args(args: CliArgs, mongo_uri: Option<String>) -> Self {
        let settings = Self::build_settings(&args, mongo_uri);
        Self { settings }
    }

    fn build_settings(args: &CliArgs, mongo_uri: Option<String>) -> Settings {
        let mut settings = Settings {
            mongo_uri,
            uri_env_var: args.uri_env.clone(),
            query_file: args.query_file.clone(),
            output_file: args.output_file.clone(),
            database: args.database.clone(),
            collection: args.collection.clone(),
            ..Settings::default()
        };

        settings.connection.timeout = args.timeout;
        if let Some(app_name) = &args.app_name {
            settings.connection.app_name = app_name.clone();
        }

        settings.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else {
            args.log_level.unwrap_or(settings.logging.level)
        };
        settings.logging.timestamps = !args.no_timestamps;

        settings
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Get sanitized connection URI for display (hides credentials)
    pub fn sanitized_uri(&self) -> Option<String> {
        self.settings.mongo_uri.as_deref().map(sanitize_uri)
    }
}

/// Sanitize URI by hiding credentials
///
/// # Arguments
/// * `uri` - The URI to sanitize
///
/// # Returns
/// * `String` - URI with everything between `://` and `@` replaced by `***`
pub fn sanitize_uri(uri: &str) -> String {
    if let (Some(proto_end), Some(host_start)) = (uri.find("://"), uri.rfind('@')) {
        if host_start > proto_end {
            return format!("{}***{}", &uri[..proto_end + 3], &uri[host_start..]);
        }
    }
    uri.to_string()
}
