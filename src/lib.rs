//! Review Export Library
//!
//! Core of the `review-export` tool: read query parameters from a YAML file,
//! fetch the matching reviews from MongoDB and save them as CSV.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Run settings and the query file
//! - `connection`: MongoDB connection management
//! - `error`: Error types and handling
//! - `export`: CSV serialization
//! - `exporter`: The export pipeline
//! - `formatter`: BSON value to cell text conversion
//! - `query`: Filter construction
//! - `store`: Review store abstraction and its MongoDB implementation
//! - `table`: In-memory tabular structure
//!
//! # Example
//!
//! ```no_run
//! use review_export::{ReviewExporter, Settings, status_message};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let settings = Settings::with_uri("mongodb://localhost:27017");
//!     let exporter = ReviewExporter::new(settings);
//!
//!     let result = exporter.run().await;
//!     println!("{}", status_message(&result));
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod exporter;
pub mod formatter;
pub mod query;
pub mod store;
pub mod table;

// Re-export commonly used types
pub use config::{QueryConfig, Settings};
pub use connection::ConnectionManager;
pub use error::{ErrorKind, Result, ReviewExportError};
pub use exporter::{ExportReport, ReviewExporter, status_message};
pub use table::ReviewTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
