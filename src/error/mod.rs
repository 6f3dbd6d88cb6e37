//! Error handling for export runs.
//!
//! Failures are grouped into four buckets that mirror the pipeline stages:
//! - `ConfigError`: environment, query file, parameters and dates
//! - `ConnectionError`: reaching MongoDB
//! - `QueryError`: running the find and draining the cursor
//! - `ExportError`: building and writing the CSV file
//!
//! Driver errors are summarized from the driver's typed error kinds instead
//! of their debug output.
//!
//! # Example
//!
//! ```rust
//! use review_export::error::{ConfigError, ErrorKind, ReviewExportError};
//!
//! let err: ReviewExportError = ConfigError::MissingEnvVar("MONGO_URI".into()).into();
//! assert_eq!(err.kind(), ErrorKind::Config);
//! assert_eq!(err.to_string(), "Environment variable 'MONGO_URI' not set.");
//! ```

pub mod kinds;
pub mod mongo;

// Re-export commonly used types
pub use kinds::{
    ConfigError, ConnectionError, ErrorKind, ExportError, QueryError, Result, ReviewExportError,
};
pub use mongo::{ErrorInfo, extract_error_info, summarize_mongodb_error};
