use std::{fmt, io};

use crate::error::mongo::summarize_mongodb_error;

/// Crate-wide `Result` type using [`ReviewExportError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ReviewExportError>;

/// The four buckets a failed run can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Connection,
    Query,
    Export,
}

/// Top-level error type for an export run.
///
/// Every failure of the pipeline ends up in exactly one of the four
/// variants, so callers can match on [`ErrorKind`] and still render the
/// detailed message through `Display`.
#[derive(Debug)]
pub enum ReviewExportError {
    /// Environment, query file and parameter errors.
    Config(ConfigError),

    /// Failures reaching or authenticating against MongoDB.
    Connection(ConnectionError),

    /// Failures running the find or draining its cursor.
    Query(QueryError),

    /// Failures building or writing the CSV file.
    Export(ExportError),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The environment variable holding the connection string is not set.
    MissingEnvVar(String),

    /// Query file not found.
    FileNotFound(String),

    /// Query file exists but could not be read.
    Read { path: String, source: io::Error },

    /// Query file is not valid YAML (or not a mapping).
    Parse { path: String, detail: String },

    /// One or more required parameters are absent or empty.
    MissingParameters { path: String, fields: Vec<String> },

    /// A parameter has a value that cannot be used as text.
    InvalidValue { field: String, value: String },

    /// A date does not match `YYYY-MM-DDTHH:MM:SSZ`.
    BadDate { field: String, value: String, detail: String },
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Connection string could not be parsed.
    InvalidUri(String),

    /// Failed to build the client.
    ConnectionFailed(String),

    /// Ping command failed.
    PingFailed(String),
}

/// Query-specific errors.
#[derive(Debug)]
pub enum QueryError {
    /// The find command failed.
    QueryFailed(String),

    /// The cursor failed while results were being fetched.
    CursorFailed(String),
}

/// Export-specific errors.
#[derive(Debug)]
pub enum ExportError {
    /// Output directory could not be created.
    CreateDirectory { path: String, source: io::Error },

    /// Table could not be serialized to CSV.
    Serialize(String),

    /// CSV bytes could not be written to disk.
    Write { path: String, source: io::Error },
}

impl ReviewExportError {
    /// Bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewExportError::Config(_) => ErrorKind::Config,
            ReviewExportError::Connection(_) => ErrorKind::Connection,
            ReviewExportError::Query(_) => ErrorKind::Query,
            ReviewExportError::Export(_) => ErrorKind::Export,
        }
    }

    /// Wrap a driver error raised by the find command.
    pub fn query(err: &mongodb::error::Error) -> Self {
        QueryError::QueryFailed(summarize_mongodb_error(err)).into()
    }

    /// Wrap a driver error raised while draining the cursor.
    pub fn cursor(err: &mongodb::error::Error) -> Self {
        QueryError::CursorFailed(summarize_mongodb_error(err)).into()
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "ConfigError",
            ErrorKind::Connection => "ConnectionError",
            ErrorKind::Query => "QueryError",
            ErrorKind::Export => "ExportError",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ReviewExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewExportError::Config(e) => write!(f, "{e}"),
            ReviewExportError::Connection(e) => write!(f, "Error connecting to MongoDB: {e}"),
            ReviewExportError::Query(e) => write!(f, "Error executing query: {e}"),
            ReviewExportError::Export(e) => write!(f, "Error exporting to CSV: {e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEnvVar(name) => {
                write!(f, "Environment variable '{name}' not set.")
            }
            ConfigError::FileNotFound(path) => write!(f, "Query file not found: {path}"),
            ConfigError::Read { path, source } => write!(f, "Error reading {path}: {source}"),
            ConfigError::Parse { path, detail } => write!(f, "Error parsing {path}: {detail}"),
            ConfigError::MissingParameters { path, fields } => {
                write!(f, "Missing query parameters in {path}: {}", fields.join(", "))
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for query parameter '{field}'")
            }
            ConfigError::BadDate { field, value, detail } => write!(
                f,
                "Error parsing dates: {field} '{value}' is not YYYY-MM-DDTHH:MM:SSZ ({detail})"
            ),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidUri(msg) => write!(f, "Invalid connection URI: {msg}"),
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            QueryError::CursorFailed(msg) => write!(f, "Cursor error: {msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::CreateDirectory { path, source } => {
                write!(f, "Failed to create directory {path}: {source}")
            }
            ExportError::Serialize(msg) => write!(f, "Failed to build CSV: {msg}"),
            ExportError::Write { path, source } => {
                write!(f, "Failed to write {path}: {source}")
            }
        }
    }
}

impl std::error::Error for ReviewExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReviewExportError::Config(e) => Some(e),
            ReviewExportError::Connection(e) => Some(e),
            ReviewExportError::Query(e) => Some(e),
            ReviewExportError::Export(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for ConnectionError {}
impl std::error::Error for QueryError {}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::CreateDirectory { source, .. } | ExportError::Write { source, .. } => {
                Some(source)
            }
            ExportError::Serialize(_) => None,
        }
    }
}

/* ========================= Conversions to ReviewExportError ========================= */

impl From<ConfigError> for ReviewExportError {
    fn from(err: ConfigError) -> Self {
        ReviewExportError::Config(err)
    }
}

impl From<ConnectionError> for ReviewExportError {
    fn from(err: ConnectionError) -> Self {
        ReviewExportError::Connection(err)
    }
}

impl From<QueryError> for ReviewExportError {
    fn from(err: QueryError) -> Self {
        ReviewExportError::Query(err)
    }
}

impl From<ExportError> for ReviewExportError {
    fn from(err: ExportError) -> Self {
        ReviewExportError::Export(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_var_message() {
        let err: ReviewExportError = ConfigError::MissingEnvVar("MONGO_URI".to_string()).into();
        assert_eq!(err.to_string(), "Environment variable 'MONGO_URI' not set.");
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_missing_parameters_lists_fields() {
        let err = ConfigError::MissingParameters {
            path: "config/consulta.yaml".to_string(),
            fields: vec!["appId".to_string(), "end_date".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing query parameters in config/consulta.yaml: appId, end_date"
        );
    }

    #[test]
    fn test_kind_per_bucket() {
        let conn: ReviewExportError = ConnectionError::PingFailed("down".into()).into();
        let query: ReviewExportError = QueryError::CursorFailed("killed".into()).into();
        let export: ReviewExportError = ExportError::Serialize("bad".into()).into();

        assert_eq!(conn.kind(), ErrorKind::Connection);
        assert_eq!(query.kind(), ErrorKind::Query);
        assert_eq!(export.kind(), ErrorKind::Export);
        assert!(conn.to_string().starts_with("Error connecting to MongoDB"));
        assert!(query.to_string().starts_with("Error executing query"));
        assert!(export.to_string().starts_with("Error exporting to CSV"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Config.to_string(), "ConfigError");
        assert_eq!(ErrorKind::Export.to_string(), "ExportError");
    }
}
