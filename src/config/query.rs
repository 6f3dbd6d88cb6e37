//! Query file loading
//!
//! The query file is a small YAML mapping holding the five parameters of an
//! export run:
//!
//! ```yaml
//! appId: com.example.app
//! store: google_play
//! lang: pt
//! start_date: "2024-01-01T00:00:00Z"
//! end_date: "2024-01-31T23:59:59Z"
//! ```

use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{ConfigError, Result};

/// Exact format accepted for `start_date` / `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Validated query parameters for one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub app_id: String,
    pub store: String,
    pub lang: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Query file as written on disk, before validation
#[derive(Debug, Default, Deserialize)]
struct RawQueryFile {
    #[serde(default, rename = "appId", alias = "app_id")]
    app_id: Option<Value>,
    #[serde(default)]
    store: Option<Value>,
    #[serde(default)]
    lang: Option<Value>,
    #[serde(default, alias = "startDate")]
    start_date: Option<Value>,
    #[serde(default, alias = "endDate")]
    end_date: Option<Value>,
}

impl QueryConfig {
    /// Load and validate the query file at `path`
    ///
    /// # Arguments
    /// * `path` - Path to the YAML query file
    ///
    /// # Returns
    /// * `Result<QueryConfig>` - Validated parameters or a `ConfigError`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound(origin).into());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: origin,
                    source,
                }
                .into());
            }
        };

        Self::from_yaml_str(&content, &origin)
    }

    /// Parse and validate query parameters from YAML text
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self> {
        let parse_error = |detail: String| ConfigError::Parse {
            path: origin.to_string(),
            detail,
        };

        let value: Value = serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        let raw = match value {
            Value::Null => RawQueryFile::default(),
            Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|e| parse_error(e.to_string()))?
            }
            other => {
                return Err(parse_error(format!(
                    "expected a mapping, found {}",
                    value_kind(&other)
                ))
                .into());
            }
        };

        Ok(raw.validate(origin)?)
    }
}

impl RawQueryFile {
    fn validate(self, origin: &str) -> std::result::Result<QueryConfig, ConfigError> {
        let app_id = scalar_text("appId", self.app_id)?;
        let store = scalar_text("store", self.store)?;
        let lang = scalar_text("lang", self.lang)?;
        let start_date = scalar_text("start_date", self.start_date)?;
        let end_date = scalar_text("end_date", self.end_date)?;

        let (Some(app_id), Some(store), Some(lang), Some(start_date), Some(end_date)) =
            (&app_id, &store, &lang, &start_date, &end_date)
        else {
            let fields = [
                ("appId", app_id.is_none()),
                ("store", store.is_none()),
                ("lang", lang.is_none()),
                ("start_date", start_date.is_none()),
                ("end_date", end_date.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name.to_string())
            .collect();

            return Err(ConfigError::MissingParameters {
                path: origin.to_string(),
                fields,
            });
        };

        Ok(QueryConfig {
            app_id: app_id.clone(),
            store: store.clone(),
            lang: lang.clone(),
            start_date: parse_query_date("start_date", start_date)?,
            end_date: parse_query_date("end_date", end_date)?,
        })
    }
}

/// Parse a date in the exact `YYYY-MM-DDTHH:MM:SSZ` form as UTC
///
/// # Arguments
/// * `field` - Parameter name, used in the error
/// * `value` - Raw text from the query file
pub fn parse_query_date(field: &str, value: &str) -> std::result::Result<DateTime<Utc>, ConfigError> {
    let bad_date = |detail: String| ConfigError::BadDate {
        field: field.to_string(),
        value: value.to_string(),
        detail,
    };

    let naive = NaiveDateTime::parse_from_str(value, DATE_FORMAT).map_err(|e| bad_date(e.to_string()))?;

    // chrono skips whitespace, accepts signed years and second 60; only the
    // canonical rendering is allowed through.
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(bad_date("leap seconds are not allowed".to_string()));
    }
    if naive.format(DATE_FORMAT).to_string() != value {
        return Err(bad_date("value is not in canonical form".to_string()));
    }

    Ok(naive.and_utc())
}

/// Read a scalar parameter as text; `None` when absent, null or empty
fn scalar_text(field: &str, value: Option<Value>) -> std::result::Result<Option<String>, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok((!s.is_empty()).then_some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Tagged(tagged)) => scalar_text(field, Some(tagged.value)),
        Some(other) => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value_kind(&other).to_string(),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
