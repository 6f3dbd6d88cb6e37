use serde::Serialize;

/// Structured error information extracted from MongoDB driver errors.
///
/// Serialized as compact JSON when logged at debug level, and rendered as a
/// single line for the status message.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl ErrorInfo {
    /// Convert error info to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// One-line human readable rendering, e.g. `Unauthorized (13): not authorized`.
    pub fn to_line(&self) -> String {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match (&self.name, self.code) {
            (Some(name), Some(code)) => format!("{name} ({code}): {message}"),
            (None, Some(code)) => format!("code {code}: {message}"),
            _ => message.to_string(),
        }
    }
}

/// Summarize a driver error as a single line suitable for a status message.
pub fn summarize_mongodb_error(error: &mongodb::error::Error) -> String {
    let info = extract_error_info(error);
    if let Ok(json) = info.to_json_compact() {
        tracing::debug!("MongoDB error: {}", json);
    }
    info.to_line()
}

/// Extract structured information from a MongoDB error using the driver API.
///
/// Only the kinds a read-only export can hit are broken out; anything else
/// falls back to the driver's `Display` output.
pub fn extract_error_info(error: &mongodb::error::Error) -> ErrorInfo {
    use mongodb::error::ErrorKind;

    let mut info = ErrorInfo::default();

    match error.kind.as_ref() {
        ErrorKind::Command(command_error) => {
            info.error_type = Some("mongo.command_error".to_string());
            info.code = Some(command_error.code);
            info.message = Some(command_error.message.clone());
            info.name = get_error_name(command_error.code);
        }
        ErrorKind::Authentication { message, .. } => {
            info.error_type = Some("mongo.authentication_error".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::InvalidArgument { message, .. } => {
            info.error_type = Some("mongo.invalid_argument".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::ServerSelection { message, .. } => {
            info.error_type = Some("mongo.server_selection_error".to_string());
            info.message = Some(message.clone());
        }
        _ => {
            info.message = Some(error.to_string());
        }
    }

    info
}

/// Get a human-readable error name from a MongoDB error code.
fn get_error_name(code: i32) -> Option<String> {
    let name = match code {
        2 => "BadValue",
        13 => "Unauthorized",
        18 => "AuthenticationFailed",
        26 => "NamespaceNotFound",
        43 => "CursorNotFound",
        50 => "MaxTimeMSExpired",
        11601 => "Interrupted",
        _ => return None,
    };

    Some(name.to_string())
}
