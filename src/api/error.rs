use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token is missing, invalid, or revoked")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        // Walk back to a char boundary so multi-byte text cannot panic
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

/// Normalized login/registration failure.
///
/// The backend rejects credentials with one of three historical body shapes:
/// a field-keyed error map, a list or string under a conventional key, or a
/// bare string. All of them collapse into this one type right after the HTTP
/// call so callers pattern-match instead of probing the raw JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// Per-field validation errors, e.g. `{"password": ["Too short."]}`
    FieldErrors(BTreeMap<String, Vec<String>>),
    /// A single human-readable message
    Message(String),
    /// No usable server response was received
    Network,
}

impl AuthRejection {
    /// Build a rejection from a non-success response body.
    ///
    /// Unrecognized shapes fold into `Message` carrying the raw (truncated)
    /// body rather than failing, keeping the login/register contract total.
    pub fn from_body(body: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(_) => return AuthRejection::Message(truncate_body(body)),
        };

        match value {
            serde_json::Value::String(message) => AuthRejection::Message(message),
            serde_json::Value::Array(items) => {
                AuthRejection::Message(join_values(&items))
            }
            serde_json::Value::Object(map) => {
                // `detail` and `non_field_errors` are single-message
                // conventions, not field errors
                if map.len() == 1 {
                    if let Some(serde_json::Value::String(detail)) = map.get("detail") {
                        return AuthRejection::Message(detail.clone());
                    }
                    if let Some(serde_json::Value::Array(items)) = map.get("non_field_errors") {
                        return AuthRejection::Message(join_values(items));
                    }
                }

                let mut fields = BTreeMap::new();
                for (key, val) in map {
                    let messages = match val {
                        serde_json::Value::String(s) => vec![s],
                        serde_json::Value::Array(items) => items
                            .into_iter()
                            .map(|item| match item {
                                serde_json::Value::String(s) => s,
                                other => other.to_string(),
                            })
                            .collect(),
                        other => vec![other.to_string()],
                    };
                    fields.insert(key, messages);
                }
                if fields.is_empty() {
                    AuthRejection::Message(truncate_body(body))
                } else {
                    AuthRejection::FieldErrors(fields)
                }
            }
            other => AuthRejection::Message(truncate_body(&other.to_string())),
        }
    }

    /// First human-readable message, for one-line display
    pub fn first_message(&self) -> String {
        match self {
            AuthRejection::FieldErrors(fields) => fields
                .iter()
                .next()
                .and_then(|(field, messages)| {
                    messages.first().map(|m| format!("{}: {}", field, m))
                })
                .unwrap_or_else(|| "Request rejected".to_string()),
            AuthRejection::Message(message) => message.clone(),
            AuthRejection::Network => "Network error - no response from server".to_string(),
        }
    }
}

impl fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_message())
    }
}

impl std::error::Error for AuthRejection {}

fn join_values(items: &[serde_json::Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
