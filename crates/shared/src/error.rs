use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Shown when a failed response carries no usable `error`/`detail` text.
pub const GENERIC_SERVER_ERROR: &str = "Erro ao processar o email.";

/// Error body returned by the classification API on non-2xx statuses.
///
/// The backend reports its own failures under `error`; framework-level
/// failures (validation, missing route) arrive under `detail`, which is not
/// always a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(Value::String(message.into())),
            detail: None,
        }
    }

    pub fn with_detail(message: impl Into<String>) -> Self {
        Self {
            error: None,
            detail: Some(Value::String(message.into())),
        }
    }

    /// First non-empty string among `error` then `detail`.
    pub fn message(&self) -> Option<&str> {
        [&self.error, &self.detail]
            .into_iter()
            .find_map(|field| match field {
                Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
                _ => None,
            })
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServerRejection {
    pub status: u16,
    pub message: String,
}

impl ServerRejection {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds the rejection from a raw response body, falling back to
    /// [`GENERIC_SERVER_ERROR`] when the body is empty, not JSON, or carries
    /// no string message.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .as_ref()
            .and_then(ApiErrorBody::message)
            .unwrap_or(GENERIC_SERVER_ERROR)
            .to_string();
        Self::new(status, message)
    }
}

impl From<ServerRejection> for ApiErrorBody {
    fn from(value: ServerRejection) -> Self {
        Self::with_error(value.message)
    }
}
