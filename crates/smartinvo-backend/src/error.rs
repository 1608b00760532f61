use thiserror::Error;

use crate::Operation;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure talking to the prediction service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{operation}: request failed: {message}")]
    Transport { operation: Operation, message: String },

    #[error("{operation}: service responded {status}: {message}")]
    Status {
        operation: Operation,
        status: u16,
        message: String,
    },

    #[error("{operation}: unexpected response body: {message}")]
    Decode { operation: Operation, message: String },

    #[error("invalid service URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("{operation}: no response available")]
    Unavailable { operation: Operation },
}

impl ServiceError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ServiceError::Transport { operation, .. }
            | ServiceError::Status { operation, .. }
            | ServiceError::Decode { operation, .. }
            | ServiceError::Unavailable { operation } => Some(*operation),
            ServiceError::InvalidBaseUrl(_) | ServiceError::Client(_) => None,
        }
    }

    /// The message to show a user, without the operation prefix
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Transport { message, .. }
            | ServiceError::Status { message, .. }
            | ServiceError::Decode { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Extract the human-readable message from an error response body.
///
/// The service reports failures as `{"detail": ...}`; `message` and `error`
/// keys are accepted too. Anything else is returned as raw text.
pub fn upstream_message(body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            match map.get(key) {
                Some(serde_json::Value::String(text)) => return text.clone(),
                Some(serde_json::Value::Null) | None => continue,
                Some(other) => return other.to_string(),
            }
        }
    }
    body.trim().to_string()
}
