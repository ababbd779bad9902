use crate::features::auth::forms::ValidationError;
use thiserror::Error;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// True when the backend answered 401, i.e. there is no session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401, .. })
    }

    /// True for failures that never reached the backend or never came back.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }

    /// Text shown inline in forms. Validation and server messages are passed
    /// through as-is; everything else uses the `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Http { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}

/// Extracts a user-facing message from an HTTP error body. The `message`
/// field of a JSON body (or a bare JSON string) is returned unchanged;
/// otherwise the trimmed raw text, truncated.
pub fn error_message_from_body(body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let message = value
            .as_str()
            .or_else(|| value.get("message").and_then(serde_json::Value::as_str))
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = message {
            return message.to_string();
        }
        if value.is_object() || value.is_array() || value.is_string() {
            return "Request failed.".to_string();
        }
    }

    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
