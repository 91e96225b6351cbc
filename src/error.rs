use reqwest::StatusCode;
use serde_json::Value;

/// Failure of a single call against the articles API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized (401){}", fmt_server_message(.message))]
    Unauthorized { message: Option<String> },

    #[error("HTTP {status}{}", fmt_server_message(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Builds the error for a non-success response, keeping the `message` field of a JSON body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty());
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Transport(_) => None,
        }
    }
}

fn fmt_server_message(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default()
}
