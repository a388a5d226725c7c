//! Error types for the Ghost SDK.

use serde::{Deserialize, Serialize};

/// Result type for SDK operations.
pub type GhostResult<T> = Result<T, GhostError>;

/// Error types that can occur when talking to the Ghost Admin API.
///
/// Everything downstream of a well-formed credential collapses into
/// [`GhostError::Api`]; callers render the message and move on.
#[derive(Debug, thiserror::Error)]
pub enum GhostError {
    /// The admin API key is not `id:hex_secret`.
    #[error("Invalid admin API key: {0}")]
    InvalidCredentialFormat(String),

    /// Transport failure, non-2xx status or undecodable response body.
    #[error("{0}")]
    Api(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl GhostError {
    /// Build an [`GhostError::Api`] for a non-success HTTP status.
    ///
    /// Ghost reports failures as `{"errors": [{"message": .., "context": ..}]}`;
    /// when the body has that shape the first error's message and context are
    /// quoted, otherwise the raw body is.
    pub fn from_response(method: &str, url: &str, status: u16, body: &str) -> Self {
        let reason = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) if !response.errors.is_empty() => {
                let first = &response.errors[0];
                match &first.context {
                    Some(context) if !context.is_empty() => {
                        format!("{} ({})", first.message, context)
                    }
                    _ => first.message.clone(),
                }
            }
            _ => body.trim().to_string(),
        };

        let mut message = format!(
            "HTTP error accessing Ghost API: {} {} returned status {}",
            method, url, status
        );
        if !reason.is_empty() {
            message.push_str(": ");
            message.push_str(&reason);
        }
        Self::Api(message)
    }

    /// Build an [`GhostError::Api`] for a request that never produced a response.
    pub fn transport(method: &str, url: &str, err: &reqwest::Error) -> Self {
        Self::Api(format!(
            "HTTP error accessing Ghost API: {} {} failed: {}",
            method, url, err
        ))
    }

    /// Build an [`GhostError::Api`] for a 2xx response whose body is not JSON.
    pub fn decode(method: &str, url: &str, err: impl std::fmt::Display) -> Self {
        Self::Api(format!(
            "Error accessing Ghost API: invalid JSON from {} {}: {}",
            method, url, err
        ))
    }

    /// Whether the caller has to fix configuration before trying again.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentialFormat(_) | Self::Config(_) | Self::InvalidUrl(_)
        )
    }
}

/// Error body returned by the Ghost Admin API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A single entry of [`ErrorResponse::errors`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
