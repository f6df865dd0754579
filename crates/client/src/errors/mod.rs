//! Client error types

use admission_common::errors::{ErrorCode, ErrorResponse};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything a client call can fail with
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid server URL: {message}")]
    InvalidUrl { message: String },

    /// Non-2xx answer; `code` is present when the body was a structured error
    #[error("Server returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Identity provider error: {message}")]
    Identity { message: String },
}

impl ClientError {
    /// Build an `Api` error from a status and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => Self::Api {
                status,
                code: Some(parsed.error.code),
                message: parsed.error.message,
            },
            Err(_) => Self::Api {
                status,
                code: None,
                message: if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.to_string()
                },
            },
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status for `Api` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
