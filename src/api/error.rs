//! API Error Types
//!
//! Failures of outbound calls and the single place where they are turned
//! into the text a user sees.

use thiserror::Error;

/// Shown when the server rejected a request without a usable `error` field
pub const GENERIC_SERVER_ERROR: &str = "Server error occurred";

/// Shown when a failure carries no description of its own
pub const GENERIC_UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Errors from calls to the SmartMeet API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or(GENERIC_SERVER_ERROR))]
    Server { status: u16, message: Option<String> },

    /// The request went out but no response came back
    #[error("No response from {base_url}: {source}")]
    Unreachable {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A success response did not match the expected schema
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Anything else (request could not be built, redirect loop, ...)
    #[error("{0}")]
    Request(#[source] reqwest::Error),
}

impl ApiError {
    /// Sort a transport error into "no response" or "something else"
    pub(crate) fn from_transport(base_url: &str, error: reqwest::Error) -> Self {
        let no_response =
            !error.is_builder() && (error.is_connect() || error.is_timeout() || error.is_request());

        if no_response {
            ApiError::Unreachable {
                base_url: base_url.to_string(),
                source: error,
            }
        } else {
            ApiError::Request(error)
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The message to display for this failure.
    ///
    /// A received error body is shown verbatim; a missing response names the
    /// backend origin.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string()),
            ApiError::Unreachable { base_url, .. } => format!(
                "Cannot connect to server. Please ensure the backend is running on {}",
                backend_origin(base_url)
            ),
            other => {
                let description = other.to_string();
                if description.trim().is_empty() {
                    GENERIC_UNEXPECTED_ERROR.to_string()
                } else {
                    description
                }
            }
        }
    }
}

/// Base address without its trailing `/api` segment
pub fn backend_origin(base_url: &str) -> &str {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed)
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
