//! API error types

use manavault_http::{HttpError, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors from the card provider and backend clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure
    #[error(transparent)]
    Http(HttpError),

    /// The server rejected the request with an explanation
    #[error("{detail} (HTTP {status})")]
    Rejected { status: StatusCode, detail: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An authenticated call was attempted without a session token
    #[error("Not logged in")]
    NotAuthenticated,

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Endpoint URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// HTTP status of the failed call, if the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated)
            || self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::HttpStatus { status, message } => {
                match serde_json::from_str::<ErrorBody>(&message) {
                    Ok(body) => ApiError::Rejected {
                        status,
                        detail: match body.detail {
                            serde_json::Value::String(detail) => detail,
                            other => other.to_string(),
                        },
                    },
                    Err(_) => ApiError::Http(HttpError::HttpStatus { status, message }),
                }
            }
            other => ApiError::Http(other),
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}
