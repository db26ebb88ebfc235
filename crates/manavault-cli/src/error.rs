// CLI error reporting

use manavault_api::ApiError;
use manavault_config::ConfigError;
use manavault_core::CoreError;
use manavault_http::HttpError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Session storage error: {0}")]
    Session(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'manavault --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(e) => {
                format!(
                    "{}\n\nCheck your configuration file or MANAVAULT__* environment variables.",
                    e
                )
            }
            CliError::Api(e) if e.is_unauthorized() => {
                format!(
                    "{}\n\nYou are not logged in or your session expired. Run 'manavault login'.",
                    e
                )
            }
            CliError::Api(e) if e.is_not_found() => format!("Not found: {}", e),
            CliError::Api(ApiError::Http(e)) if e.is_retryable() => {
                format!("{}\n\nThe service may be unreachable. Try again later.", e)
            }
            CliError::Api(e) => e.to_string(),
            CliError::Http(e) => format!("Could not set up the HTTP client: {}", e),
            CliError::Core(e) => e.to_string(),
            CliError::Session(msg) => {
                format!(
                    "Session storage error: {}\n\nRun 'manavault logout' to reset it.",
                    msg
                )
            }
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_hint() {
        let err = CliError::from(ApiError::NotAuthenticated);
        assert!(err.user_message().contains("manavault login"));
    }

    #[test]
    fn test_invalid_argument_hint() {
        let err = CliError::InvalidArgument {
            message: "page must be a number".to_string(),
        };
        assert!(err.user_message().contains("--help"));
    }

    #[test]
    fn test_rejection_shows_detail() {
        let err = CliError::from(ApiError::Rejected {
            status: manavault_http::StatusCode::BAD_REQUEST,
            detail: "Email already registered".to_string(),
        });
        assert_eq!(err.user_message(), "Email already registered (HTTP 400 Bad Request)");
    }
}
