//! Core error types

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by core components
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Page size must be at least one item
    #[error("Invalid page size {0}: page size must be greater than 0")]
    InvalidPageSize(usize),
}
