pub mod contact_service;
pub mod search_service;

use crate::external;
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// errors that stem from talking to the contact store
    #[error("External API error: {0}")]
    ExternalApi(#[from] external::Error),

    /// errors that stem from validation in core
    #[error("Validation Error: {0}")]
    Validation(#[from] contactbook_core::ValidationError),

    /// the store answered with a success status other than the one the operation expects
    #[error("unexpected status {actual}, expected {expected}")]
    UnexpectedStatus { expected: u16, actual: u16 },

    /// the requested entity doesn't exist in the store
    #[error("not found")]
    NotFound,
}
