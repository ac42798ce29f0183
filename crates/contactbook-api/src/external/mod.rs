pub mod contact_store;

use thiserror::Error;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// all errors originating from external API requests, e.g. connection or decoding failures
    #[error("External Request error: {0}")]
    Api(#[from] reqwest::Error),

    /// the store answered, but with a non-success status code
    #[error("External Store responded with status {0}")]
    Status(u16),

    /// all errors originating from building request urls
    #[error("External Store Invalid Url Error")]
    InvalidUrl,
}

impl Error {
    /// Returns the status code, if the store responded with one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(status) => Some(*status),
            Error::Api(e) => e.status().map(|s| s.as_u16()),
            Error::InvalidUrl => None,
        }
    }
}
