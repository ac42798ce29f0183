use thiserror::Error;

pub mod contact;
pub mod filter;
pub mod group;
mod id;
#[cfg(test)]
mod tests;

pub use contact::{Contact, ContactDetails, ContactValues};
pub use group::Group;
pub use id::{ContactId, GroupId};

/// This is needed, so we can have our services be used both in a single threaded (wasm32) and in a
/// multi-threaded (e.g. native test runner) environment without issues.
#[cfg(not(target_arch = "wasm32"))]
pub trait ServiceTraitBounds: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait ServiceTraitBounds {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Photo,
    Mobile,
    Email,
    Job,
    Group,
}

/// Generic validation error type
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    /// error returned if a field that is not allowed to be empty is empty
    #[error("Field {0:?} can't be empty")]
    FieldEmpty(Field),

    /// error returned if a field has a value that is not allowed
    #[error("Field {0:?} is invalid")]
    FieldInvalid(Field),

    /// error returned if an identifier can't be parsed
    #[error("invalid id")]
    InvalidId,
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    match value {
        None => false,
        Some(v) => v.trim().is_empty(),
    }
}
