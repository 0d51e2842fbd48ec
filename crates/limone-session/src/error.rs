//! Error types for the limone-session crate.

use thiserror::Error;

use limone_store::StoreError;

/// Alias for `Result<T, SessionError>`.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur in the session layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The underlying key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Onboarding input was rejected. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected onboarding input, naming the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter your name")]
    NameRequired,

    #[error("please enter your email")]
    EmailRequired,

    #[error("please enter a valid email address")]
    EmailInvalid,
}

impl ValidationError {
    /// The form field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::EmailRequired | Self::EmailInvalid => "email",
        }
    }
}
