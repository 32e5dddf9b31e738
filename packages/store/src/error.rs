//! Error types shared by the remote boundary and the controllers.

use thiserror::Error;

use crate::forms::FieldErrors;

/// Failure reported by a [`crate::Remote`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
}

/// Why a controller operation did not complete.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("you need to sign in first")]
    NotSignedIn,
    #[error("only the owner can change this record")]
    NotOwner,
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The requesting view went away before the result could be applied.
    #[error("operation cancelled")]
    Cancelled,
}

impl SubmitError {
    /// Per-field messages when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
