//! Error types shared across the workspace.
//!
//! Commands fail with a [`Rejection`] before anything is recorded. The
//! display text of every rejection is the reason string returned to the
//! caller, so it is part of the external contract.
//!
//! [`MeshError`] is the workspace-wide error: it wraps rejections and the
//! failures of the IO boundaries (storage, publisher, physical devices).
//! Each adapter defines its own typed error and converts into `MeshError`
//! via `From`.

/// A command argument failed format validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Customer location id must be alphanumeric")]
    LocationIdNotAlphanumeric,

    #[error("Access token must be alphanumeric")]
    AccessTokenNotAlphanumeric,
}

/// A command targets something that is not part of the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("customerLocation does not exist.")]
    Location,

    #[error("device {device_id} does not exist.")]
    Device { device_id: String },
}

/// Why the aggregate refused a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("customerLocation already exists.")]
    AlreadyExists,
}

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// The aggregate rejected the command; nothing was recorded.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Another writer appended to the stream after it was loaded.
    #[error("event stream {location_id} is past sequence {expected}")]
    Conflict { location_id: String, expected: u64 },

    #[error("storage error")]
    Storage(#[source] BoxError),

    /// A publisher or device-control call failed.
    #[error("integration error")]
    Integration(#[source] BoxError),
}

impl From<ValidationError> for MeshError {
    fn from(err: ValidationError) -> Self {
        Self::Rejected(err.into())
    }
}

impl From<NotFoundError> for MeshError {
    fn from(err: NotFoundError) -> Self {
        Self::Rejected(err.into())
    }
}

impl MeshError {
    /// The rejection behind this error, if the aggregate refused the command.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
