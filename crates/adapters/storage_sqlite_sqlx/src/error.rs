//! Storage-specific error type wrapping sqlx errors.

use wirelessmesh_domain::error::MeshError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to encode or decode a stored event payload.
    #[error("event payload error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A sequence number does not fit the column type.
    #[error("sequence {0} out of range")]
    SequenceOutOfRange(u64),
}

impl From<StorageError> for MeshError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
