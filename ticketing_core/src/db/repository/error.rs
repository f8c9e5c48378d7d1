//! Error types for storage operations.

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for storage operations.
///
/// Every failure path of the store surfaces as one of these variants;
/// nothing is printed and nothing is retried. The issuance orchestrator
/// converts per-passenger failures into outcome values for the excluded
/// presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A ticket with the same artifact id already exists.
    #[error("duplicate artifact id: {0}")]
    DuplicateArtifact(String),

    /// A station with the same name already exists.
    #[error("station already exists: {0}")]
    DuplicateStation(String),

    /// A referenced station name is not in the registry.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The station is referenced by at least one issued ticket.
    #[error("station is referenced by issued tickets: {0}")]
    StationInUse(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying store could not be reached or failed mid-operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Invalid or missing storage configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
