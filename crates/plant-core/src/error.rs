//! Error Types
//!
//! Every failure in this crate is recoverable. Validation errors are shown to
//! the user, the rest are logged and degrade to empty data.

use thiserror::Error;

/// Common result type for core operations
pub type PlantResult<T> = Result<T, PlantError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlantError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("catalog unavailable: {0}")]
    Catalog(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for PlantError {
    fn from(err: serde_json::Error) -> Self {
        PlantError::Parse(err.to_string())
    }
}

/// User-facing input problems. No state changes when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Draw at least 3 points to form an area (currently {got})")]
    TooFewVertices { got: usize },
    #[error("Select a plant species first")]
    NoSpeciesSelected,
    #[error("Enter a name for the new species")]
    EmptySpeciesName,
    #[error("Finish or cancel the current action first")]
    Busy,
    #[error("Start placing a point or drawing an area first")]
    NotInMode,
    #[error("No local plant records to submit")]
    NothingToSubmit,
}

/// Key-value persistence failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}
