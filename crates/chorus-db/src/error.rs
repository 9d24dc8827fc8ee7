/// Errors surfaced by the snapshot store, notification log and settings.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected before touching storage (e.g. empty content).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced post does not exist in the latest snapshot.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The durable write or read could not complete; state is unchanged.
    #[error("Persistence error: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Persistence(e.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Persistence(e.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
