use thiserror::Error;

/// Errors that can occur when reading or writing a local slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted payload was written by an unknown format revision.
    #[error("Unsupported persisted format version {found}")]
    UnsupportedFormat { found: u32 },

    /// The slot refused the operation (quota exhausted, storage disabled, ...).
    #[error("Slot unavailable: {0}")]
    Unavailable(String),
}

/// Result type for slot operations.
pub type Result<T> = std::result::Result<T, SlotError>;
