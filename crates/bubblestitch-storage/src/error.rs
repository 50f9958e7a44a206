//! Error types for the storage crate.

use std::io;

use bubblestitch_core::PatternError;
use thiserror::Error;

/// Errors that can occur while reading or writing patterns.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The pattern id cannot be used as a storage key.
    #[error("Invalid pattern id: {0:?}")]
    InvalidId(String),

    /// A stored pattern decoded but is structurally broken.
    #[error("Invalid stored pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InvalidId("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid pattern id: \"../etc\"");

        let err = StorageError::from(PatternError::RowCount { expected: 27, actual: 3 });
        assert!(err.to_string().starts_with("Invalid stored pattern:"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io_err.into();
        assert!(matches!(err, StorageError::IoError(_)));

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(err, StorageError::SerializationError(_)));
    }
}
