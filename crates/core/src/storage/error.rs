use thiserror::Error;

use crate::message::MessageError;

/// Errors that can occur during message store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The caller supplied an empty or malformed required field.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The backend request failed, timed out, or was throttled.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// A stored item is missing a required attribute or has one of the wrong type.
    #[error("Record corrupt: {0}")]
    RecordCorrupt(String),
}

impl StorageError {
    /// Whether a caller could reasonably retry the failed operation.
    ///
    /// The store itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::StoreUnavailable(_))
    }
}

impl From<MessageError> for StorageError {
    fn from(err: MessageError) -> Self {
        StorageError::InvalidArgument(err.to_string())
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_invalid_argument_display() {
        let error = StorageError::InvalidArgument("Author ID cannot be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid argument: Author ID cannot be empty"
        );
    }

    #[test]
    fn test_storage_error_store_unavailable_display() {
        let error = StorageError::StoreUnavailable("Throughput exceeded, please retry".to_string());
        assert_eq!(
            error.to_string(),
            "Store unavailable: Throughput exceeded, please retry"
        );
    }

    #[test]
    fn test_storage_error_record_corrupt_display() {
        let error = StorageError::RecordCorrupt("Missing or invalid field: authorId".to_string());
        assert_eq!(
            error.to_string(),
            "Record corrupt: Missing or invalid field: authorId"
        );
    }

    #[test]
    fn test_from_message_error() {
        let error: StorageError = MessageError::EmptyTokenId.into();
        assert_eq!(
            error,
            StorageError::InvalidArgument("Token ID cannot be empty".to_string())
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(StorageError::StoreUnavailable("timeout".to_string()).is_retryable());
        assert!(!StorageError::RecordCorrupt("bad".to_string()).is_retryable());
        assert!(!StorageError::InvalidArgument("bad".to_string()).is_retryable());
    }
}
