use thiserror::Error;

/// Errors that can occur when validating a message before it is stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("Token ID cannot be empty")]
    EmptyTokenId,
    #[error("Author ID cannot be empty")]
    EmptyAuthorId,
    #[error("Author username cannot be empty")]
    EmptyAuthorUsername,
    #[error("Timestamp cannot be negative: {0}")]
    NegativeTimestamp(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_error_display() {
        assert_eq!(
            MessageError::EmptyAuthorId.to_string(),
            "Author ID cannot be empty"
        );
        assert_eq!(
            MessageError::NegativeTimestamp(-5).to_string(),
            "Timestamp cannot be negative: -5"
        );
    }
}
