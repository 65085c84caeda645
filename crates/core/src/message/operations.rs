//! Pure validation for messages on the write path.

use super::error::MessageError;
use super::types::{NewMessage, RelayToken};

/// Validates the required fields of a message before it is persisted.
///
/// Optional fields are never rejected; empty values are simply not stored.
pub fn validate_new_message(token: &RelayToken, message: &NewMessage) -> Result<(), MessageError> {
    if token.token_id.is_empty() {
        return Err(MessageError::EmptyTokenId);
    }
    if message.author_id.is_empty() {
        return Err(MessageError::EmptyAuthorId);
    }
    if message.author_username.is_empty() {
        return Err(MessageError::EmptyAuthorUsername);
    }
    if message.timestamp < 0 {
        return Err(MessageError::NegativeTimestamp(message.timestamp));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> RelayToken {
        RelayToken::new("T1")
    }

    #[test]
    fn test_validate_success() {
        let message = NewMessage::incoming("U1", "alice", 1000, "C1");
        assert!(validate_new_message(&token(), &message).is_ok());
    }

    #[test]
    fn test_validate_zero_timestamp_is_allowed() {
        let message = NewMessage::event("U1", "alice", 0, "join");
        assert!(validate_new_message(&token(), &message).is_ok());
    }

    #[test]
    fn test_validate_empty_token() {
        let message = NewMessage::incoming("U1", "alice", 1000, "C1");
        assert_eq!(
            validate_new_message(&RelayToken::new(""), &message),
            Err(MessageError::EmptyTokenId)
        );
    }

    #[test]
    fn test_validate_whitespace_ids_are_not_empty() {
        let message = NewMessage::incoming(" ", "  ", 1000, "C1");
        assert!(validate_new_message(&RelayToken::new(" "), &message).is_ok());
    }

    #[test]
    fn test_validate_empty_author() {
        let message = NewMessage::incoming("", "alice", 1000, "C1");
        assert_eq!(
            validate_new_message(&token(), &message),
            Err(MessageError::EmptyAuthorId)
        );

        let message = NewMessage::incoming("U1", "", 1000, "C1");
        assert_eq!(
            validate_new_message(&token(), &message),
            Err(MessageError::EmptyAuthorUsername)
        );
    }

    #[test]
    fn test_validate_negative_timestamp() {
        let message = NewMessage::outgoing("U1", "alice", -1, "C1");
        assert_eq!(
            validate_new_message(&token(), &message),
            Err(MessageError::NegativeTimestamp(-1))
        );
    }

    #[test]
    fn test_validate_ignores_missing_optionals() {
        let message = NewMessage::new("U1", "alice", 1000, crate::message::MessageType::Event);
        assert!(validate_new_message(&token(), &message).is_ok());
    }
}
