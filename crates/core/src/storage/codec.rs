//! Bidirectional conversion between records and attribute maps.
//!
//! Pure functions, testable without a backend.

use crate::message::{MessageRecord, MessageType};

use super::attribute::{
    get_i64, get_optional_string, get_string, get_uuid, AttributeMap, AttributeValue,
};
use super::{Result, StorageError};

// ============================================================================
// Attribute names
// ============================================================================

pub const TOKEN_ID: &str = "tokenId";
pub const MESSAGE_ID: &str = "messageId";
pub const AUTHOR_ID: &str = "authorId";
pub const AUTHOR_USERNAME: &str = "authorUsername";
pub const TIMESTAMP: &str = "timestamp";
pub const MESSAGE_TYPE: &str = "messageType";
pub const CHANNEL_ID: &str = "channelId";
pub const EVENT_NAME: &str = "eventName";

/// Converts one record type to and from its stored attribute map.
pub trait RecordCodec: Send + Sync + 'static {
    type Record: Send + Sync;

    /// Entity name used in logs and error messages.
    const ENTITY: &'static str;

    /// Encode a record into an item.
    fn encode(record: &Self::Record) -> AttributeMap;

    /// Decode an item, failing with `RecordCorrupt` on missing or mistyped attributes.
    fn decode(item: &AttributeMap) -> Result<Self::Record>;
}

/// Codec for [`MessageRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCodec;

impl RecordCodec for MessageCodec {
    type Record = MessageRecord;

    const ENTITY: &'static str = "Message";

    fn encode(record: &MessageRecord) -> AttributeMap {
        let mut item = AttributeMap::new();

        // Keys
        item.insert(
            TOKEN_ID.to_string(),
            AttributeValue::S(record.token_id.clone()),
        );
        item.insert(
            MESSAGE_ID.to_string(),
            AttributeValue::S(record.message_id.to_string()),
        );

        // Data
        item.insert(
            AUTHOR_ID.to_string(),
            AttributeValue::S(record.author_id.clone()),
        );
        item.insert(
            AUTHOR_USERNAME.to_string(),
            AttributeValue::S(record.author_username.clone()),
        );
        item.insert(
            TIMESTAMP.to_string(),
            AttributeValue::number(record.timestamp),
        );
        item.insert(
            MESSAGE_TYPE.to_string(),
            AttributeValue::S(record.message_type.as_str().to_string()),
        );

        // Optional attributes are left out entirely rather than stored empty.
        if let Some(channel_id) = record.channel_id.as_deref().filter(|s| !s.is_empty()) {
            item.insert(
                CHANNEL_ID.to_string(),
                AttributeValue::S(channel_id.to_string()),
            );
        }
        if let Some(event_name) = record.event_name.as_deref().filter(|s| !s.is_empty()) {
            item.insert(
                EVENT_NAME.to_string(),
                AttributeValue::S(event_name.to_string()),
            );
        }

        item
    }

    fn decode(item: &AttributeMap) -> Result<MessageRecord> {
        Ok(MessageRecord {
            token_id: get_string(item, TOKEN_ID)?,
            message_id: get_uuid(item, MESSAGE_ID)?,
            author_id: get_string(item, AUTHOR_ID)?,
            author_username: get_string(item, AUTHOR_USERNAME)?,
            timestamp: get_i64(item, TIMESTAMP)?,
            message_type: parse_message_type(&get_string(item, MESSAGE_TYPE)?)?,
            channel_id: get_optional_string(item, CHANNEL_ID)?,
            event_name: get_optional_string(item, EVENT_NAME)?,
        })
    }
}

/// Parse a stored message type. Only the exact upper-case forms are accepted.
pub fn parse_message_type(s: &str) -> Result<MessageType> {
    match s {
        "INCOMING" => Ok(MessageType::Incoming),
        "OUTGOING" => Ok(MessageType::Outgoing),
        "EVENT" => Ok(MessageType::Event),
        _ => Err(StorageError::RecordCorrupt(format!(
            "Unknown message type: {}",
            s
        ))),
    }
}
