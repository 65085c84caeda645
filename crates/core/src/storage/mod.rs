mod attribute;
mod codec;
mod error;
mod schema;
mod traits;

pub use attribute::{
    get_i64, get_optional_string, get_string, get_uuid, AttributeMap, AttributeValue,
};
pub use codec::{parse_message_type, MessageCodec, RecordCodec};
pub use error::{Result, StorageError};
pub use schema::{
    messages_table_schema, AttributeType, KeyAttribute, TableSchema, MESSAGES_TABLE_NAME,
};
pub use traits::{MessageRepository, QueryPage, TableBackend};

/// Attribute names used by the messages table.
pub mod attributes {
    pub use super::codec::{
        AUTHOR_ID, AUTHOR_USERNAME, CHANNEL_ID, EVENT_NAME, MESSAGE_ID, MESSAGE_TYPE, TIMESTAMP,
        TOKEN_ID,
    };
}
