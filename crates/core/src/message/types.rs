use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction or kind of a relayed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// A message received from the chat system.
    Incoming,
    /// A message sent by the relay into the chat system.
    Outgoing,
    /// A non-message event (ban, join, reaction, ...).
    Event,
}

impl MessageType {
    /// Returns the stored representation of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Incoming => "INCOMING",
            MessageType::Outgoing => "OUTGOING",
            MessageType::Event => "EVENT",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The relay token a stream of messages is scoped to.
///
/// Issued and validated elsewhere; only the identifier matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayToken {
    pub token_id: String,
}

impl RelayToken {
    pub fn new(token_id: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
        }
    }
}

/// Caller input for persisting a message.
///
/// The message id is never part of the input; it is generated at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub author_id: String,
    pub author_username: String,
    /// Creation time in the chat system, epoch milliseconds.
    pub timestamp: i64,
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

impl NewMessage {
    /// Creates a message of any type without optional fields.
    pub fn new(
        author_id: impl Into<String>,
        author_username: impl Into<String>,
        timestamp: i64,
        message_type: MessageType,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            author_username: author_username.into(),
            timestamp,
            message_type,
            channel_id: None,
            event_name: None,
        }
    }

    /// Creates an incoming message posted to a channel.
    pub fn incoming(
        author_id: impl Into<String>,
        author_username: impl Into<String>,
        timestamp: i64,
        channel_id: impl Into<String>,
    ) -> Self {
        Self::new(author_id, author_username, timestamp, MessageType::Incoming)
            .with_channel(channel_id)
    }

    /// Creates an outgoing message relayed to a channel.
    pub fn outgoing(
        author_id: impl Into<String>,
        author_username: impl Into<String>,
        timestamp: i64,
        channel_id: impl Into<String>,
    ) -> Self {
        Self::new(author_id, author_username, timestamp, MessageType::Outgoing)
            .with_channel(channel_id)
    }

    /// Creates an event record. Attach a channel with [`NewMessage::with_channel`]
    /// when the event has channel context.
    pub fn event(
        author_id: impl Into<String>,
        author_username: impl Into<String>,
        timestamp: i64,
        event_name: impl Into<String>,
    ) -> Self {
        Self::new(author_id, author_username, timestamp, MessageType::Event)
            .with_event_name(event_name)
    }

    /// Sets the channel the message belongs to.
    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    /// Sets the event name.
    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }
}

/// A persisted message record, keyed by `(token_id, message_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub token_id: String,
    pub message_id: Uuid,
    pub author_id: String,
    /// Username at capture time; not kept in sync with later renames.
    pub author_username: String,
    pub timestamp: i64,
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

impl MessageRecord {
    /// Builds the record that will be stored for `message`.
    ///
    /// Empty optional values collapse to `None` so they are never stored.
    pub fn from_new(token: &RelayToken, message_id: Uuid, message: &NewMessage) -> Self {
        Self {
            token_id: token.token_id.clone(),
            message_id,
            author_id: message.author_id.clone(),
            author_username: message.author_username.clone(),
            timestamp: message.timestamp,
            message_type: message.message_type,
            channel_id: non_empty(message.channel_id.as_deref()),
            event_name: non_empty(message.event_name.as_deref()),
        }
    }

    /// Returns the timestamp as a UTC datetime, if it is in range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_wire_form() {
        assert_eq!(MessageType::Incoming.as_str(), "INCOMING");
        assert_eq!(MessageType::Outgoing.to_string(), "OUTGOING");
        assert_eq!(
            serde_json::to_string(&MessageType::Event).unwrap(),
            "\"EVENT\""
        );
    }

    #[test]
    fn test_builders_set_optional_fields() {
        let incoming = NewMessage::incoming("U1", "alice", 1000, "C1");
        assert_eq!(incoming.message_type, MessageType::Incoming);
        assert_eq!(incoming.channel_id.as_deref(), Some("C1"));
        assert!(incoming.event_name.is_none());

        let event = NewMessage::event("U1", "alice", 1000, "ban");
        assert_eq!(event.message_type, MessageType::Event);
        assert_eq!(event.event_name.as_deref(), Some("ban"));
        assert!(event.channel_id.is_none());

        let event = event.with_channel("C9");
        assert_eq!(event.channel_id.as_deref(), Some("C9"));
    }

    #[test]
    fn test_from_new_drops_empty_optionals() {
        let token = RelayToken::new("T1");
        let id = Uuid::new_v4();
        let message = NewMessage::outgoing("U1", "alice", 1000, "").with_event_name("");

        let record = MessageRecord::from_new(&token, id, &message);

        assert_eq!(record.token_id, "T1");
        assert_eq!(record.message_id, id);
        assert!(record.channel_id.is_none());
        assert!(record.event_name.is_none());
    }

    #[test]
    fn test_created_at() {
        let token = RelayToken::new("T1");
        let message = NewMessage::incoming("U1", "alice", 1_700_000_000_000, "C1");
        let record = MessageRecord::from_new(&token, Uuid::new_v4(), &message);

        assert_eq!(
            record.created_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_record_json_omits_absent_optionals() {
        let token = RelayToken::new("T2");
        let message = NewMessage::event("U1", "alice", 1000, "ban");
        let record = MessageRecord::from_new(&token, Uuid::nil(), &message);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tokenId"], "T2");
        assert_eq!(json["messageType"], "EVENT");
        assert_eq!(json["eventName"], "ban");
        assert!(json.get("channelId").is_none());
    }
}
