//! Message store: the record-oriented facade over a table backend.

use async_trait::async_trait;
use tracing::{Instrument, Span};
use uuid::Uuid;

use discord_relay_core::message::{validate_new_message, MessageRecord, NewMessage, RelayToken};
use discord_relay_core::storage::{
    AttributeValue, MessageCodec, MessageRepository, Result, StorageError, TableBackend,
    TableSchema,
};

use crate::table::KeyValueTable;

/// Persists and retrieves relayed message records.
///
/// Holds no mutable state: every call is one independent backend request, so
/// a store can be shared freely between tasks. Each record gets a fresh v4 UUID
/// as its sort key, so writes never collide. Failures are returned as-is; there
/// are no retries.
///
/// Log events are emitted inside the span given at construction.
pub struct MessageStore<B> {
    table: KeyValueTable<B, MessageCodec>,
    span: Span,
}

impl<B: TableBackend> MessageStore<B> {
    /// Creates a store over `backend` using the given messages table schema.
    pub fn new(backend: B, schema: TableSchema) -> Self {
        let span = tracing::info_span!("message_store", table = %schema.table_name);
        Self {
            table: KeyValueTable::new(backend, schema),
            span,
        }
    }

    /// Replaces the span the store logs under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        self.table.table_name()
    }

    async fn persist(&self, token: &RelayToken, message: &NewMessage) -> Result<Uuid> {
        validate_new_message(token, message)?;

        let message_id = Uuid::new_v4();
        let record = MessageRecord::from_new(token, message_id, message);

        if let Err(err) = self.table.put(&record).await {
            tracing::warn!(token_id = %record.token_id, error = %err, "Failed to persist message");
            return Err(err);
        }

        tracing::info!(
            token_id = %record.token_id,
            message_id = %message_id,
            message_type = %record.message_type,
            "Persisted message"
        );
        Ok(message_id)
    }

    async fn load(&self, token_id: &str) -> Result<Vec<MessageRecord>> {
        if token_id.is_empty() {
            return Err(StorageError::InvalidArgument(
                "Token ID cannot be empty".to_string(),
            ));
        }

        let records = self
            .table
            .query_partition(AttributeValue::S(token_id.to_string()))
            .await
            .inspect_err(|err| {
                tracing::warn!(token_id, error = %err, "Failed to load messages");
            })?;

        tracing::debug!(token_id, count = records.len(), "Loaded messages");
        Ok(records)
    }
}

#[async_trait]
impl<B: TableBackend> MessageRepository for MessageStore<B> {
    async fn persist_message(&self, token: &RelayToken, message: &NewMessage) -> Result<Uuid> {
        self.persist(token, message)
            .instrument(self.span.clone())
            .await
    }

    async fn get_messages_for_token(&self, token_id: &str) -> Result<Vec<MessageRecord>> {
        self.load(token_id).instrument(self.span.clone()).await
    }
}
