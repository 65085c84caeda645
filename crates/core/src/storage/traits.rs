use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::message::{MessageRecord, NewMessage, RelayToken};

use super::attribute::{AttributeMap, AttributeValue};
use super::Result;

/// One page of a partition query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    pub items: Vec<AttributeMap>,
    /// Key to resume from; `None` once the partition is exhausted.
    pub last_evaluated_key: Option<AttributeMap>,
}

/// The wide-column store capability: point writes and partition queries.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Writes an item unconditionally. An item with the same key is replaced.
    async fn put_item(&self, table_name: &str, item: AttributeMap) -> Result<()>;

    /// Reads one page of items whose partition key equals `value`,
    /// in the store's native sort-key order.
    async fn query_page(
        &self,
        table_name: &str,
        partition_key: &str,
        value: &AttributeValue,
        exclusive_start_key: Option<AttributeMap>,
    ) -> Result<QueryPage>;
}

#[async_trait]
impl<B> TableBackend for Arc<B>
where
    B: TableBackend + ?Sized,
{
    async fn put_item(&self, table_name: &str, item: AttributeMap) -> Result<()> {
        (**self).put_item(table_name, item).await
    }

    async fn query_page(
        &self,
        table_name: &str,
        partition_key: &str,
        value: &AttributeValue,
        exclusive_start_key: Option<AttributeMap>,
    ) -> Result<QueryPage> {
        (**self)
            .query_page(table_name, partition_key, value, exclusive_start_key)
            .await
    }
}

/// Repository for relayed message records.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persists a new record for `token` and returns its generated message ID.
    async fn persist_message(&self, token: &RelayToken, message: &NewMessage) -> Result<Uuid>;

    /// Gets every record stored for a token, in store order.
    ///
    /// An unknown token yields an empty list.
    async fn get_messages_for_token(&self, token_id: &str) -> Result<Vec<MessageRecord>>;
}
