//! DynamoDB backend implementation.
//!
//! Implements [`TableBackend`] from `discord_relay_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use discord_relay_core::storage::{
    AttributeMap, AttributeValue, QueryPage, Result, TableBackend,
};

use super::conversions::{from_sdk_item, to_sdk_item, to_sdk_value};
use super::error::{map_put_item_error, map_query_error};
use crate::config::Config;

/// DynamoDB-based table backend.
///
/// Issues unconditional `PutItem` writes and key-condition `Query` reads.
/// Read consistency is a backend setting; it defaults to eventually consistent.
#[derive(Debug, Clone)]
pub struct DynamoDbBackend {
    client: Client,
    consistent_read: bool,
    page_size: Option<i32>,
}

impl DynamoDbBackend {
    /// Creates a backend with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            consistent_read: false,
            page_size: None,
        }
    }

    /// Creates a backend from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region and,
    /// when set, a custom endpoint (local DynamoDB).
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        Self::new(Client::new(&sdk_config))
            .with_consistent_read(config.consistent_read)
            .with_page_size(config.query_page_size)
    }

    /// Requests strongly consistent reads for queries.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    /// Caps the number of items per query request. Pages are still aggregated.
    pub fn with_page_size(mut self, page_size: Option<i32>) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl TableBackend for DynamoDbBackend {
    async fn put_item(&self, table_name: &str, item: AttributeMap) -> Result<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(to_sdk_item(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table_name))?;

        Ok(())
    }

    async fn query_page(
        &self,
        table_name: &str,
        partition_key: &str,
        value: &AttributeValue,
        exclusive_start_key: Option<AttributeMap>,
    ) -> Result<QueryPage> {
        let result = self
            .client
            .query()
            .table_name(table_name)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", partition_key)
            .expression_attribute_values(":pk", to_sdk_value(value.clone()))
            .consistent_read(self.consistent_read)
            .set_limit(self.page_size)
            .set_exclusive_start_key(exclusive_start_key.map(to_sdk_item))
            .send()
            .await
            .map_err(|e| map_query_error(e, table_name))?;

        let items = result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(from_sdk_item)
            .collect::<Result<Vec<_>>>()?;
        let last_evaluated_key = result.last_evaluated_key.map(from_sdk_item).transpose()?;

        Ok(QueryPage {
            items,
            last_evaluated_key,
        })
    }
}
