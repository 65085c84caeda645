//! In-memory backend implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use discord_relay_core::storage::{
    AttributeMap, AttributeValue, QueryPage, Result, StorageError, TableBackend, TableSchema,
};

type ItemKey = (AttributeValue, Option<AttributeValue>);

#[derive(Debug)]
struct Table {
    schema: TableSchema,
    items: BTreeMap<ItemKey, AttributeMap>,
}

impl Table {
    fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            items: BTreeMap::new(),
        }
    }

    fn key_of(&self, item: &AttributeMap) -> Result<ItemKey> {
        let partition = key_value(item, &self.schema.partition_key.name)?;
        let sort = match &self.schema.sort_key {
            Some(sk) => Some(key_value(item, &sk.name)?),
            None => None,
        };
        Ok((partition, sort))
    }

    /// Only the key attributes of `item`, as the store returns for `LastEvaluatedKey`.
    fn key_attributes(&self, item: &AttributeMap) -> AttributeMap {
        std::iter::once(&self.schema.partition_key)
            .chain(self.schema.sort_key.iter())
            .filter_map(|key| {
                item.get(&key.name)
                    .map(|value| (key.name.clone(), value.clone()))
            })
            .collect()
    }
}

/// In-memory storage backend for testing.
///
/// Uses `Arc<RwLock<_>>` for thread-safe access; clones share the same data.
/// Data is not persisted and will be lost when the last clone is dropped.
/// Key values are ordered by their text, which matches the store for string keys.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    tables: Arc<RwLock<HashMap<String, Table>>>,
    page_size: Option<usize>,
}

impl InMemoryBackend {
    /// Creates a backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with the given tables already created.
    pub fn with_tables(schemas: impl IntoIterator<Item = TableSchema>) -> Self {
        let tables = schemas
            .into_iter()
            .map(|schema| (schema.table_name.clone(), Table::new(schema)))
            .collect();

        Self {
            tables: Arc::new(RwLock::new(tables)),
            page_size: None,
        }
    }

    /// Limits how many items a single query page returns, to exercise pagination.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Creates a table. Existing tables with the same name are left untouched.
    pub async fn create_table(&self, schema: TableSchema) {
        let mut tables = self.tables.write().await;
        tables
            .entry(schema.table_name.clone())
            .or_insert_with(|| Table::new(schema));
    }

    /// Returns every item of a table in key order.
    pub async fn items(&self, table_name: &str) -> Result<Vec<AttributeMap>> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| table_not_found(table_name))?;
        Ok(table.items.values().cloned().collect())
    }
}

#[async_trait]
impl TableBackend for InMemoryBackend {
    async fn put_item(&self, table_name: &str, item: AttributeMap) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(table_name))?;

        let key = table.key_of(&item)?;
        table.items.insert(key, item);
        Ok(())
    }

    async fn query_page(
        &self,
        table_name: &str,
        partition_key: &str,
        value: &AttributeValue,
        exclusive_start_key: Option<AttributeMap>,
    ) -> Result<QueryPage> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| table_not_found(table_name))?;

        if table.schema.partition_key.name != partition_key {
            return Err(StorageError::InvalidArgument(format!(
                "Query key {} is not the partition key of {}",
                partition_key, table_name
            )));
        }

        // `(value, None)` sorts before every sort key of the partition.
        let lower = match exclusive_start_key {
            Some(key) => Bound::Excluded(table.key_of(&key)?),
            None => Bound::Included((value.clone(), None)),
        };

        let mut items = Vec::new();
        let mut has_more = false;
        for (key, item) in table.items.range((lower, Bound::Unbounded)) {
            if &key.0 != value {
                break;
            }
            if self.page_size.is_some_and(|limit| items.len() == limit) {
                has_more = true;
                break;
            }
            items.push(item.clone());
        }

        let last_evaluated_key = if has_more {
            items.last().map(|item| table.key_attributes(item))
        } else {
            None
        };

        Ok(QueryPage {
            items,
            last_evaluated_key,
        })
    }
}

fn key_value(item: &AttributeMap, name: &str) -> Result<AttributeValue> {
    item.get(name)
        .cloned()
        .ok_or_else(|| StorageError::InvalidArgument(format!("Missing key attribute: {}", name)))
}

fn table_not_found(table_name: &str) -> StorageError {
    StorageError::StoreUnavailable(format!("Table not found: {}", table_name))
}
