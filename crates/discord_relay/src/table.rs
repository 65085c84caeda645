//! Generic typed table over a [`TableBackend`].
//!
//! Composes a backend, a key schema and a record codec. Record-specific stores
//! hold one of these instead of talking to the backend directly.

use std::marker::PhantomData;

use discord_relay_core::storage::{
    AttributeMap, AttributeValue, RecordCodec, Result, StorageError, TableBackend, TableSchema,
};

/// A table whose items are encoded and decoded by `C`.
pub struct KeyValueTable<B, C> {
    backend: B,
    schema: TableSchema,
    codec: PhantomData<fn() -> C>,
}

impl<B, C> KeyValueTable<B, C>
where
    B: TableBackend,
    C: RecordCodec,
{
    /// Creates a table bound to `schema` on `backend`.
    pub fn new(backend: B, schema: TableSchema) -> Self {
        Self {
            backend,
            schema,
            codec: PhantomData,
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.schema.table_name
    }

    /// Encodes `record` and writes it with a single put.
    pub async fn put(&self, record: &C::Record) -> Result<()> {
        let item = C::encode(record);
        self.check_key_attributes(&item)?;

        self.backend.put_item(&self.schema.table_name, item).await?;

        tracing::debug!(table = %self.schema.table_name, entity = C::ENTITY, "Put item");
        Ok(())
    }

    /// Returns every record in the partition `value`, in store order.
    ///
    /// Follows pagination until the partition is exhausted; callers never see
    /// a partial result. Any undecodable item fails the whole call.
    pub async fn query_partition(&self, value: AttributeValue) -> Result<Vec<C::Record>> {
        let partition_key = &self.schema.partition_key.name;
        let mut items: Vec<AttributeMap> = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .backend
                .query_page(&self.schema.table_name, partition_key, &value, start_key)
                .await?;
            pages += 1;
            items.extend(page.items);

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        tracing::debug!(
            table = %self.schema.table_name,
            entity = C::ENTITY,
            items = items.len(),
            pages,
            "Queried partition"
        );

        items.iter().map(C::decode).collect()
    }

    fn check_key_attributes(&self, item: &AttributeMap) -> Result<()> {
        let keys = std::iter::once(&self.schema.partition_key).chain(self.schema.sort_key.iter());
        for key in keys {
            match item.get(&key.name) {
                Some(value) if value.type_tag() == key.attribute_type.tag() => {}
                _ => {
                    return Err(StorageError::InvalidArgument(format!(
                        "{} item is missing key attribute {} ({})",
                        C::ENTITY,
                        key.name,
                        key.attribute_type.tag()
                    )))
                }
            }
        }
        Ok(())
    }
}
