//! Table schema description (pure data).

/// Default name of the messages table.
pub const MESSAGES_TABLE_NAME: &str = "DiscordRelay.Messages";

/// Key attribute types supported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
}

impl AttributeType {
    /// The storage type discriminator (`S` or `N`).
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
        }
    }
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::String,
        }
    }
}

/// Table key layout: one partition key and an optional sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl TableSchema {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the canonical schema of the messages table.
///
/// Partitioned by `tokenId`, sorted by `messageId`.
pub fn messages_table_schema() -> TableSchema {
    TableSchema {
        table_name: MESSAGES_TABLE_NAME.to_string(),
        partition_key: KeyAttribute::string("tokenId"),
        sort_key: Some(KeyAttribute::string("messageId")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_table_schema() {
        let schema = messages_table_schema();
        assert_eq!(schema.table_name, "DiscordRelay.Messages");
        assert_eq!(schema.partition_key.name, "tokenId");
        assert_eq!(schema.partition_key.attribute_type.tag(), "S");
        assert_eq!(schema.sort_key.unwrap().name, "messageId");
    }

    #[test]
    fn test_with_table_name() {
        let schema = messages_table_schema().with_table_name("relay-test");
        assert_eq!(schema.table_name, "relay-test");
        assert_eq!(schema.partition_key.name, "tokenId");
    }
}
