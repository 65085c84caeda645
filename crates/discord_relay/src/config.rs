use std::env;

use discord_relay_core::storage::{messages_table_schema, TableSchema, MESSAGES_TABLE_NAME};

/// Message store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Messages table name (default: "DiscordRelay.Messages")
    pub table_name: String,
    /// AWS region (default: "us-east-1")
    pub aws_region: String,
    /// Custom endpoint, e.g. a local DynamoDB (default: none)
    pub aws_endpoint_url: Option<String>,
    /// Use strongly consistent reads for queries (default: false)
    pub consistent_read: bool,
    /// Maximum items per query request (default: none, store decides)
    pub query_page_size: Option<i32>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MESSAGES_TABLE_NAME` - Messages table name (default: "DiscordRelay.Messages")
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint URL (default: unset)
    /// - `DYNAMODB_CONSISTENT_READ` - "true"/"1" for consistent reads (default: false)
    /// - `QUERY_PAGE_SIZE` - Items per query request (default: unset)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("MESSAGES_TABLE_NAME")
                .unwrap_or_else(|_| MESSAGES_TABLE_NAME.to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            consistent_read: env::var("DYNAMODB_CONSISTENT_READ")
                .ok()
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            query_page_size: env::var("QUERY_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &i32| *n > 0),
        }
    }

    /// Get the messages table schema with the configured table name.
    pub fn messages_schema(&self) -> TableSchema {
        messages_table_schema().with_table_name(&self.table_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_schema_uses_table_name() {
        let config = Config {
            table_name: "relay-dev".to_string(),
            aws_region: "us-east-1".to_string(),
            aws_endpoint_url: None,
            consistent_read: false,
            query_page_size: None,
        };

        let schema = config.messages_schema();
        assert_eq!(schema.table_name, "relay-dev");
        assert_eq!(schema.partition_key.name, "tokenId");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool(" yes "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("MESSAGES_TABLE_NAME");
        env::remove_var("AWS_REGION");
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("DYNAMODB_CONSISTENT_READ");
        env::remove_var("QUERY_PAGE_SIZE");

        let config = Config::from_env();

        assert_eq!(config.table_name, "DiscordRelay.Messages");
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.aws_endpoint_url, None);
        assert!(!config.consistent_read);
        assert_eq!(config.query_page_size, None);
    }
}
