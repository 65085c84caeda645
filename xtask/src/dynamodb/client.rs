//! AWS SDK client setup (Imperative Shell).

use super::error::{DynamodbError, Result};
use super::planning::{KeyState, TableState, TableStatus};
use aws_sdk_dynamodb::types::{KeyType, ScalarAttributeType};
use aws_sdk_dynamodb::Client;

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        let config = discord_relay::Config::from_env();
        Self {
            endpoint_url: config.aws_endpoint_url,
            region: config.aws_region,
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Result<Client> {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Ok(Client::new(&sdk_config))
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err) => {
            let not_found = err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception());
            if not_found {
                return Ok(None);
            }
            return Err(DynamodbError::AwsSdk(err.to_string()));
        }
    };

    let table = response
        .table()
        .ok_or_else(|| DynamodbError::AwsSdk("DescribeTable returned no table".to_string()))?;

    let attribute_type = |name: &str| {
        table
            .attribute_definitions()
            .iter()
            .find(|def| def.attribute_name() == name)
            .map(|def| match def.attribute_type() {
                ScalarAttributeType::S => "S".to_string(),
                ScalarAttributeType::N => "N".to_string(),
                ScalarAttributeType::B => "B".to_string(),
                other => other.as_str().to_string(),
            })
            .unwrap_or_default()
    };

    let mut partition_key = None;
    let mut sort_key = None;
    for element in table.key_schema() {
        let key = KeyState::new(
            element.attribute_name(),
            attribute_type(element.attribute_name()),
        );
        match element.key_type() {
            KeyType::Hash => partition_key = Some(key),
            KeyType::Range => sort_key = Some(key),
            _ => {}
        }
    }

    let status = match table.table_status() {
        Some(aws_sdk_dynamodb::types::TableStatus::Active) => TableStatus::Active,
        Some(aws_sdk_dynamodb::types::TableStatus::Creating) => TableStatus::Creating,
        Some(aws_sdk_dynamodb::types::TableStatus::Updating) => TableStatus::Updating,
        Some(aws_sdk_dynamodb::types::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    Ok(Some(TableState {
        status,
        partition_key,
        sort_key,
    }))
}
