//! Pure functions for calculating deployment plans (Functional Core).

use discord_relay_core::storage::{KeyAttribute, TableSchema};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub partition_key: Option<KeyState>,
    pub sort_key: Option<KeyState>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// A key attribute as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyState {
    pub name: String,
    /// Scalar type tag: "S", "N" or "B".
    pub attribute_type: String,
}

impl KeyState {
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
        }
    }
}

impl From<&KeyAttribute> for KeyState {
    fn from(key: &KeyAttribute) -> Self {
        Self::new(&key.name, key.attribute_type.tag())
    }
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { schema: TableSchema },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
    /// Table exists with different keys. Keys cannot be altered in place.
    KeySchemaMismatch {
        table_name: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableSchema) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            schema: desired.clone(),
        };
    };

    let expected_pk = KeyState::from(&desired.partition_key);
    let expected_sk = desired.sort_key.as_ref().map(KeyState::from);

    if state.partition_key.as_ref() == Some(&expected_pk) && state.sort_key == expected_sk {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::KeySchemaMismatch {
            table_name: desired.table_name.clone(),
            expected: describe_keys(Some(&expected_pk), expected_sk.as_ref()),
            actual: describe_keys(state.partition_key.as_ref(), state.sort_key.as_ref()),
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

fn describe_keys(partition_key: Option<&KeyState>, sort_key: Option<&KeyState>) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(pk) = partition_key {
        keys.push(format!("{} ({}, HASH)", pk.name, pk.attribute_type));
    }
    if let Some(sk) = sort_key {
        keys.push(format!("{} ({}, RANGE)", sk.name, sk.attribute_type));
    }
    keys
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { schema } => {
            let mut lines = vec![
                format!("+ Create table: {}", schema.table_name),
                format!(
                    "  Partition key: {} ({})",
                    schema.partition_key.name,
                    schema.partition_key.attribute_type.tag()
                ),
            ];
            if let Some(sk) = &schema.sort_key {
                lines.push(format!(
                    "  Sort key: {} ({})",
                    sk.name,
                    sk.attribute_type.tag()
                ));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
        DeployPlan::KeySchemaMismatch {
            table_name,
            expected,
            actual,
        } => {
            let mut lines = vec![format!("~ Table '{}' has a different key schema", table_name)];
            for key in expected {
                lines.push(format!("  expected: {}", key));
            }
            for key in actual {
                lines.push(format!("  actual:   {}", key));
            }
            lines.push("  Destroy and recreate the table to change its keys".to_string());
            lines
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discord_relay_core::storage::messages_table_schema;

    fn matching_state() -> TableState {
        TableState {
            status: TableStatus::Active,
            partition_key: Some(KeyState::new("tokenId", "S")),
            sort_key: Some(KeyState::new("messageId", "S")),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let schema = messages_table_schema();
        let plan = calculate_deploy_plan(None, &schema);

        assert_eq!(plan, DeployPlan::CreateTable { schema });
    }

    #[test]
    fn test_matching_table_needs_no_changes() {
        let plan = calculate_deploy_plan(Some(&matching_state()), &messages_table_schema());

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "DiscordRelay.Messages".to_string()
            }
        );
    }

    #[test]
    fn test_different_sort_key_is_a_mismatch() {
        let mut state = matching_state();
        state.sort_key = Some(KeyState::new("timestamp", "N"));

        let plan = calculate_deploy_plan(Some(&state), &messages_table_schema());

        assert_eq!(
            plan,
            DeployPlan::KeySchemaMismatch {
                table_name: "DiscordRelay.Messages".to_string(),
                expected: vec![
                    "tokenId (S, HASH)".to_string(),
                    "messageId (S, RANGE)".to_string()
                ],
                actual: vec![
                    "tokenId (S, HASH)".to_string(),
                    "timestamp (N, RANGE)".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_missing_sort_key_is_a_mismatch() {
        let mut state = matching_state();
        state.sort_key = None;

        let plan = calculate_deploy_plan(Some(&state), &messages_table_schema());

        assert!(matches!(plan, DeployPlan::KeySchemaMismatch { .. }));
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(Some(&matching_state()), "relay"),
            DestroyPlan::DeleteTable {
                table_name: "relay".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "relay"),
            DestroyPlan::AlreadyGone {
                table_name: "relay".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            schema: messages_table_schema().with_table_name("relay-dev"),
        });

        assert_eq!(
            lines,
            vec![
                "+ Create table: relay-dev",
                "  Partition key: tokenId (S)",
                "  Sort key: messageId (S)",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }
}
