//! DynamoDB infrastructure management commands.

mod client;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;
use discord_relay::storage::DynamoDbBackend;
use discord_relay::MessageStore;
use discord_relay_core::message::RelayToken;
use discord_relay_core::storage::{messages_table_schema, MESSAGES_TABLE_NAME};

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the messages table.
    Deploy(DeployCommand),

    /// Seed a relay token with demo messages.
    Seed(SeedCommand),
}

/// Deploy or destroy the messages table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the messages table.

By default, this command creates the messages table keyed by tokenId
(partition) and messageId (sort), with on-demand billing. An existing table
with the same keys is left untouched; one with different keys is reported
and never modified.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, env = "MESSAGES_TABLE_NAME", default_value = MESSAGES_TABLE_NAME)]
    pub table_name: String,
}

/// Seed a relay token with demo messages.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Write demo message records for a relay token.

Generates a deterministic mix of incoming messages, outgoing relay replies
and events (some with a channel, some without), spaced 45 seconds apart and
ending around the current time. Each record is written through the message
store, so every one gets a fresh message ID.")]
pub struct SeedCommand {
    /// Relay token to seed messages for.
    #[arg(long)]
    pub token_id: String,

    /// Number of messages to generate.
    #[arg(long, default_value = "20")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, env = "MESSAGES_TABLE_NAME", default_value = MESSAGES_TABLE_NAME)]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Are you sure you want to delete this table? ALL DATA WILL BE LOST")
                .default(false)
                .interact()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
    } else {
        let schema = messages_table_schema().with_table_name(&cmd.table_name);
        let plan = planning::calculate_deploy_plan(current_state.as_ref(), &schema);

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in planning::format_deploy_plan(&plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('-') {
                    aprintln!("  {}", p_r(&line));
                } else if line.starts_with('~') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        match plan {
            planning::DeployPlan::NoChanges { .. } => {
                if !global.is_silent() {
                    aprintln!("{}", p_g("Infrastructure is up to date."));
                }
                return Ok(());
            }
            planning::DeployPlan::KeySchemaMismatch { table_name, .. } => {
                return Err(DynamodbError::KeySchemaMismatch { table_name });
            }
            planning::DeployPlan::CreateTable { .. } => {}
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Apply these changes?")
                .default(true)
                .interact()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Token:"), cmd.token_id);
        aprintln!("{} {}", p_b("Message count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    // Verify table exists
    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let span_ms = i64::from(cmd.count.saturating_sub(1)) * 45_000;
    let start_ms = chrono::Utc::now().timestamp_millis() - span_ms;
    let messages = seed::generate_seed_messages(start_ms, cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Messages to create:"));
        for message in messages.iter().take(5) {
            let detail = message
                .event_name
                .as_deref()
                .or(message.channel_id.as_deref())
                .unwrap_or("-");
            aprintln!(
                "  {} {:<8} {} ({})",
                message.timestamp,
                message.message_type,
                message.author_username,
                detail
            );
        }
        if messages.len() > 5 {
            aprintln!("  ... and {} more", messages.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Insert {} messages?", messages.len()))
            .default(true)
            .interact()
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        if !confirmed {
            return Err(DynamodbError::UserCancelled);
        }
    }

    let schema = messages_table_schema().with_table_name(&cmd.table_name);
    let store = MessageStore::new(DynamoDbBackend::new(dynamo_client), schema);
    let token = RelayToken::new(cmd.token_id);

    let inserted = seed::seed_messages(&store, &token, &messages).await?;

    if !global.is_silent() {
        aprintln!("{} {} messages inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
