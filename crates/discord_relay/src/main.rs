use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use discord_relay::{storage::DynamoDbBackend, Config, MessageStore};
use discord_relay_core::message::{MessageRecord, MessageType, NewMessage, RelayToken};
use discord_relay_core::storage::MessageRepository;

/// Discord relay - inspect and write relayed message records
#[derive(Parser, Debug)]
#[command(name = "discord-relay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Messages table name
    #[arg(long, global = true, env = "MESSAGES_TABLE_NAME")]
    table_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Persist a single message record and print its message ID
    Persist(PersistArgs),

    /// List every message record stored for a relay token
    Messages(MessagesArgs),
}

#[derive(clap::Args, Debug)]
struct PersistArgs {
    /// Relay token the message belongs to
    #[arg(long)]
    token_id: String,

    /// Author ID in the chat system
    #[arg(long)]
    author_id: String,

    /// Author display name at capture time
    #[arg(long)]
    author_username: String,

    /// Creation time in epoch milliseconds (defaults to now)
    #[arg(long)]
    timestamp: Option<i64>,

    /// Kind of record
    #[arg(long = "type", value_enum)]
    message_type: TypeArg,

    /// Channel the message was posted in
    #[arg(long)]
    channel_id: Option<String>,

    /// Event name, for event records
    #[arg(long)]
    event_name: Option<String>,
}

#[derive(clap::Args, Debug)]
struct MessagesArgs {
    /// Relay token to list messages for
    #[arg(long)]
    token_id: String,

    /// Print records as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TypeArg {
    Incoming,
    Outgoing,
    Event,
}

impl From<TypeArg> for MessageType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Incoming => MessageType::Incoming,
            TypeArg::Outgoing => MessageType::Outgoing,
            TypeArg::Event => MessageType::Event,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "discord_relay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(table_name) = cli.table_name {
        config.table_name = table_name;
    }

    let backend = DynamoDbBackend::from_config(&config).await;
    let store = MessageStore::new(backend, config.messages_schema());

    match cli.command {
        Command::Persist(args) => persist(&store, args).await,
        Command::Messages(args) => messages(&store, args).await,
    }
}

async fn persist(store: &impl MessageRepository, args: PersistArgs) -> Result<()> {
    let timestamp = args
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    let mut message = NewMessage::new(
        args.author_id,
        args.author_username,
        timestamp,
        args.message_type.into(),
    );
    message.channel_id = args.channel_id;
    message.event_name = args.event_name;

    let message_id = store
        .persist_message(&RelayToken::new(args.token_id), &message)
        .await?;

    println!("{message_id}");
    Ok(())
}

async fn messages(store: &impl MessageRepository, args: MessagesArgs) -> Result<()> {
    let records = store.get_messages_for_token(&args.token_id).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No messages for token {}", args.token_id);
    }
    for record in &records {
        println!("{}", format_record(record));
    }
    Ok(())
}

fn format_record(record: &MessageRecord) -> String {
    let when = record
        .created_at()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| record.timestamp.to_string());

    let mut line = format!(
        "{} {:<8} {} {} ({})",
        record.message_id, record.message_type, when, record.author_username, record.author_id
    );
    if let Some(channel_id) = &record.channel_id {
        line.push_str(&format!(" channel={channel_id}"));
    }
    if let Some(event_name) = &record.event_name {
        line.push_str(&format!(" event={event_name}"));
    }
    line
}
