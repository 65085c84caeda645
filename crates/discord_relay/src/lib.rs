//! Message store for the discord relay.
//!
//! [`MessageStore`] persists relayed chat messages and events keyed by relay
//! token, and reads back everything stored for a token. It composes a
//! [`KeyValueTable`] over any [`TableBackend`]; this crate ships DynamoDB and
//! in-memory backends.
//!
//! ```rust,ignore
//! use discord_relay::{Config, MessageStore, storage::DynamoDbBackend};
//! use discord_relay_core::message::{NewMessage, RelayToken};
//! use discord_relay_core::storage::MessageRepository;
//!
//! let config = Config::from_env();
//! let backend = DynamoDbBackend::from_config(&config).await;
//! let store = MessageStore::new(backend, config.messages_schema());
//!
//! let token = RelayToken::new("T1");
//! let id = store
//!     .persist_message(&token, &NewMessage::incoming("U1", "alice", 1000, "C1"))
//!     .await?;
//! let messages = store.get_messages_for_token("T1").await?;
//! ```
//!
//! [`TableBackend`]: discord_relay_core::storage::TableBackend

pub mod config;
pub mod storage;
pub mod store;
pub mod table;

pub use config::Config;
pub use store::MessageStore;
pub use table::KeyValueTable;
