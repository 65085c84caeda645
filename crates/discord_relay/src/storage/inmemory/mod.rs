//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of [`TableBackend`] that
//! keeps every table in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Items are
//! ordered by `(partition key, sort key)` like the real store, so partition
//! queries return the same order.
//!
//! # Example
//!
//! ```rust,ignore
//! use discord_relay::storage::InMemoryBackend;
//! use discord_relay_core::storage::messages_table_schema;
//!
//! let backend = InMemoryBackend::with_tables([messages_table_schema()]);
//! ```
//!
//! [`TableBackend`]: discord_relay_core::storage::TableBackend

mod backend;

pub use backend::InMemoryBackend;
