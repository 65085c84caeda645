//! Storage backend implementations.
//!
//! This module provides concrete implementations of the [`TableBackend`] trait
//! defined in `discord_relay_core::storage`.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always compiled; it backs the test suite and local runs.
//!
//! [`TableBackend`]: discord_relay_core::storage::TableBackend

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryBackend;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbBackend;
