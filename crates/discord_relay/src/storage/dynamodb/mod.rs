//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of [`TableBackend`]
//! using `aws-sdk-dynamodb`.
//!
//! [`TableBackend`]: discord_relay_core::storage::TableBackend

mod backend;
mod conversions;
mod error;

pub use backend::DynamoDbBackend;
