//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `discord_relay_core::storage`.
//! Every backend failure is `StoreUnavailable`; the message keeps the SDK detail.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use discord_relay_core::storage::StorageError;

/// Map a PutItem SDK error to StorageError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StorageError {
    match err {
        SdkError::ServiceError(service) => put_item_service_error(service.into_err(), table_name),
        other => transport_error("PutItem", other),
    }
}

/// Map a Query SDK error to StorageError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table_name: &str,
) -> StorageError {
    match err {
        SdkError::ServiceError(service) => query_service_error(service.into_err(), table_name),
        other => transport_error("Query", other),
    }
}

fn put_item_service_error(err: PutItemError, table_name: &str) -> StorageError {
    match err {
        PutItemError::ResourceNotFoundException(_) => {
            StorageError::StoreUnavailable(format!("Table not found: {}", table_name))
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::StoreUnavailable("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StorageError::StoreUnavailable("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StorageError::StoreUnavailable("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StorageError::StoreUnavailable("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StorageError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::StoreUnavailable(format!("PutItem failed: {:?}", err)),
    }
}

fn query_service_error(err: QueryError, table_name: &str) -> StorageError {
    match err {
        QueryError::ResourceNotFoundException(_) => {
            StorageError::StoreUnavailable(format!("Table not found: {}", table_name))
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            StorageError::StoreUnavailable("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            StorageError::StoreUnavailable("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            StorageError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::StoreUnavailable(format!("Query failed: {:?}", err)),
    }
}

/// Timeouts, dispatch and response failures that never produced a service error.
fn transport_error<E, R>(operation: &str, err: SdkError<E, R>) -> StorageError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    StorageError::StoreUnavailable(format!(
        "{} request failed: {}",
        operation,
        DisplayErrorContext(&err)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::http::HttpResponse;
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::{
        InternalServerError, ProvisionedThroughputExceededException, ResourceNotFoundException,
    };

    const TABLE: &str = "DiscordRelay.Messages";

    #[test]
    fn test_put_item_throttled() {
        let err = PutItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder().build(),
        );

        let mapped = put_item_service_error(err, TABLE);
        assert_eq!(
            mapped,
            StorageError::StoreUnavailable("Throughput exceeded, please retry".to_string())
        );
        assert!(mapped.is_retryable());
    }

    #[test]
    fn test_put_item_table_not_found() {
        let err =
            PutItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build());

        assert_eq!(
            put_item_service_error(err, TABLE),
            StorageError::StoreUnavailable("Table not found: DiscordRelay.Messages".to_string())
        );
    }

    #[test]
    fn test_query_internal_error() {
        let err = QueryError::InternalServerError(InternalServerError::builder().build());

        assert_eq!(
            query_service_error(err, TABLE),
            StorageError::StoreUnavailable("DynamoDB internal server error".to_string())
        );
    }

    #[test]
    fn test_query_unmodeled_error_keeps_detail() {
        let err = QueryError::generic(
            ErrorMetadata::builder()
                .code("ValidationException")
                .message("Query condition missed key schema element")
                .build(),
        );

        match query_service_error(err, TABLE) {
            StorageError::StoreUnavailable(msg) => {
                assert!(msg.starts_with("Query failed:"));
                assert!(msg.contains("ValidationException"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_timeout_is_store_unavailable() {
        let err: SdkError<QueryError, HttpResponse> =
            SdkError::timeout_error("connection timed out");

        match map_query_error(err, TABLE) {
            StorageError::StoreUnavailable(msg) => assert!(msg.starts_with("Query request failed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
