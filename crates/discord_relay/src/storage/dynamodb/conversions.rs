//! DynamoDB attribute conversion functions.
//!
//! Pure functions translating between the store-neutral [`AttributeMap`] and
//! the SDK's item representation. The messages table only ever holds `S` and
//! `N` attributes; anything else read back is treated as corrupt data.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use discord_relay_core::storage::{AttributeMap, AttributeValue, Result, StorageError};

/// Convert an attribute value to its SDK form.
pub fn to_sdk_value(value: AttributeValue) -> SdkAttributeValue {
    match value {
        AttributeValue::S(s) => SdkAttributeValue::S(s),
        AttributeValue::N(n) => SdkAttributeValue::N(n),
    }
}

/// Convert an item to its SDK form.
pub fn to_sdk_item(item: AttributeMap) -> HashMap<String, SdkAttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, to_sdk_value(value)))
        .collect()
}

/// Convert an SDK attribute value, rejecting types the table never stores.
pub fn from_sdk_value(name: &str, value: SdkAttributeValue) -> Result<AttributeValue> {
    match value {
        SdkAttributeValue::S(s) => Ok(AttributeValue::S(s)),
        SdkAttributeValue::N(n) => Ok(AttributeValue::N(n)),
        other => Err(StorageError::RecordCorrupt(format!(
            "Field {} has unsupported type: {:?}",
            name, other
        ))),
    }
}

/// Convert an SDK item.
pub fn from_sdk_item(item: HashMap<String, SdkAttributeValue>) -> Result<AttributeMap> {
    item.into_iter()
        .map(|(name, value)| {
            let value = from_sdk_value(&name, value)?;
            Ok((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_round_trip() {
        let mut item = AttributeMap::new();
        item.insert("tokenId".to_string(), AttributeValue::S("T1".to_string()));
        item.insert("timestamp".to_string(), AttributeValue::number(1000));

        let sdk = to_sdk_item(item.clone());
        assert_eq!(sdk.get("tokenId").unwrap().as_s().unwrap(), "T1");
        assert_eq!(sdk.get("timestamp").unwrap().as_n().unwrap(), "1000");

        assert_eq!(from_sdk_item(sdk).unwrap(), item);
    }

    #[test]
    fn test_unsupported_type_is_corrupt() {
        let mut sdk = HashMap::new();
        sdk.insert("authorId".to_string(), SdkAttributeValue::Bool(true));

        assert!(matches!(
            from_sdk_item(sdk),
            Err(StorageError::RecordCorrupt(msg)) if msg.starts_with("Field authorId")
        ));
    }

    #[test]
    fn test_null_attribute_is_corrupt() {
        assert!(from_sdk_value("channelId", SdkAttributeValue::Null(true)).is_err());
    }
}
