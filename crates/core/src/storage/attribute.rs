//! Store-neutral attribute model.
//!
//! Items are maps from attribute name to a type-tagged value, the same shape a
//! wide-column store uses on the wire. Backends translate to their own SDK types.

use std::collections::HashMap;

use uuid::Uuid;

use super::{Result, StorageError};

/// A single type-tagged attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeValue {
    /// String-typed attribute.
    S(String),
    /// Numeric attribute, kept as its decimal text.
    N(String),
}

impl AttributeValue {
    /// Builds a numeric attribute from an integer.
    pub fn number(value: i64) -> Self {
        AttributeValue::N(value.to_string())
    }

    /// Returns the string value, if this is a string attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            AttributeValue::N(_) => None,
        }
    }

    /// Returns the numeric text, if this is a numeric attribute.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            AttributeValue::S(_) => None,
        }
    }

    /// The storage type discriminator (`S` or `N`).
    pub fn type_tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
        }
    }
}

/// An item as stored: attribute name to value.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// Get a required string attribute.
pub fn get_string(item: &AttributeMap, key: &str) -> Result<String> {
    item.get(key)
        .and_then(AttributeValue::as_s)
        .map(str::to_string)
        .ok_or_else(|| missing(key))
}

/// Get an optional string attribute.
///
/// Absent and empty values are both `None`. A value of the wrong type is corrupt.
pub fn get_optional_string(item: &AttributeMap, key: &str) -> Result<Option<String>> {
    match item.get(key) {
        None => Ok(None),
        Some(AttributeValue::S(s)) if s.is_empty() => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(other) => Err(StorageError::RecordCorrupt(format!(
            "Field {} has type {}, expected S",
            key,
            other.type_tag()
        ))),
    }
}

/// Get a required integer attribute.
pub fn get_i64(item: &AttributeMap, key: &str) -> Result<i64> {
    let raw = item
        .get(key)
        .and_then(AttributeValue::as_n)
        .ok_or_else(|| missing(key))?;
    raw.parse()
        .map_err(|e| StorageError::RecordCorrupt(format!("Invalid number {}: {}", key, e)))
}

/// Get a required UUID attribute.
pub fn get_uuid(item: &AttributeMap, key: &str) -> Result<Uuid> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| StorageError::RecordCorrupt(format!("Invalid UUID {}: {}", key, e)))
}

fn missing(key: &str) -> StorageError {
    StorageError::RecordCorrupt(format!("Missing or invalid field: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, AttributeValue)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = AttributeMap::new();
        assert_eq!(
            get_string(&item, "authorId"),
            Err(StorageError::RecordCorrupt(
                "Missing or invalid field: authorId".to_string()
            ))
        );
    }

    #[test]
    fn test_get_string_wrong_type() {
        let item = item(&[("authorId", AttributeValue::number(7))]);
        assert!(matches!(
            get_string(&item, "authorId"),
            Err(StorageError::RecordCorrupt(_))
        ));
    }

    #[test]
    fn test_get_optional_string() {
        let item = item(&[
            ("present", AttributeValue::S("value".to_string())),
            ("empty", AttributeValue::S(String::new())),
            ("numeric", AttributeValue::number(1)),
        ]);

        assert_eq!(get_optional_string(&item, "missing"), Ok(None));
        assert_eq!(get_optional_string(&item, "empty"), Ok(None));
        assert_eq!(
            get_optional_string(&item, "present"),
            Ok(Some("value".to_string()))
        );
        assert!(get_optional_string(&item, "numeric").is_err());
    }

    #[test]
    fn test_get_i64() {
        let item = item(&[
            ("timestamp", AttributeValue::number(1000)),
            ("garbage", AttributeValue::N("12abc".to_string())),
            ("text", AttributeValue::S("1000".to_string())),
        ]);

        assert_eq!(get_i64(&item, "timestamp"), Ok(1000));
        assert!(get_i64(&item, "garbage").is_err());
        assert!(get_i64(&item, "text").is_err());
        assert!(get_i64(&item, "missing").is_err());
    }

    #[test]
    fn test_get_uuid() {
        let item = item(&[
            (
                "messageId",
                AttributeValue::S("550e8400-e29b-41d4-a716-446655440001".to_string()),
            ),
            ("bad", AttributeValue::S("not-a-uuid".to_string())),
        ]);

        assert_eq!(
            get_uuid(&item, "messageId").unwrap().to_string(),
            "550e8400-e29b-41d4-a716-446655440001"
        );
        assert!(get_uuid(&item, "bad").is_err());
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(AttributeValue::S("a".to_string()).type_tag(), "S");
        assert_eq!(AttributeValue::number(1).type_tag(), "N");
        assert_eq!(AttributeValue::number(-3).as_n(), Some("-3"));
        assert_eq!(AttributeValue::number(1).as_s(), None);
    }
}
