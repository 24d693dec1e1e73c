//! A reference to another item: either its key or the item itself.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A relation to another item.
///
/// Directus returns relational fields as a bare key unless the request asks
/// for nested fields (e.g. `fields[]=author.*`), in which case the related
/// item is embedded. `Relation` holds whichever arrived.
///
/// Decoding tries, in order: `null` (empty), a string key, a numeric key,
/// then the embedded item. A numeric string such as `"42"` therefore decodes
/// as a string key.
///
/// Lists of relations (one-to-many, many-to-many) are `Vec<Relation<T>>` and
/// may mix keys and embedded items.
///
/// # Example
///
/// ```rust
/// use directus_api::encoding::Relation;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Author {
///     name: String,
/// }
///
/// let key: Relation<Author> = serde_json::from_str("7").unwrap();
/// assert_eq!(key.numeric_id(), 7);
///
/// let embedded: Relation<Author> = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
/// assert_eq!(embedded.value().name, "Ada");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relation<T> {
    /// No relation (`null`).
    Empty,
    /// The related item's string key.
    StringId(String),
    /// The related item's numeric key.
    NumericId(i64),
    /// The embedded related item.
    Value(T),
}

impl<T> Relation<T> {
    /// Creates a relation holding the embedded item.
    #[must_use]
    pub const fn from_value(value: T) -> Self {
        Self::Value(value)
    }

    /// Creates a relation holding a string key.
    #[must_use]
    pub fn from_string_id(id: impl Into<String>) -> Self {
        Self::StringId(id.into())
    }

    /// Creates a relation holding a numeric key.
    #[must_use]
    pub const fn from_numeric_id(id: i64) -> Self {
        Self::NumericId(id)
    }

    /// Returns `true` if no relation is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the embedded item, if loaded.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string key, if that is what the relation holds.
    #[must_use]
    pub fn as_string_id(&self) -> Option<&str> {
        match self {
            Self::StringId(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the numeric key, if that is what the relation holds.
    #[must_use]
    pub const fn as_numeric_id(&self) -> Option<i64> {
        match self {
            Self::NumericId(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the embedded item.
    ///
    /// # Panics
    ///
    /// Panics if the relation was not loaded with nested fields. Check with
    /// [`as_value`](Self::as_value) first when that is not guaranteed.
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Value(value) => value,
            _ => panic!("do not extract values from a relation without loaded fields"),
        }
    }

    /// Returns the string key.
    ///
    /// # Panics
    ///
    /// Panics if the relation does not hold a string key.
    #[must_use]
    pub fn string_id(&self) -> &str {
        match self {
            Self::StringId(id) => id,
            _ => panic!("do not extract the string ID of a relation that doesn't have it"),
        }
    }

    /// Returns the numeric key.
    ///
    /// # Panics
    ///
    /// Panics if the relation does not hold a numeric key.
    #[must_use]
    pub fn numeric_id(&self) -> i64 {
        match self {
            Self::NumericId(id) => *id,
            _ => panic!("do not extract the numeric ID of a relation that doesn't have it"),
        }
    }
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T: fmt::Debug> fmt::Display for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value:?}"),
            Self::StringId(id) => f.write_str(id),
            Self::NumericId(id) => write!(f, "{id}"),
            Self::Empty => f.write_str("INVALID_RELATION"),
        }
    }
}

impl<T: Serialize> Serialize for Relation<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::StringId(id) => serializer.serialize_str(id),
            Self::NumericId(id) => serializer.serialize_i64(*id),
            Self::Value(value) => value.serialize(serializer),
            Self::Empty => serializer.serialize_none(),
        }
    }
}

impl<'de, T: serde::de::DeserializeOwned> Deserialize<'de> for Relation<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(Self::Empty),
            serde_json::Value::String(id) => Ok(Self::StringId(id)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::NumericId)
                .ok_or_else(|| D::Error::custom(format!("relation key {number} is not an integer"))),
            other => T::deserialize(other).map(Self::Value).map_err(D::Error::custom),
        }
    }
}
