//! Documents stored as JSON text inside a JSON field.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A structured value whose wire form is a JSON string containing JSON.
///
/// Encoding serializes the value and then emits the result as a string.
/// Decoding reads the string and parses it; an empty string leaves the
/// value at its default.
///
/// # Example
///
/// ```rust
/// use directus_api::encoding::Json;
/// use std::collections::BTreeMap;
///
/// let mut doc = BTreeMap::new();
/// doc.insert("a".to_string(), 1);
///
/// let encoded = serde_json::to_string(&Json(doc)).unwrap();
/// assert_eq!(encoded, r#""{\"a\":1}""#);
///
/// let decoded: Json<BTreeMap<String, i32>> = serde_json::from_str(&encoded).unwrap();
/// assert_eq!(decoded["a"], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the document.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: fmt::Debug> fmt::Display for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<T: Serialize> Serialize for Json<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inner = serde_json::to_string(&self.0).map_err(S::Error::custom)?;
        serializer.serialize_str(&inner)
    }
}

impl<'de, T: DeserializeOwned + Default> Deserialize<'de> for Json<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(Self(T::default()));
        }
        serde_json::from_str(&raw).map(Self).map_err(D::Error::custom)
    }
}
