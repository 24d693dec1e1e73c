//! Passthrough storage for fields a struct does not model.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Lists the JSON keys a struct models explicitly.
///
/// Used by [`UnknownFields`] to keep typed fields authoritative when the bag
/// holds a key with the same name.
pub trait KnownFields {
    /// The wire names of the typed fields.
    const FIELDS: &'static [&'static str];
}

/// Fields returned by the server that the owning struct `T` does not model.
///
/// Embed it with `#[serde(flatten)]`. On decode it captures every key the
/// typed fields did not consume; on encode it re-emits them, skipping any key
/// listed in `T::FIELDS` so the typed field wins.
///
/// # Example
///
/// ```rust
/// use directus_api::encoding::{KnownFields, UnknownFields};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Server {
///     version: String,
///     #[serde(flatten)]
///     unknown: UnknownFields<Server>,
/// }
///
/// impl KnownFields for Server {
///     const FIELDS: &'static [&'static str] = &["version"];
/// }
///
/// let server: Server =
///     serde_json::from_str(r#"{"version":"11.1.0","project":{"name":"Demo"}}"#).unwrap();
/// assert_eq!(server.unknown["project"]["name"], "Demo");
/// ```
pub struct UnknownFields<T> {
    values: Map<String, Value>,
    owner: PhantomData<fn() -> T>,
}

impl<T> UnknownFields<T> {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Map::new(),
            owner: PhantomData,
        }
    }

    /// Unwraps the raw map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.values
    }
}

impl<T> Default for UnknownFields<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for UnknownFields<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            owner: PhantomData,
        }
    }
}

impl<T> PartialEq for UnknownFields<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T> fmt::Debug for UnknownFields<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.values.fmt(f)
    }
}

impl<T> From<Map<String, Value>> for UnknownFields<T> {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
            owner: PhantomData,
        }
    }
}

impl<T> Deref for UnknownFields<T> {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl<T> DerefMut for UnknownFields<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.values
    }
}

impl<T: KnownFields> Serialize for UnknownFields<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.values
                .iter()
                .filter(|(key, _)| !T::FIELDS.contains(&key.as_str())),
        )
    }
}

impl<'de, T> Deserialize<'de> for UnknownFields<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from)
    }
}
