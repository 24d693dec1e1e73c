//! A value that distinguishes "explicitly null" from "set to the zero value".

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON value that is either present or `null`.
///
/// Unlike a bare `Option<T>` combined with `skip_serializing_if`, a
/// `Nullable` always serializes: absence becomes `null`, presence becomes the
/// value itself, even when that value is empty or zero. On decode, only the
/// literal `null` makes the value absent.
///
/// Struct fields of this type should carry `#[serde(default)]` so that a
/// missing key decodes as `null`.
///
/// # Example
///
/// ```rust
/// use directus_api::encoding::Nullable;
///
/// let empty = Nullable::new(String::new());
/// assert_eq!(serde_json::to_string(&empty).unwrap(), r#""""#);
///
/// let null: Nullable<String> = Nullable::null();
/// assert_eq!(serde_json::to_string(&null).unwrap(), "null");
/// assert_eq!(null.to_string(), "NULL");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nullable<T>(Option<T>);

impl<T> Nullable<T> {
    /// Creates a present value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// Creates an absent value.
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    /// Returns `true` if the value is present.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` if the value is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Returns a reference to the value, if present.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Replaces the value.
    pub fn set(&mut self, value: T) {
        self.0 = Some(value);
    }

    /// Makes the value `null`.
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Converts into an `Option`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.0
    }
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("NULL"),
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self)
    }
}
