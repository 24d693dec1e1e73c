//! The alteration document used to edit one-to-many relations in place.

use serde::{Deserialize, Serialize};

/// Describes changes to a one-to-many relation without resending it whole.
///
/// Directus accepts this document wherever it accepts the list of related
/// items: `create` holds new related items, `update` holds partial related
/// items carrying their key, `delete` holds keys to detach.
///
/// # Example
///
/// ```rust
/// use directus_api::resources::Alterations;
/// use serde_json::json;
///
/// let mut changes: Alterations<serde_json::Value, String> = Alterations::new();
/// changes.create.push(json!({"policy": "editors"}));
/// changes.delete.push("9a1f".to_string());
///
/// assert_eq!(
///     serde_json::to_value(&changes).unwrap(),
///     json!({"create": [{"policy": "editors"}], "delete": ["9a1f"]})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alterations<T, PK> {
    /// Related items to create.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<T>,

    /// Related items to update.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<T>,

    /// Keys of related items to remove.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<PK>,
}

impl<T, PK> Alterations<T, PK> {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            create: Vec::new(),
            update: Vec::new(),
            delete: Vec::new(),
        }
    }

    /// Returns `true` if the document changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

impl<T, PK> Default for Alterations<T, PK> {
    fn default() -> Self {
        Self::new()
    }
}
