//! Data model resources: collections, fields and relations.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encoding::{KnownFields, Nullable, UnknownFields};
use crate::rest::SchemaObject;

/// Activity tracking applied to a collection or flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accountability {
    /// Track activity and keep revisions.
    All,
    /// Track activity only.
    Activity,
}

/// How a collection group is shown in the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollectionCollapse {
    /// Expanded by default.
    #[default]
    Open,
    /// Collapsed by default.
    Closed,
    /// Always expanded.
    Locked,
}

/// A collection, i.e. a database table managed by Directus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// The collection name; also the table name.
    pub collection: String,
    /// Admin app settings; absent for unmanaged tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<CollectionMeta>,
    /// The database table; absent for folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CollectionSchema>,
}

/// Admin app settings of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub singleton: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unarchive_value: Option<String>,
    #[serde(default)]
    pub archive_app_filter: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    /// The parent collection in the navigation tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse: Option<CollectionCollapse>,

    /// Enables content versioning.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub versioning: bool,
    /// Activity tracking; null disables it.
    #[serde(default)]
    pub accountability: Nullable<Accountability>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub unknown: UnknownFields<CollectionMeta>,
}

impl KnownFields for CollectionMeta {
    const FIELDS: &'static [&'static str] = &[
        "collection",
        "icon",
        "note",
        "hidden",
        "singleton",
        "archive_field",
        "archive_value",
        "unarchive_value",
        "archive_app_filter",
        "sort_field",
        "group",
        "sort",
        "collapse",
        "versioning",
        "accountability",
        "system",
    ];
}

/// The database table behind a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub unknown: UnknownFields<CollectionSchema>,
}

impl KnownFields for CollectionSchema {
    const FIELDS: &'static [&'static str] = &["name", "comment", "collation", "engine", "schema"];
}

/// The storage type of a field.
///
/// An open set: the constants cover the common types and any other string
/// the server reports is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldType(pub Cow<'static, str>);

impl FieldType {
    pub const STRING: Self = Self(Cow::Borrowed("string"));
    pub const TEXT: Self = Self(Cow::Borrowed("text"));
    pub const INTEGER: Self = Self(Cow::Borrowed("integer"));
    pub const BIG_INTEGER: Self = Self(Cow::Borrowed("bigInteger"));
    pub const BOOLEAN: Self = Self(Cow::Borrowed("boolean"));
    pub const JSON: Self = Self(Cow::Borrowed("json"));
    pub const ALIAS: Self = Self(Cow::Borrowed("alias"));
    pub const DATE: Self = Self(Cow::Borrowed("date"));
    pub const TIMESTAMP: Self = Self(Cow::Borrowed("timestamp"));
    pub const UUID: Self = Self(Cow::Borrowed("uuid"));

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::STRING
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A special behavior flag of a field. Also an open set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSpecial(pub Cow<'static, str>);

impl FieldSpecial {
    pub const MANY_TO_ONE: Self = Self(Cow::Borrowed("m2o"));
    pub const ONE_TO_MANY: Self = Self(Cow::Borrowed("o2m"));
    pub const DATE_CREATED: Self = Self(Cow::Borrowed("date-created"));
    pub const DATE_UPDATED: Self = Self(Cow::Borrowed("date-updated"));
    pub const UUID: Self = Self(Cow::Borrowed("uuid"));
    pub const USER_CREATED: Self = Self(Cow::Borrowed("user-created"));
    pub const USER_UPDATED: Self = Self(Cow::Borrowed("user-updated"));
    pub const FILE: Self = Self(Cow::Borrowed("file"));
    pub const ALIAS: Self = Self(Cow::Borrowed("alias"));
    pub const NO_DATA: Self = Self(Cow::Borrowed("no-data"));
    pub const CAST_BOOLEAN: Self = Self(Cow::Borrowed("cast-boolean"));
    pub const GROUP: Self = Self(Cow::Borrowed("group"));

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Width of a field in the item form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldWidth {
    Full,
    Half,
    Fill,
}

/// A field of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub collection: String,
    pub field: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Admin app settings; absent for unmanaged columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FieldMeta>,
    /// The database column; absent for alias fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<FieldSchema>,
}

impl SchemaObject for Field {
    const ENDPOINT: &'static str = "fields";
    const RESOURCE: &'static str = "field";
    const CREATE_IN_COLLECTION: bool = true;

    fn collection(&self) -> &str {
        &self.collection
    }

    fn field(&self) -> &str {
        &self.field
    }
}

/// Admin app settings of a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<FieldWidth>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<Vec<FieldSpecial>>,
    /// Labels of the field per language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<FieldTranslation>>,
    /// Options of the field interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,

    /// Fields not modeled above, e.g. `interface` and `display`.
    #[serde(flatten)]
    pub unknown: UnknownFields<FieldMeta>,
}

impl KnownFields for FieldMeta {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "hidden",
        "width",
        "read_only",
        "required",
        "sort",
        "system",
        "special",
        "translations",
        "options",
    ];
}

impl FieldMeta {
    /// Returns `true` if the field carries the `special` flag.
    #[must_use]
    pub fn has_special(&self, special: &FieldSpecial) -> bool {
        self.special
            .as_deref()
            .is_some_and(|flags| flags.contains(special))
    }

    /// Returns the label of the field in `language`.
    #[must_use]
    pub fn translation(&self, language: &str) -> Option<&FieldTranslation> {
        self.translations
            .as_deref()?
            .iter()
            .find(|t| t.language == language)
    }
}

/// The label of a field in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTranslation {
    pub language: String,
    pub translation: String,
}

/// Options of a field interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// The values offered by dropdown-like interfaces, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<FieldChoice>>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub unknown: UnknownFields<FieldOptions>,
}

impl KnownFields for FieldOptions {
    const FIELDS: &'static [&'static str] = &["choices"];
}

/// One choice of a dropdown-like interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldChoice {
    /// A bare value used as its own label.
    Value(String),
    /// A value with a display label.
    Labeled {
        /// The label.
        text: String,
        /// The stored value.
        value: Value,
    },
}

/// The database column behind a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub table: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_primary_key: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_auto_increment: bool,

    /// Fields not modeled above, e.g. `default_value`.
    #[serde(flatten)]
    pub unknown: UnknownFields<FieldSchema>,
}

impl KnownFields for FieldSchema {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "table",
        "data_type",
        "max_length",
        "is_nullable",
        "is_unique",
        "is_primary_key",
        "has_auto_increment",
    ];
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationAction {
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "NO ACTION")]
    NoAction,
}

/// A relation between two collections, keyed by the many-side field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationDefinition {
    /// The collection holding the foreign key.
    pub collection: String,
    /// The foreign key field.
    pub field: String,
    /// The referenced collection; null for many-to-any relations.
    #[serde(default)]
    pub related_collection: Nullable<String>,
    /// The foreign key constraint; absent without a database constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<RelationSchema>,
    /// Admin app settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RelationMeta>,
}

impl SchemaObject for RelationDefinition {
    const ENDPOINT: &'static str = "relations";
    const RESOURCE: &'static str = "relation";
    const CREATE_IN_COLLECTION: bool = false;

    fn collection(&self) -> &str {
        &self.collection
    }

    fn field(&self) -> &str {
        &self.field
    }
}

/// The foreign key constraint of a relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationSchema {
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<RelationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<RelationAction>,

    /// Fields not modeled above, e.g. `foreign_key_table`.
    #[serde(flatten)]
    pub unknown: UnknownFields<RelationSchema>,
}

impl KnownFields for RelationSchema {
    const FIELDS: &'static [&'static str] = &["table", "column", "on_update", "on_delete"];
}

/// Admin app settings of a relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Fields not modeled above, e.g. `junction_field`.
    #[serde(flatten)]
    pub unknown: UnknownFields<RelationMeta>,
}

impl KnownFields for RelationMeta {
    const FIELDS: &'static [&'static str] = &["id"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_field() -> serde_json::Value {
        json!({
            "collection": "articles",
            "field": "status",
            "type": "string",
            "meta": {
                "id": 4,
                "hidden": false,
                "width": "half",
                "read_only": false,
                "required": true,
                "special": ["cast-boolean"],
                "interface": "select-dropdown",
                "translations": [
                    {"language": "en-US", "translation": "Status"},
                    {"language": "es-ES", "translation": "Estado"}
                ],
                "options": {
                    "choices": ["draft", {"text": "Published", "value": "published"}],
                    "allowOther": false
                }
            },
            "schema": {
                "name": "status",
                "table": "articles",
                "data_type": "character varying",
                "max_length": 255,
                "is_nullable": false,
                "default_value": "draft"
            }
        })
    }

    #[test]
    fn test_field_decodes_meta_and_schema() {
        let field: Field = serde_json::from_value(status_field()).unwrap();
        assert_eq!(field.field_type, FieldType::STRING);

        let meta = field.meta.as_ref().unwrap();
        assert_eq!(meta.width, Some(FieldWidth::Half));
        assert!(meta.has_special(&FieldSpecial::CAST_BOOLEAN));
        assert!(!meta.has_special(&FieldSpecial::MANY_TO_ONE));
        assert_eq!(meta.translation("es-ES").unwrap().translation, "Estado");
        assert!(meta.translation("fr-FR").is_none());
        assert_eq!(meta.unknown["interface"], json!("select-dropdown"));

        let schema = field.schema.as_ref().unwrap();
        assert_eq!(schema.max_length, Some(255));
        assert_eq!(schema.unknown["default_value"], json!("draft"));
    }

    #[test]
    fn test_field_choices_keep_order_and_shape() {
        let field: Field = serde_json::from_value(status_field()).unwrap();
        let options = field.meta.unwrap().options.unwrap();
        assert_eq!(
            options.choices,
            Some(vec![
                FieldChoice::Value("draft".to_string()),
                FieldChoice::Labeled {
                    text: "Published".to_string(),
                    value: json!("published"),
                },
            ])
        );
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "choices": ["draft", {"text": "Published", "value": "published"}],
                "allowOther": false
            })
        );
    }

    #[test]
    fn test_field_round_trip_preserves_unknown_fields() {
        let field: Field = serde_json::from_value(status_field()).unwrap();
        let encoded = serde_json::to_value(&field).unwrap();
        let again: Field = serde_json::from_value(encoded).unwrap();
        assert_eq!(again, field);
    }

    #[test]
    fn test_unknown_field_type_is_kept() {
        let field: Field = serde_json::from_value(json!({
            "collection": "places",
            "field": "location",
            "type": "geometry.Point",
            "meta": null,
            "schema": null
        }))
        .unwrap();
        assert_eq!(field.field_type.as_str(), "geometry.Point");
        assert!(field.meta.is_none());
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({"collection": "places", "field": "location", "type": "geometry.Point"})
        );
    }

    #[test]
    fn test_collection_meta_accountability_is_nullable() {
        let collection: Collection = serde_json::from_value(json!({
            "collection": "logs",
            "meta": {
                "collection": "logs",
                "icon": null,
                "note": null,
                "hidden": true,
                "singleton": false,
                "collapse": "open",
                "accountability": null,
                "archive_app_filter": true,
                "display_template": "{{message}}"
            },
            "schema": {"name": "logs", "comment": null}
        }))
        .unwrap();

        let meta = collection.meta.as_ref().unwrap();
        assert!(meta.hidden);
        assert!(meta.accountability.is_null());
        assert_eq!(meta.collapse, Some(CollectionCollapse::Open));

        let encoded = serde_json::to_value(&collection).unwrap();
        assert_eq!(encoded["meta"]["accountability"], json!(null));
        assert_eq!(encoded["meta"]["display_template"], json!("{{message}}"));
        assert!(encoded["meta"].get("note").is_none());
    }

    #[test]
    fn test_relation_definition_decodes_actions() {
        let relation: RelationDefinition = serde_json::from_value(json!({
            "collection": "articles",
            "field": "author",
            "related_collection": "directus_users",
            "schema": {
                "table": "articles",
                "column": "author",
                "foreign_key_table": "directus_users",
                "on_update": "NO ACTION",
                "on_delete": "SET NULL"
            },
            "meta": {"id": 9, "one_field": null}
        }))
        .unwrap();

        assert_eq!(relation.related_collection.value().map(String::as_str), Some("directus_users"));
        let schema = relation.schema.as_ref().unwrap();
        assert_eq!(schema.on_delete, Some(RelationAction::SetNull));
        assert_eq!(schema.on_update, Some(RelationAction::NoAction));
        assert_eq!(relation.meta.as_ref().unwrap().id, Some(9));
        assert_eq!(relation.collection(), "articles");
        assert_eq!(relation.field(), "author");
    }
}
