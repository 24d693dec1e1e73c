//! File library resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding::{KnownFields, Nullable, UnknownFields};

/// Metadata of an uploaded file.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `storage`, `filename_disk` - Where the asset is stored
/// - `uploaded_by`, `uploaded_on`, `modified_on` - Audit data
///
/// ## Writable Fields
/// - `title`, `description`, `tags` - Library metadata
/// - `folder` - The containing folder, null for the root
/// - `filename_download` - The name offered on download
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// The file id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The storage adapter holding the asset.
    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub storage: Option<String>,

    /// The name of the asset on disk.
    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub filename_disk: Option<String>,

    /// The name offered on download.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_download: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The MIME type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// The containing folder; null for the root.
    #[serde(default)]
    pub folder: Nullable<String>,

    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub uploaded_by: Option<String>,

    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub uploaded_on: Option<DateTime<Utc>>,

    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub modified_on: Option<DateTime<Utc>>,

    /// Image width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,

    /// Image height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Fields not modeled above, e.g. `filesize` and `metadata`.
    #[serde(flatten)]
    pub unknown: UnknownFields<File>,
}

impl KnownFields for File {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "storage",
        "filename_disk",
        "filename_download",
        "title",
        "type",
        "folder",
        "uploaded_by",
        "uploaded_on",
        "modified_on",
        "width",
        "height",
        "description",
        "tags",
    ];
}

/// A virtual folder of the file library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// The parent folder; null for top-level folders.
    #[serde(default)]
    pub parent: Nullable<String>,
}
