//! Project-wide singletons: settings and server information, plus custom
//! translation strings.

use serde::{Deserialize, Serialize};

use crate::encoding::{KnownFields, Nullable, UnknownFields};

/// Project settings.
///
/// Only the common settings are typed; everything else is kept in
/// [`Settings::unknown`] and sent back unchanged on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_url: Nullable<String>,
    #[serde(default)]
    pub project_descriptor: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    /// The module bar of the admin app; absent means the default bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_bar: Option<Vec<ModuleBar>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_login_attempts: Option<i32>,

    #[serde(default)]
    pub custom_css: Nullable<String>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub unknown: UnknownFields<Settings>,
}

impl KnownFields for Settings {
    const FIELDS: &'static [&'static str] = &[
        "project_name",
        "project_url",
        "project_descriptor",
        "project_color",
        "default_language",
        "module_bar",
        "auth_password_policy",
        "auth_login_attempts",
        "custom_css",
    ];
}

/// Kind of a module bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleBarType {
    /// An external link.
    Link,
    /// A built-in or extension module.
    Module,
}

/// One entry of the admin app module bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBar {
    pub id: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: ModuleBarType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Information about the Directus instance.
///
/// `version` is only reported to administrators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub version: String,

    /// Fields not modeled above, e.g. `project` and `rateLimit`.
    #[serde(flatten)]
    pub unknown: UnknownFields<Server>,
}

impl KnownFields for Server {
    const FIELDS: &'static [&'static str] = &["version"];
}

impl Server {
    /// Returns the major and minor version numbers, if reported.
    #[must_use]
    pub fn version_major_minor(&self) -> Option<(u32, u32)> {
        let mut parts = self.version.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        Some((major, minor))
    }
}

/// A custom translation string used by the admin app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTranslation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    pub language: String,
    #[serde(alias = "translation")]
    pub value: String,
}
