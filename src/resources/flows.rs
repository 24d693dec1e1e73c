//! Automation flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding::{KnownFields, Nullable, UnknownFields};
use crate::resources::schema::Accountability;

/// Whether a flow reacts to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    #[default]
    Active,
    Inactive,
}

/// What starts a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowTrigger {
    /// An item event hook.
    Event,
    /// A cron schedule.
    Schedule,
    /// Another flow's "trigger flow" operation.
    Operation,
    /// An incoming HTTP request.
    Webhook,
    /// A button in the admin app.
    Manual,
}

/// A flow: a trigger followed by a chain of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: FlowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<FlowTrigger>,
    /// Activity tracking of flow runs; null disables it.
    #[serde(default)]
    pub accountability: Nullable<Accountability>,
    /// The first operation of the chain.
    #[serde(default)]
    pub operation: Nullable<String>,

    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub date_created: Option<DateTime<Utc>>,

    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub user_created: Option<String>,

    /// Fields not modeled above, e.g. the trigger `options`.
    #[serde(flatten)]
    pub unknown: UnknownFields<Flow>,
}

impl KnownFields for Flow {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "icon",
        "color",
        "description",
        "status",
        "trigger",
        "accountability",
        "operation",
        "date_created",
        "user_created",
    ];
}
