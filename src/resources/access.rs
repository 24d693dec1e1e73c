//! Access control resources: roles, policies, permissions and users.
//!
//! Since Directus 11 a role does not grant anything itself. Policies carry
//! the permissions, and are attached to roles or users through
//! `directus_access` rows. [`Role`] hides those rows: it exposes the attached
//! policy ids as a plain list and computes the access-row changes when
//! encoded.
//!
//! Directus 10 roles carry the access flags directly and have no policies;
//! they are modeled by [`RoleV10`]. [`VersionedRole`] holds either shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::resources::VersionedRole;
//!
//! if let VersionedRole::V11(mut role) = directus.roles().get(&cancel, role_id, &[]).await? {
//!     role.policies.retain(|id| id != "old-policy");
//!     role.policies.push("new-policy".to_string());
//!     directus.roles().update(&cancel, role_id, &VersionedRole::V11(role)).await?;
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::encoding::{KnownFields, Nullable, UnknownFields};
use crate::resources::alterations::Alterations;

/// A Directus 11 role.
///
/// Decode it with the policy access rows expanded (`policies.id`,
/// `policies.policy`); the registry's roles client requests them by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RoleRow")]
pub struct Role {
    /// The role id.
    pub id: Option<String>,
    /// The Material icon name.
    pub icon: Option<String>,
    /// The display name.
    pub name: String,
    /// A description shown in the admin app.
    pub description: Option<String>,
    /// Ids of the users holding the role.
    pub users: Vec<String>,
    /// Ids of the policies attached to the role.
    pub policies: Vec<String>,
    /// The parent role, if nested.
    pub parent: Option<String>,
    /// Ids of the nested roles.
    pub children: Vec<String>,

    /// Access row id per policy id, as loaded from the server.
    accesses: BTreeMap<String, String>,
}

/// One `directus_access` row linking a policy to a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAccess {
    /// The access row id. Absent for rows still to be created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The policy id.
    pub policy: String,
}

#[derive(Deserialize)]
struct RoleRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    users: Option<Vec<String>>,
    #[serde(default)]
    policies: Option<Vec<PolicyAccess>>,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    children: Option<Vec<String>>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        let rows = row.policies.unwrap_or_default();
        let policies = rows.iter().map(|access| access.policy.clone()).collect();
        let accesses = rows
            .into_iter()
            .filter_map(|access| access.id.map(|id| (access.policy, id)))
            .collect();

        Self {
            id: row.id,
            icon: row.icon,
            name: row.name,
            description: row.description,
            users: row.users.unwrap_or_default(),
            policies,
            parent: row.parent,
            children: row.children.unwrap_or_default(),
            accesses,
        }
    }
}

#[derive(Serialize)]
struct RoleBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    users: &'a Vec<String>,
    #[serde(skip_serializing_if = "Alterations::is_empty")]
    policies: Alterations<PolicyAccess, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: &'a Vec<String>,
}

impl Role {
    /// Creates a role with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the access row attaching `policy` as loaded from the server.
    #[must_use]
    pub fn access_id(&self, policy: &str) -> Option<&str> {
        self.accesses.get(policy).map(String::as_str)
    }

    /// Computes the access rows to create and delete so that the server
    /// matches [`Role::policies`].
    #[must_use]
    pub fn policy_alterations(&self) -> Alterations<PolicyAccess, String> {
        let mut alterations = Alterations::new();
        for policy in &self.policies {
            let queued = alterations
                .create
                .iter()
                .any(|row: &PolicyAccess| &row.policy == policy);
            if !self.accesses.contains_key(policy) && !queued {
                alterations.create.push(PolicyAccess {
                    id: None,
                    policy: policy.clone(),
                });
            }
        }
        for (policy, access) in &self.accesses {
            if !self.policies.contains(policy) {
                alterations.delete.push(access.clone());
            }
        }
        alterations
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RoleBody {
            id: self.id.as_deref(),
            icon: self.icon.as_deref(),
            name: &self.name,
            description: self.description.as_deref(),
            users: &self.users,
            policies: self.policy_alterations(),
            parent: self.parent.as_deref(),
            children: &self.children,
        }
        .serialize(serializer)
    }
}

/// A Directus 10 role. Access is granted by the role itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleV10 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub admin_access: bool,
    #[serde(default)]
    pub app_access: bool,
    /// Ids of the users holding the role; null when none are loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

/// A role in the shape of the server it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedRole {
    /// Directus 10.
    V10(RoleV10),
    /// Directus 11 and later.
    V11(Role),
}

impl VersionedRole {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::V10(role) => role.id.as_deref(),
            Self::V11(role) => role.id.as_deref(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::V10(role) => &role.name,
            Self::V11(role) => &role.name,
        }
    }

    /// Returns the attached policy ids; `None` before Directus 11.
    #[must_use]
    pub fn policies(&self) -> Option<&[String]> {
        match self {
            Self::V10(_) => None,
            Self::V11(role) => Some(&role.policies),
        }
    }

    /// Returns the Directus 11 role, if that is the shape.
    #[must_use]
    pub const fn as_v11(&self) -> Option<&Role> {
        match self {
            Self::V11(role) => Some(role),
            Self::V10(_) => None,
        }
    }

    /// Returns the Directus 10 role, if that is the shape.
    #[must_use]
    pub const fn as_v10(&self) -> Option<&RoleV10> {
        match self {
            Self::V10(role) => Some(role),
            Self::V11(_) => None,
        }
    }
}

impl From<Role> for VersionedRole {
    fn from(role: Role) -> Self {
        Self::V11(role)
    }
}

impl From<RoleV10> for VersionedRole {
    fn from(role: RoleV10) -> Self {
        Self::V10(role)
    }
}

/// A policy: a named set of permissions attachable to roles and users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// The policy id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The Material icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// The display name.
    #[serde(default)]
    pub name: String,
    /// A description shown in the admin app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grants unrestricted access.
    #[serde(default)]
    pub admin_access: bool,
    /// Grants access to the admin app.
    #[serde(default)]
    pub app_access: bool,
    /// Access rows attaching the policy to users.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    /// Access rows attaching the policy to roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Ids of the permissions of the policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<i64>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub unknown: UnknownFields<Policy>,
}

impl KnownFields for Policy {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "icon",
        "name",
        "description",
        "admin_access",
        "app_access",
        "users",
        "roles",
        "permissions",
    ];
}

/// The operation a permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    /// Create items.
    Create,
    /// Read items.
    #[default]
    Read,
    /// Update items.
    Update,
    /// Delete items.
    Delete,
    /// Share items.
    Share,
}

/// A permission of a policy on one collection and action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// The permission id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The owning policy; null for the public permissions of Directus 10.
    #[serde(default)]
    pub policy: Nullable<String>,
    /// The collection the permission applies to.
    #[serde(default)]
    pub collection: String,
    /// The granted operation.
    #[serde(default)]
    pub action: PermissionAction,
    /// The accessible fields; null grants none, `["*"]` grants all.
    #[serde(default)]
    pub fields: Nullable<Vec<String>>,
    /// Whether the permission is built in.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,

    /// Fields not modeled above, e.g. `permissions` and `validation`.
    #[serde(flatten)]
    pub unknown: UnknownFields<Permission>,
}

impl KnownFields for Permission {
    const FIELDS: &'static [&'static str] =
        &["id", "policy", "collection", "action", "fields", "system"];
}

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Id of the user's role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Access rows attaching policies directly to the user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,
    /// Authentication provider, `default` for local accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Identifier of the user at the external provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
}
