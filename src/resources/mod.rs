//! Shapes of the Directus system resources.
//!
//! These are plain data types. Entities whose server-side shape keeps
//! growing carry an [`UnknownFields`](crate::encoding::UnknownFields) bag so
//! that fields unknown to this crate survive a read-modify-write cycle.
//!
//! | Type | Endpoint | Key |
//! |------|----------|-----|
//! | [`Role`], [`RoleV10`] | `/roles` | `String` |
//! | [`Policy`] | `/policies` | `String` |
//! | [`Permission`] | `/permissions` | `i64` |
//! | [`User`] | `/users` | `String` |
//! | [`File`] | `/files` | `String` |
//! | [`Folder`] | `/folders` | `String` |
//! | [`Flow`] | `/flows` | `String` |
//! | [`Collection`] | `/collections` | `String` |
//! | [`CustomTranslation`] | `/translations` | `String` |
//! | [`Field`] | `/fields` | collection + field |
//! | [`RelationDefinition`] | `/relations` | collection + field |
//! | [`Settings`] | `/settings` | singleton |
//! | [`Server`] | `/server/info` | singleton, read-only |

mod access;
mod alterations;
mod files;
mod flows;
mod schema;
mod settings;

pub use access::{
    Permission, PermissionAction, Policy, PolicyAccess, Role, RoleV10, User, VersionedRole,
};
pub use alterations::Alterations;
pub use files::{File, Folder};
pub use flows::{Flow, FlowStatus, FlowTrigger};
pub use schema::{
    Accountability, Collection, CollectionCollapse, CollectionMeta, CollectionSchema, Field,
    FieldChoice, FieldMeta, FieldOptions, FieldSchema, FieldSpecial, FieldTranslation, FieldType,
    FieldWidth, RelationAction, RelationDefinition, RelationMeta, RelationSchema,
};
pub use settings::{CustomTranslation, ModuleBar, ModuleBarType, Server, Settings};
