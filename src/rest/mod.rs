//! Typed access to Directus collections.
//!
//! This module layers resource semantics over the transport in
//! [`crate::clients`]:
//!
//! - **[`ItemsClient<T, PK>`]**: list/filter/get/create/update/delete on a
//!   collection or system endpoint
//! - **[`SingletonClient<T>`]**: get/update on a resource with one implicit item
//! - **[`SchemaClient<T>`]**: fields and relations, addressed by
//!   `(collection, field)`
//! - **[`RolesClient`]**: roles in the shape of the server's major version
//! - **[`Filter`]**: the filter expression tree
//! - **[`ReadOption`]** and **[`ReadQuery`]**: field projection, sorting,
//!   pagination and deep options
//! - **[`ResourceError`]**: not-found and missing-key semantics on top of
//!   [`HttpError`](crate::clients::HttpError)
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::rest::{Filter, ReadOption};
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let posts = directus.items::<Post, i64>("posts");
//!
//! let recent = posts
//!     .filter(
//!         &cancel,
//!         &Filter::and([Filter::eq("status", "published"), Filter::gte("year", 2024)]),
//!         &[
//!             ReadOption::fields(["id", "title", "translations.*"]),
//!             ReadOption::deep_filter("translations", Filter::eq("languages_code", "en-GB")),
//!             ReadOption::limit(20),
//!         ],
//!     )
//!     .await?;
//!
//! match posts.get(&cancel, 7, &[]).await {
//!     Ok(post) => println!("{}", post.title),
//!     Err(e) if e.is_not_found() => println!("gone"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod errors;
mod filter;
mod items;
mod options;
mod primary_key;
mod roles;
mod schema;
mod singleton;

pub use errors::ResourceError;
pub use filter::{Filter, LogicalOperator, Operator};
pub use items::ItemsClient;
pub use options::{ReadOption, ReadQuery};
pub use primary_key::PrimaryKey;
pub use roles::RolesClient;
pub use schema::{SchemaClient, SchemaObject};
pub use singleton::SingletonClient;
