//! Value wrappers for Directus' heterogeneous JSON shapes.
//!
//! # Overview
//!
//! - [`Nullable<T>`]: a value that is either present or `null`, where an
//!   empty string or zero still counts as present
//! - [`Relation<T>`]: a related item given as a string key, a numeric key, or
//!   the embedded item
//! - [`Json<T>`]: a document stored as JSON text inside a JSON field
//! - [`UnknownFields<T>`]: keys the owning struct does not model, kept for
//!   lossless round trips
//!
//! # Example
//!
//! ```rust
//! use directus_api::encoding::{Nullable, Relation};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Author {
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Article {
//!     #[serde(default)]
//!     subtitle: Nullable<String>,
//!     author: Relation<Author>,
//! }
//!
//! let article: Article =
//!     serde_json::from_str(r#"{"subtitle":null,"author":{"name":"Ada"}}"#).unwrap();
//! assert!(article.subtitle.is_null());
//! assert_eq!(article.author.value().name, "Ada");
//! ```

mod json;
mod nullable;
mod relation;
mod unknown;

pub use json::Json;
pub use nullable::Nullable;
pub use relation::Relation;
pub use unknown::{KnownFields, UnknownFields};
