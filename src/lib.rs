//! # Directus API Rust SDK
//!
//! A typed client for the REST API of the Directus headless CMS.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`DirectusConfig`] and [`DirectusConfigBuilder`]
//! - Validated newtypes for the instance URL and the static access token
//! - An async HTTP transport that classifies Directus replies into typed errors
//! - Generic collection clients ([`rest::ItemsClient`], [`rest::SingletonClient`])
//!   with field projection, sorting, pagination and deep options
//! - A filter expression builder ([`rest::Filter`])
//! - Encoding wrappers for nullable fields, polymorphic relations,
//!   JSON-in-a-string fields and unknown-field passthrough ([`encoding`])
//! - Typed system resources (roles, policies, permissions, users, files,
//!   flows, fields, relations, settings, ...) bound in a [`Directus`] registry
//!
//! ## Quick Start
//!
//! ```rust
//! use directus_api::{AccessToken, DirectusConfig, InstanceUrl};
//!
//! let config = DirectusConfig::builder()
//!     .instance(InstanceUrl::new("https://cms.example.com").unwrap())
//!     .token(AccessToken::new("static-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.instance().host_name(), "cms.example.com");
//! ```
//!
//! ## Reading Items
//!
//! ```rust,ignore
//! use directus_api::{Directus, Nullable, Relation};
//! use directus_api::rest::{Filter, ReadOption};
//! use serde::{Deserialize, Serialize};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Article {
//!     id: i64,
//!     title: String,
//!     #[serde(default)]
//!     summary: Nullable<String>,
//!     #[serde(default)]
//!     author: Relation<Author>,
//! }
//!
//! let directus = Directus::new(&config)?;
//! let articles = directus.items::<Article, i64>("articles");
//! let cancel = CancellationToken::new();
//!
//! let published = articles
//!     .filter(
//!         &cancel,
//!         &Filter::eq("status", "published"),
//!         &[ReadOption::fields(["*", "author.*"]), ReadOption::sort(["-date_created"])],
//!     )
//!     .await?;
//!
//! for article in &published {
//!     if let Some(author) = article.author.as_value() {
//!         println!("{} by {}", article.title, author.name);
//!     }
//! }
//! ```
//!
//! ## Writing Items
//!
//! ```rust,ignore
//! use directus_api::rest::ResourceError;
//!
//! match articles.update(&cancel, 42, &serde_json::json!({"title": "Renamed"})).await {
//!     Ok(article) => println!("Saved {}", article.id),
//!     Err(ResourceError::NotFound { id, .. }) => println!("No article {id}"),
//!     Err(e) => match e.validation() {
//!         Some(rejection) => println!("Rejected: {}", rejection.message),
//!         None => return Err(e.into()),
//!     },
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every network operation takes a [`CancellationToken`](tokio_util::sync::CancellationToken).
//! Cancelling it aborts the in-flight exchange and the call returns
//! [`HttpError::Cancelled`].
//!
//! ## Logging
//!
//! Requests and replies are logged with `tracing` at debug level. Raw bodies
//! are logged too when [`DirectusConfigBuilder::body_logging`] is enabled.
//! The SDK never installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: Every failure reaches the caller

pub mod clients;
pub mod config;
mod directus;
pub mod encoding;
pub mod error;
pub mod resources;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, DirectusConfig, DirectusConfigBuilder, InstanceUrl};
pub use directus::Directus;
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ErrorCode, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError, UnexpectedStatusError,
};

// Re-export encoding wrappers
pub use encoding::{Json, Nullable, Relation};

// Re-export the resource layer essentials
pub use rest::{Filter, ItemsClient, ReadOption, ResourceError, RolesClient, SingletonClient};
