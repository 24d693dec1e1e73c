//! HTTP transport for Directus communication.
//!
//! This module provides the foundational client layer: one authenticated
//! exchange per call, with status-code driven error classification.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async HTTP client
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a raw response with `{"data": ...}` envelope decoding
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`]: the transport error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::clients::{HttpClient, HttpMethod, HttpRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = HttpClient::new(&config)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "/items/articles")
//!     .query_param("limit", "-1")
//!     .build()?;
//!
//! let response = client.request(&CancellationToken::new(), request).await?;
//! let articles: Option<Vec<serde_json::Value>> = response.data()?;
//! ```
//!
//! # Cancellation
//!
//! Every call takes a [`CancellationToken`](tokio_util::sync::CancellationToken).
//! Cancelling it drops the in-flight exchange and the call returns
//! [`HttpError::Cancelled`]. The library performs no retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, ErrorCode, HttpError, InvalidHttpRequestError, UnexpectedStatusError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
