//! Transport error types for the Directus client.
//!
//! Every exchange is classified by [`HttpClient`](super::HttpClient) into a
//! success or one of the variants of [`HttpError`]:
//!
//! - [`ApiError`]: the server rejected the payload (HTTP 400 with a
//!   structured `errors` array)
//! - [`HttpError::Empty`]: a POST or PATCH was answered with 204 No Content
//! - [`UnexpectedStatusError`]: any status not otherwise classified
//! - [`HttpError::Cancelled`]: the caller's cancellation token fired
//! - local failures: network, encoding and decoding
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::clients::{ErrorCode, HttpError};
//!
//! match client.request(&cancel, request).await {
//!     Ok(response) => println!("status {}", response.code),
//!     Err(HttpError::Validation(e)) if e.code == Some(ErrorCode::RecordNotUnique) => {
//!         println!("duplicate: {}", e.message);
//!     }
//!     Err(HttpError::UnexpectedStatus(e)) => println!("status {} for {}", e.status, e.url),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::clients::http_request::HttpMethod;

/// Machine-readable error code attached to a Directus validation error.
///
/// Codes this crate does not model are kept verbatim in [`ErrorCode::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A unique constraint was violated.
    RecordNotUnique,
    /// A foreign key references a missing row.
    InvalidForeignKey,
    /// The request payload is malformed.
    InvalidPayload,
    /// The query parameters are malformed.
    InvalidQuery,
    /// The caller is not allowed to perform the operation.
    Forbidden,
    /// A value exceeds the column length.
    ValueTooLong,
    /// A required column was left empty.
    NotNullViolation,
    /// Any other code reported by the server.
    Other(String),
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RecordNotUnique => "RECORD_NOT_UNIQUE",
            Self::InvalidForeignKey => "INVALID_FOREIGN_KEY",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::Forbidden => "FORBIDDEN",
            Self::ValueTooLong => "VALUE_TOO_LONG",
            Self::NotNullViolation => "NOT_NULL_VIOLATION",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "RECORD_NOT_UNIQUE" => Self::RecordNotUnique,
            "INVALID_FOREIGN_KEY" => Self::InvalidForeignKey,
            "INVALID_PAYLOAD" => Self::InvalidPayload,
            "INVALID_QUERY" => Self::InvalidQuery,
            "FORBIDDEN" => Self::Forbidden,
            "VALUE_TOO_LONG" => Self::ValueTooLong,
            "NOT_NULL_VIOLATION" => Self::NotNullViolation,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from(code.as_str()))
    }
}

/// A validation error reported by Directus (HTTP 400).
///
/// Only the first entry of the server's `errors` array is surfaced.
///
/// # Example
///
/// ```rust
/// use directus_api::clients::{ApiError, ErrorCode};
///
/// let error = ApiError {
///     message: "Value for field \"slug\" has to be unique.".to_string(),
///     code: Some(ErrorCode::RecordNotUnique),
/// };
/// assert!(error.to_string().ends_with("(code: RECORD_NOT_UNIQUE)"));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub struct ApiError {
    /// The message sent by the server.
    pub message: String,
    /// The machine-readable code from `extensions.code`, if any.
    pub code: Option<ErrorCode>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "Directus rejected the request: {} (code: {code})", self.message),
            None => write!(f, "Directus rejected the request: {}", self.message),
        }
    }
}

/// Error returned for a status code the transport does not classify.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Unexpected status code {status} for url \"{url}\"")]
pub struct UnexpectedStatusError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The full URL of the request, including the query string.
    pub url: String,
}

/// Error returned when a request fails validation before being sent.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: HttpMethod,
    },
}

/// Unified error type for all transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server rejected the payload.
    #[error(transparent)]
    Validation(#[from] ApiError),

    /// A POST or PATCH was accepted but nothing was returned.
    #[error("Directus returned no content for {method} \"{url}\"")]
    Empty {
        /// The method of the request.
        method: HttpMethod,
        /// The full URL of the request.
        url: String,
    },

    /// The server answered with a status the transport does not classify.
    #[error(transparent)]
    UnexpectedStatus(#[from] UnexpectedStatusError),

    /// The caller cancelled the request before the exchange completed.
    #[error("Request was cancelled")]
    Cancelled,

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The request body could not be encoded.
    #[error("Cannot encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body could not be decoded.
    #[error("Cannot decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the server answered with 403 Forbidden.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Returns the HTTP status associated with the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::Empty { .. } => Some(204),
            Self::UnexpectedStatus(e) => Some(e.status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the validation error code, if the server sent one.
    #[must_use]
    pub fn error_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Validation(e) => e.code.as_ref(),
            _ => None,
        }
    }
}

/// Wire shape of the 400 error envelope.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorsEnvelope {
    #[serde(default)]
    errors: Vec<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    extensions: Option<WireExtensions>,
}

#[derive(Debug, Default, Deserialize)]
struct WireExtensions {
    #[serde(default)]
    code: Option<String>,
}

impl ErrorsEnvelope {
    /// Returns the first error of the envelope, if there is one.
    pub(crate) fn into_first(self) -> Option<ApiError> {
        self.errors.into_iter().next().map(|e| ApiError {
            message: e.message,
            code: e
                .extensions
                .and_then(|ext| ext.code)
                .filter(|code| !code.is_empty())
                .map(|code| ErrorCode::from(code.as_str())),
        })
    }
}
