//! HTTP response type for the Directus client.
//!
//! Directus wraps every payload in a `{"data": ...}` envelope.
//! [`HttpResponse::data`] unwraps it.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::errors::{ErrorsEnvelope, HttpError};
use crate::clients::http_request::HttpMethod;

#[derive(Deserialize)]
struct Reply<T> {
    #[serde(default = "Option::default")]
    data: Option<T>,
}

/// A response received from Directus.
///
/// # Example
///
/// ```rust
/// use directus_api::clients::{HttpMethod, HttpResponse};
///
/// let response = HttpResponse::new(
///     HttpMethod::Get,
///     "https://cms.example.com/items/articles/1",
///     200,
///     br#"{"data":{"id":1}}"#.to_vec(),
/// );
///
/// let data: Option<serde_json::Value> = response.data().unwrap();
/// assert_eq!(data.unwrap()["id"], 1);
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The method of the request that produced this response.
    pub method: HttpMethod,
    /// The full URL of the request, including the query string.
    pub url: String,
    /// HTTP status code.
    pub code: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>, code: u16, body: Vec<u8>) -> Self {
        Self {
            method,
            url: url.into(),
            code,
            body,
        }
    }

    /// Returns `true` if the response has no body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Decodes the `data` member of the reply envelope.
    ///
    /// Returns `Ok(None)` when the body is empty or `data` is `null` or
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body is not a valid envelope for `T`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<Option<T>, HttpError> {
        if self.is_empty() {
            return Ok(None);
        }
        let reply: Reply<T> = serde_json::from_slice(&self.body).map_err(HttpError::Decode)?;
        Ok(reply.data)
    }

    /// Decodes the 400 error envelope and returns its first entry.
    pub(crate) fn first_error(&self) -> Option<crate::clients::ApiError> {
        serde_json::from_slice::<ErrorsEnvelope>(&self.body)
            .ok()
            .and_then(ErrorsEnvelope::into_first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(
            HttpMethod::Get,
            "https://cms.example.com/items/articles",
            code,
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_new_keeps_request_context() {
        let response = response(403, "");
        assert_eq!(response.method, HttpMethod::Get);
        assert_eq!(response.url, "https://cms.example.com/items/articles");
        assert_eq!(response.code, 403);
        assert!(response.is_empty());
    }

    #[test]
    fn test_data_unwraps_envelope() {
        let data: Option<Vec<serde_json::Value>> = response(200, r#"{"data":[{"id":1},{"id":2}]}"#)
            .data()
            .unwrap();
        assert_eq!(data.unwrap(), vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_data_is_none_for_empty_body_or_null() {
        let data: Option<serde_json::Value> = response(200, "").data().unwrap();
        assert!(data.is_none());

        let data: Option<serde_json::Value> = response(200, "  \n").data().unwrap();
        assert!(data.is_none());

        let data: Option<serde_json::Value> = response(200, r#"{"data":null}"#).data().unwrap();
        assert!(data.is_none());

        let data: Option<serde_json::Value> = response(200, "{}").data().unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_data_reports_decode_errors() {
        let result: Result<Option<Vec<String>>, _> = response(200, r#"{"data":42}"#).data();
        assert!(matches!(result, Err(HttpError::Decode(_))));

        let result: Result<Option<serde_json::Value>, _> = response(200, "not json").data();
        assert!(matches!(result, Err(HttpError::Decode(_))));
    }

    #[test]
    fn test_first_error() {
        let error = response(
            400,
            r#"{"errors":[{"message":"bad","extensions":{"code":"INVALID_PAYLOAD"}}]}"#,
        )
        .first_error()
        .unwrap();
        assert_eq!(error.message, "bad");

        assert!(response(400, r#"{"errors":[]}"#).first_error().is_none());
        assert!(response(400, "").first_error().is_none());
        assert!(response(400, "<html>").first_error().is_none());
    }
}
