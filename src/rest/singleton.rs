//! Access to singleton collections: exactly one implicit item, no id.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::rest::errors::ResourceError;
use crate::rest::items::{data_or_empty, ItemsClient};
use crate::rest::options::ReadOption;

/// Typed get/update client for a singleton collection or system endpoint.
///
/// # Example
///
/// ```rust,ignore
/// let settings = directus.settings().get(&cancel, &[]).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SingletonClient<T> {
    items: ItemsClient<T, String>,
}

impl<T> SingletonClient<T> {
    /// Creates a client for the singleton user collection `collection`.
    #[must_use]
    pub fn new(http: Arc<HttpClient>, collection: impl Into<String>) -> Self {
        Self {
            items: ItemsClient::new(http, collection),
        }
    }

    /// Creates a client for a singleton system endpoint such as `settings`.
    #[must_use]
    pub fn system(http: Arc<HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            items: ItemsClient::system(http, endpoint),
        }
    }

    /// Sets the options applied before every call's own options.
    #[must_use]
    pub fn with_defaults(self, defaults: impl IntoIterator<Item = ReadOption>) -> Self {
        Self {
            items: self.items.with_defaults(defaults),
        }
    }

    /// Returns the API path of the singleton.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.items.endpoint()
    }
}

impl<T: DeserializeOwned> SingletonClient<T> {
    /// Fetches the singleton.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the server returns no data, and
    /// [`ResourceError::Http`] for any transport failure.
    pub async fn get(
        &self,
        cancel: &CancellationToken,
        options: &[ReadOption],
    ) -> Result<T, ResourceError> {
        let builder = HttpRequest::builder(HttpMethod::Get, self.items.endpoint())
            .query(self.items.read_query(options, false).into_pairs());
        let response = self.items.send(cancel, builder).await?;
        response
            .data()?
            .ok_or_else(|| ResourceError::not_found(self.items.collection(), ""))
    }

    /// Updates the singleton and returns the server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure, including
    /// [`HttpError::Empty`] if the server returned no content.
    pub async fn update<P>(&self, cancel: &CancellationToken, patch: &P) -> Result<T, ResourceError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(patch).map_err(HttpError::Encode)?;
        let builder = HttpRequest::builder(HttpMethod::Patch, self.items.endpoint())
            .query(self.items.read_query(&[], false).into_pairs())
            .body(body);
        let response = self.items.send(cancel, builder).await?;
        data_or_empty(&response)
    }
}
