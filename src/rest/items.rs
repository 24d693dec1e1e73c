//! Generic CRUD access to a Directus collection.
//!
//! [`ItemsClient<T, PK>`] is parametrized over the item shape `T` and the
//! primary key `PK` (`String` or `i64`). The same client serves user
//! collections (`/items/{collection}`) and system endpoints (`/roles`,
//! `/permissions`, ...).
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::rest::{Filter, ItemsClient, ReadOption};
//! use tokio_util::sync::CancellationToken;
//!
//! let articles: ItemsClient<Article> = directus.items("articles");
//! let cancel = CancellationToken::new();
//!
//! let published = articles
//!     .filter(&cancel, &Filter::eq("status", "published"), &[ReadOption::sort(["-date"])])
//!     .await?;
//!
//! let article = articles.get(&cancel, "4f1c", &[]).await?;
//! articles.update(&cancel, "4f1c", &serde_json::json!({"title": "New"})).await?;
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse};
use crate::rest::errors::ResourceError;
use crate::rest::filter::Filter;
use crate::rest::options::{ReadOption, ReadQuery};
use crate::rest::primary_key::PrimaryKey;

/// Typed CRUD client for one collection.
///
/// Holds no per-call state; clones share the transport.
pub struct ItemsClient<T, PK = String> {
    http: Arc<HttpClient>,
    endpoint: String,
    collection: String,
    defaults: Vec<ReadOption>,
    marker: PhantomData<fn() -> (T, PK)>,
}

impl<T, PK> ItemsClient<T, PK> {
    /// Creates a client for the user collection `collection`.
    #[must_use]
    pub fn new(http: Arc<HttpClient>, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        Self {
            http,
            endpoint: format!("/items/{}", urlencoding::encode(&collection)),
            collection,
            defaults: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Creates a client for a system endpoint such as `roles`.
    #[must_use]
    pub fn system(http: Arc<HttpClient>, endpoint: impl Into<String>) -> Self {
        let collection = endpoint.into();
        Self {
            http,
            endpoint: format!("/{}", collection.trim_matches('/')),
            collection,
            defaults: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Sets the options applied before every call's own options.
    #[must_use]
    pub fn with_defaults(mut self, defaults: impl IntoIterator<Item = ReadOption>) -> Self {
        self.defaults = defaults.into_iter().collect();
        self
    }

    /// Returns the collection or system endpoint name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the API path of the collection.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the default options.
    #[must_use]
    pub fn default_options(&self) -> &[ReadOption] {
        &self.defaults
    }

    pub(crate) fn read_query(&self, options: &[ReadOption], unlimited: bool) -> ReadQuery {
        let mut query = ReadQuery::new();
        if unlimited {
            query.apply(&ReadOption::Unlimited);
        }
        query.apply_all(&self.defaults);
        query.apply_all(options);
        query
    }

    pub(crate) async fn send(
        &self,
        cancel: &CancellationToken,
        builder: HttpRequestBuilder,
    ) -> Result<HttpResponse, HttpError> {
        let request = builder.build()?;
        self.http.request(cancel, request).await
    }

    fn not_found(&self, id: impl ToString) -> ResourceError {
        ResourceError::not_found(&self.collection, id)
    }
}

impl<T, PK> ItemsClient<T, PK>
where
    T: DeserializeOwned,
    PK: PrimaryKey,
{
    fn item_path(&self, id: &PK) -> String {
        format!("{}/{}", self.endpoint, id.path_segment())
    }

    async fn fetch_list(
        &self,
        cancel: &CancellationToken,
        query: ReadQuery,
    ) -> Result<Vec<T>, ResourceError> {
        let builder = HttpRequest::builder(HttpMethod::Get, &self.endpoint).query(query.into_pairs());
        let response = self.send(cancel, builder).await?;
        Ok(response.data()?.unwrap_or_default())
    }

    /// Lists every item of the collection.
    ///
    /// Requests all items (`limit=-1`) unless a limit option overrides it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        options: &[ReadOption],
    ) -> Result<Vec<T>, ResourceError> {
        self.fetch_list(cancel, self.read_query(options, true)).await
    }

    /// Lists the items matching `filter`.
    ///
    /// Deep filters in `options` apply to nested relations independently of
    /// the top-level filter.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure, including
    /// a malformed filter rejected by the server.
    pub async fn filter(
        &self,
        cancel: &CancellationToken,
        filter: &Filter,
        options: &[ReadOption],
    ) -> Result<Vec<T>, ResourceError> {
        let mut query = self.read_query(options, true);
        query.set("filter", filter.to_json());
        self.fetch_list(cancel, query).await
    }

    /// Fetches one item by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] without any request when `id` is
    /// empty, and when the server answers 403 or returns no data.
    pub async fn get(
        &self,
        cancel: &CancellationToken,
        id: impl Into<PK>,
        options: &[ReadOption],
    ) -> Result<T, ResourceError> {
        let id = id.into();
        if id.is_blank() {
            return Err(self.not_found(&id));
        }

        let builder = HttpRequest::builder(HttpMethod::Get, self.item_path(&id))
            .query(self.read_query(options, false).into_pairs());
        match self.send(cancel, builder).await {
            Ok(response) => response.data()?.ok_or_else(|| self.not_found(&id)),
            Err(e) if e.is_forbidden() => {
                tracing::debug!(collection = %self.collection, id = %id, "directus denied access, reporting item as missing");
                Err(self.not_found(&id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates an item and returns the server's copy of it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure, including
    /// [`HttpError::Empty`] if the server returned no content.
    pub async fn create<P>(&self, cancel: &CancellationToken, item: &P) -> Result<T, ResourceError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(item).map_err(HttpError::Encode)?;
        let builder = HttpRequest::builder(HttpMethod::Post, &self.endpoint)
            .query(self.read_query(&[], false).into_pairs())
            .body(body);
        let response = self.send(cancel, builder).await?;
        data_or_empty(&response)
    }

    /// Updates the fields present in `patch` and returns the server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when `id` is empty or the server
    /// answers 204 No Content, and [`ResourceError::Http`] otherwise.
    pub async fn update<P>(
        &self,
        cancel: &CancellationToken,
        id: impl Into<PK>,
        patch: &P,
    ) -> Result<T, ResourceError>
    where
        P: Serialize + ?Sized,
    {
        let id = id.into();
        if id.is_blank() {
            return Err(self.not_found(&id));
        }

        let body = serde_json::to_value(patch).map_err(HttpError::Encode)?;
        let builder = HttpRequest::builder(HttpMethod::Patch, self.item_path(&id))
            .query(self.read_query(&[], false).into_pairs())
            .body(body);
        match self.send(cancel, builder).await {
            Ok(response) => data_or_empty(&response),
            Err(HttpError::Empty { .. }) => Err(self.not_found(&id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] without any request when `id` is
    /// empty, and [`ResourceError::Http`] for any transport failure.
    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        id: impl Into<PK>,
    ) -> Result<(), ResourceError> {
        let id = id.into();
        if id.is_blank() {
            return Err(self.not_found(&id));
        }

        let builder = HttpRequest::builder(HttpMethod::Delete, self.item_path(&id));
        self.send(cancel, builder).await?;
        Ok(())
    }
}

/// Decodes the reply envelope, treating missing data as an empty reply.
pub(crate) fn data_or_empty<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<T, ResourceError> {
    response.data()?.ok_or_else(|| {
        ResourceError::Http(HttpError::Empty {
            method: response.method,
            url: response.url.clone(),
        })
    })
}

impl<T, PK> Clone for ItemsClient<T, PK> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            endpoint: self.endpoint.clone(),
            collection: self.collection.clone(),
            defaults: self.defaults.clone(),
            marker: PhantomData,
        }
    }
}

impl<T, PK> fmt::Debug for ItemsClient<T, PK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemsClient")
            .field("endpoint", &self.endpoint)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

// Verify ItemsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ItemsClient<serde_json::Value, String>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, DirectusConfig, InstanceUrl};

    fn http() -> Arc<HttpClient> {
        let config = DirectusConfig::builder()
            .instance(InstanceUrl::new("https://cms.example.com").unwrap())
            .token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();
        Arc::new(HttpClient::new(&config).unwrap())
    }

    #[test]
    fn test_user_collection_endpoint() {
        let client: ItemsClient<serde_json::Value> = ItemsClient::new(http(), "articles");
        assert_eq!(client.endpoint(), "/items/articles");
        assert_eq!(client.collection(), "articles");
    }

    #[test]
    fn test_system_endpoint() {
        let client: ItemsClient<serde_json::Value, i64> = ItemsClient::system(http(), "permissions");
        assert_eq!(client.endpoint(), "/permissions");
        assert_eq!(client.item_path(&42), "/permissions/42");
    }

    #[test]
    fn test_item_path_encodes_string_keys() {
        let client: ItemsClient<serde_json::Value> = ItemsClient::new(http(), "pages");
        assert_eq!(
            client.item_path(&"about/team".to_string()),
            "/items/pages/about%2Fteam"
        );
    }

    #[test]
    fn test_list_query_seeds_unlimited_then_defaults_then_options() {
        let client: ItemsClient<serde_json::Value> = ItemsClient::new(http(), "articles")
            .with_defaults([ReadOption::fields(["*"]), ReadOption::limit(50)]);

        let query = client.read_query(&[], true);
        assert_eq!(query.get("limit"), Some(&["50".to_string()][..]));

        let query = client.read_query(&[ReadOption::limit(5)], true);
        assert_eq!(query.get("limit"), Some(&["5".to_string()][..]));
        assert_eq!(query.get("fields[]"), Some(&["*".to_string()][..]));

        let client: ItemsClient<serde_json::Value> = ItemsClient::new(http(), "articles");
        assert_eq!(
            client.read_query(&[], true).get("limit"),
            Some(&["-1".to_string()][..])
        );
        assert!(client.read_query(&[], false).get("limit").is_none());
    }

    #[test]
    fn test_clone_shares_configuration() {
        let client: ItemsClient<serde_json::Value> =
            ItemsClient::new(http(), "articles").with_defaults([ReadOption::sort(["id"])]);
        let cloned = client.clone();
        assert_eq!(cloned.endpoint(), client.endpoint());
        assert_eq!(cloned.default_options(), client.default_options());
    }
}
