//! Clients for schema objects addressed by a `(collection, field)` pair.
//!
//! Fields and relations have no single primary key. Both are listed globally
//! or per collection, and addressed individually under
//! `/{endpoint}/{collection}/{field}`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse};
use crate::rest::errors::ResourceError;
use crate::rest::items::data_or_empty;

/// An object addressed by its collection and field name.
pub trait SchemaObject: Serialize + DeserializeOwned {
    /// The system endpoint, e.g. `fields`.
    const ENDPOINT: &'static str;

    /// The name used in error messages, e.g. `field`.
    const RESOURCE: &'static str;

    /// Whether new objects are posted under `/{endpoint}/{collection}`
    /// rather than the bare endpoint.
    const CREATE_IN_COLLECTION: bool;

    /// The collection the object belongs to.
    fn collection(&self) -> &str;

    /// The field the object describes.
    fn field(&self) -> &str;
}

/// CRUD client for a [`SchemaObject`] type.
pub struct SchemaClient<T> {
    http: Arc<HttpClient>,
    marker: PhantomData<fn() -> T>,
}

impl<T: SchemaObject> SchemaClient<T> {
    /// Creates a client sharing `http`.
    #[must_use]
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            marker: PhantomData,
        }
    }

    fn collection_path(collection: &str) -> String {
        format!("/{}/{}", T::ENDPOINT, urlencoding::encode(collection))
    }

    fn object_path(collection: &str, field: &str) -> String {
        format!(
            "{}/{}",
            Self::collection_path(collection),
            urlencoding::encode(field)
        )
    }

    const fn missing(key: &'static str) -> ResourceError {
        ResourceError::MissingKey {
            resource: T::RESOURCE,
            key,
        }
    }

    async fn send(
        &self,
        cancel: &CancellationToken,
        builder: HttpRequestBuilder,
    ) -> Result<HttpResponse, HttpError> {
        self.http.request(cancel, builder.build()?).await
    }

    async fn fetch_list(
        &self,
        cancel: &CancellationToken,
        path: String,
    ) -> Result<Vec<T>, ResourceError> {
        let response = self
            .send(cancel, HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        Ok(response.data()?.unwrap_or_default())
    }

    /// Lists the objects of every collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure.
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<T>, ResourceError> {
        self.fetch_list(cancel, format!("/{}", T::ENDPOINT)).await
    }

    /// Lists the objects of one collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] if `collection` is empty.
    pub async fn list_collection(
        &self,
        cancel: &CancellationToken,
        collection: &str,
    ) -> Result<Vec<T>, ResourceError> {
        if collection.is_empty() {
            return Err(Self::missing("collection"));
        }
        self.fetch_list(cancel, Self::collection_path(collection))
            .await
    }

    /// Fetches one object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] for an empty key, a 403 reply or
    /// a reply without data.
    pub async fn get(
        &self,
        cancel: &CancellationToken,
        collection: &str,
        field: &str,
    ) -> Result<T, ResourceError> {
        let not_found = || ResourceError::not_found(T::ENDPOINT, format!("{collection}.{field}"));
        if collection.is_empty() || field.is_empty() {
            return Err(not_found());
        }

        let builder = HttpRequest::builder(HttpMethod::Get, Self::object_path(collection, field));
        match self.send(cancel, builder).await {
            Ok(response) => response.data()?.ok_or_else(not_found),
            Err(e) if e.is_forbidden() => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Creates an object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] without any request if the
    /// object has no collection.
    pub async fn create(&self, cancel: &CancellationToken, object: &T) -> Result<T, ResourceError> {
        if object.collection().is_empty() {
            return Err(Self::missing("collection"));
        }

        let path = if T::CREATE_IN_COLLECTION {
            Self::collection_path(object.collection())
        } else {
            format!("/{}", T::ENDPOINT)
        };
        let body = serde_json::to_value(object).map_err(HttpError::Encode)?;
        let response = self
            .send(cancel, HttpRequest::builder(HttpMethod::Post, path).body(body))
            .await?;
        data_or_empty(&response)
    }

    /// Updates an object addressed by its own collection and field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] without any request if the
    /// collection or field is empty.
    pub async fn update(&self, cancel: &CancellationToken, object: &T) -> Result<T, ResourceError> {
        if object.collection().is_empty() {
            return Err(Self::missing("collection"));
        }
        if object.field().is_empty() {
            return Err(Self::missing("name"));
        }

        let path = Self::object_path(object.collection(), object.field());
        let body = serde_json::to_value(object).map_err(HttpError::Encode)?;
        let response = self
            .send(cancel, HttpRequest::builder(HttpMethod::Patch, path).body(body))
            .await?;
        data_or_empty(&response)
    }

    /// Deletes an object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] without any request if either
    /// key is empty.
    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        collection: &str,
        field: &str,
    ) -> Result<(), ResourceError> {
        if collection.is_empty() {
            return Err(Self::missing("collection"));
        }
        if field.is_empty() {
            return Err(Self::missing("name"));
        }

        let builder =
            HttpRequest::builder(HttpMethod::Delete, Self::object_path(collection, field));
        self.send(cancel, builder).await?;
        Ok(())
    }
}

impl<T> Clone for SchemaClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            marker: PhantomData,
        }
    }
}

impl<T: SchemaObject> fmt::Debug for SchemaClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaClient")
            .field("endpoint", &T::ENDPOINT)
            .finish_non_exhaustive()
    }
}
