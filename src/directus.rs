//! The resource registry: one entry point per Directus instance.
//!
//! [`Directus`] builds one [`HttpClient`] and binds every system resource to
//! a typed client sharing it. User collections are reached through
//! [`Directus::items`] and [`Directus::singleton`].
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::{AccessToken, Directus, DirectusConfig, InstanceUrl};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = DirectusConfig::builder()
//!     .instance(InstanceUrl::new("https://cms.example.com")?)
//!     .token(AccessToken::new("static-token")?)
//!     .build()?;
//! let directus = Directus::new(&config)?;
//! let cancel = CancellationToken::new();
//!
//! for role in directus.roles().list(&cancel, &[]).await? {
//!     match role.policies() {
//!         Some(policies) => println!("{} has {} policies", role.name(), policies.len()),
//!         None => println!("{}", role.name()),
//!     }
//! }
//!
//! let settings = directus.settings().get(&cancel, &[]).await?;
//! ```

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpError};
use crate::config::DirectusConfig;
use crate::resources::{
    Collection, CustomTranslation, Field, File, Flow, Folder, Permission, Policy,
    RelationDefinition, Server, Settings, User,
};
use crate::rest::{ItemsClient, ResourceError, RolesClient, SchemaClient, SingletonClient};

/// Typed clients for the system resources of one Directus instance.
///
/// Built once and never mutated; share it freely across tasks.
pub struct Directus {
    http: Arc<HttpClient>,
    roles: RolesClient,
    policies: ItemsClient<Policy>,
    permissions: ItemsClient<Permission, i64>,
    users: ItemsClient<User>,
    files: ItemsClient<File>,
    folders: ItemsClient<Folder>,
    flows: ItemsClient<Flow>,
    collections: ItemsClient<Collection>,
    translations: ItemsClient<CustomTranslation>,
    fields: SchemaClient<Field>,
    relations: SchemaClient<RelationDefinition>,
    settings: SingletonClient<Settings>,
    server: SingletonClient<Server>,
}

// Verify Directus is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Directus>();
};

impl Directus {
    /// Connects the registry to the configured instance.
    ///
    /// No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: &DirectusConfig) -> Result<Self, HttpError> {
        let http = Arc::new(HttpClient::new(config)?);

        Ok(Self {
            roles: RolesClient::new(Arc::clone(&http)),
            policies: ItemsClient::system(Arc::clone(&http), "policies"),
            permissions: ItemsClient::system(Arc::clone(&http), "permissions"),
            users: ItemsClient::system(Arc::clone(&http), "users"),
            files: ItemsClient::system(Arc::clone(&http), "files"),
            folders: ItemsClient::system(Arc::clone(&http), "folders"),
            flows: ItemsClient::system(Arc::clone(&http), "flows"),
            collections: ItemsClient::system(Arc::clone(&http), "collections"),
            translations: ItemsClient::system(Arc::clone(&http), "translations"),
            fields: SchemaClient::new(Arc::clone(&http)),
            relations: SchemaClient::new(Arc::clone(&http)),
            settings: SingletonClient::system(Arc::clone(&http), "settings"),
            server: SingletonClient::system(Arc::clone(&http), "server/info"),
            http,
        })
    }

    /// Returns a client for the user collection `collection`.
    ///
    /// `PK` is the primary key type of the collection: `String` for UUID or
    /// manual keys, `i64` for auto-increment keys.
    #[must_use]
    pub fn items<T, PK>(&self, collection: impl Into<String>) -> ItemsClient<T, PK> {
        ItemsClient::new(Arc::clone(&self.http), collection)
    }

    /// Returns a client for the singleton user collection `collection`.
    #[must_use]
    pub fn singleton<T>(&self, collection: impl Into<String>) -> SingletonClient<T> {
        SingletonClient::new(Arc::clone(&self.http), collection)
    }

    /// Fetches information about the instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure.
    pub async fn server_info(&self, cancel: &CancellationToken) -> Result<Server, ResourceError> {
        self.server.get(cancel, &[]).await
    }

    /// Returns the shared transport.
    #[must_use]
    pub const fn http_client(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Roles, in the shape of the server's major version.
    #[must_use]
    pub const fn roles(&self) -> &RolesClient {
        &self.roles
    }

    /// Access policies.
    #[must_use]
    pub const fn policies(&self) -> &ItemsClient<Policy> {
        &self.policies
    }

    /// Permissions, keyed by integer id.
    #[must_use]
    pub const fn permissions(&self) -> &ItemsClient<Permission, i64> {
        &self.permissions
    }

    /// User accounts.
    #[must_use]
    pub const fn users(&self) -> &ItemsClient<User> {
        &self.users
    }

    /// File metadata.
    #[must_use]
    pub const fn files(&self) -> &ItemsClient<File> {
        &self.files
    }

    /// File library folders.
    #[must_use]
    pub const fn folders(&self) -> &ItemsClient<Folder> {
        &self.folders
    }

    /// Automation flows.
    #[must_use]
    pub const fn flows(&self) -> &ItemsClient<Flow> {
        &self.flows
    }

    /// Collections, keyed by name.
    #[must_use]
    pub const fn collections(&self) -> &ItemsClient<Collection> {
        &self.collections
    }

    /// Custom translation strings.
    #[must_use]
    pub const fn translations(&self) -> &ItemsClient<CustomTranslation> {
        &self.translations
    }

    /// Fields of every collection.
    #[must_use]
    pub const fn fields(&self) -> &SchemaClient<Field> {
        &self.fields
    }

    /// Relations between collections.
    #[must_use]
    pub const fn relations(&self) -> &SchemaClient<RelationDefinition> {
        &self.relations
    }

    /// Project settings.
    #[must_use]
    pub const fn settings(&self) -> &SingletonClient<Settings> {
        &self.settings
    }
}

impl fmt::Debug for Directus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directus")
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, InstanceUrl};

    fn directus() -> Directus {
        let config = DirectusConfig::builder()
            .instance(InstanceUrl::new("https://cms.example.com/").unwrap())
            .token(AccessToken::new("secret-token").unwrap())
            .build()
            .unwrap();
        Directus::new(&config).unwrap()
    }

    #[test]
    fn test_system_endpoints() {
        let directus = directus();
        assert_eq!(directus.roles().endpoint(), "/roles");
        assert_eq!(directus.permissions().endpoint(), "/permissions");
        assert_eq!(directus.translations().endpoint(), "/translations");
        assert_eq!(directus.settings().endpoint(), "/settings");
        assert_eq!(directus.server.endpoint(), "/server/info");
    }

    #[test]
    fn test_system_clients_have_no_default_options() {
        let directus = directus();
        assert!(directus.users().default_options().is_empty());
        assert!(directus.policies().default_options().is_empty());
    }

    #[test]
    fn test_user_collection_factories() {
        let directus = directus();
        let articles: ItemsClient<serde_json::Value, i64> = directus.items("articles");
        assert_eq!(articles.endpoint(), "/items/articles");

        let home: SingletonClient<serde_json::Value> = directus.singleton("home");
        assert_eq!(home.endpoint(), "/items/home");
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", directus());
        assert!(rendered.contains("cms.example.com"));
        assert!(!rendered.contains("secret-token"));
    }
}
