//! Roles, addressed in the shape of the connected server.
//!
//! Directus 11 moved access flags from roles to policies. The roles client
//! reads `/server/info` once, remembers the major version, and reads and
//! writes [`RoleV10`] or [`Role`] accordingly:
//!
//! | Server | Shape | Default read options |
//! |--------|-------|----------------------|
//! | 10.x | [`VersionedRole::V10`] | none |
//! | 11.x and later | [`VersionedRole::V11`] | `fields[]=*,policies.id,policies.policy` |
//!
//! Any other version, or a server that hides its version from the token,
//! fails with [`ResourceError::UnsupportedVersion`].

use std::sync::Arc;

use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::clients::HttpClient;
use crate::resources::{Role, RoleV10, Server, VersionedRole};
use crate::rest::errors::ResourceError;
use crate::rest::items::ItemsClient;
use crate::rest::options::ReadOption;
use crate::rest::singleton::SingletonClient;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoleGeneration {
    V10,
    V11,
}

impl RoleGeneration {
    fn of(server: &Server) -> Result<Self, ResourceError> {
        match server.version_major_minor() {
            Some((10, _)) => Ok(Self::V10),
            Some((major, _)) if major >= 11 => Ok(Self::V11),
            _ => Err(ResourceError::UnsupportedVersion {
                version: server.version.clone(),
            }),
        }
    }

    const fn major(self) -> u32 {
        match self {
            Self::V10 => 10,
            Self::V11 => 11,
        }
    }
}

/// Version-aware client for `/roles`.
///
/// Clones share the detected server version.
#[derive(Clone, Debug)]
pub struct RolesClient {
    v10: ItemsClient<RoleV10>,
    v11: ItemsClient<Role>,
    server: SingletonClient<Server>,
    generation: Arc<OnceCell<RoleGeneration>>,
}

// Verify RolesClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RolesClient>();
};

impl RolesClient {
    /// Creates a roles client on the shared transport.
    #[must_use]
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            v10: ItemsClient::system(Arc::clone(&http), "roles"),
            v11: ItemsClient::system(Arc::clone(&http), "roles").with_defaults([
                ReadOption::fields(["*", "policies.id", "policies.policy"]),
            ]),
            server: SingletonClient::system(http, "server/info"),
            generation: Arc::new(OnceCell::new()),
        }
    }

    /// Returns the API path of the roles collection.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.v11.endpoint()
    }

    /// Returns the major version the role shape is chosen for, fetching
    /// `/server/info` on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedVersion`] for servers older than
    /// Directus 10 or hiding their version, and [`ResourceError::Http`] if
    /// the server info cannot be read.
    pub async fn server_major_version(
        &self,
        cancel: &CancellationToken,
    ) -> Result<u32, ResourceError> {
        Ok(self.generation(cancel).await?.major())
    }

    async fn generation(&self, cancel: &CancellationToken) -> Result<RoleGeneration, ResourceError> {
        self.generation
            .get_or_try_init(|| async {
                let server = self.server.get(cancel, &[]).await?;
                let generation = RoleGeneration::of(&server)?;
                tracing::debug!(version = %server.version, ?generation, "directus role shape");
                Ok::<_, ResourceError>(generation)
            })
            .await
            .copied()
    }

    /// Lists every role.
    ///
    /// # Errors
    ///
    /// See [`ItemsClient::list`] and [`RolesClient::server_major_version`].
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        options: &[ReadOption],
    ) -> Result<Vec<VersionedRole>, ResourceError> {
        match self.generation(cancel).await? {
            RoleGeneration::V10 => Ok(wrap(self.v10.list(cancel, options).await?)),
            RoleGeneration::V11 => Ok(wrap(self.v11.list(cancel, options).await?)),
        }
    }

    /// Fetches one role.
    ///
    /// # Errors
    ///
    /// See [`ItemsClient::get`] and [`RolesClient::server_major_version`].
    pub async fn get(
        &self,
        cancel: &CancellationToken,
        id: impl Into<String>,
        options: &[ReadOption],
    ) -> Result<VersionedRole, ResourceError> {
        match self.generation(cancel).await? {
            RoleGeneration::V10 => self.v10.get(cancel, id, options).await.map(Into::into),
            RoleGeneration::V11 => self.v11.get(cancel, id, options).await.map(Into::into),
        }
    }

    /// Creates a role.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RoleShapeMismatch`] without any request if
    /// `role` is not in the server's shape; otherwise see
    /// [`ItemsClient::create`].
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        role: &VersionedRole,
    ) -> Result<VersionedRole, ResourceError> {
        match (self.generation(cancel).await?, role) {
            (RoleGeneration::V10, VersionedRole::V10(role)) => {
                self.v10.create(cancel, role).await.map(Into::into)
            }
            (RoleGeneration::V11, VersionedRole::V11(role)) => {
                self.v11.create(cancel, role).await.map(Into::into)
            }
            (generation, _) => Err(mismatch(generation)),
        }
    }

    /// Updates a role. A Directus 11 role sends its policy changes as
    /// alterations.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RoleShapeMismatch`] without any request if
    /// `role` is not in the server's shape; otherwise see
    /// [`ItemsClient::update`].
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        id: impl Into<String>,
        role: &VersionedRole,
    ) -> Result<VersionedRole, ResourceError> {
        match (self.generation(cancel).await?, role) {
            (RoleGeneration::V10, VersionedRole::V10(role)) => {
                self.v10.update(cancel, id, role).await.map(Into::into)
            }
            (RoleGeneration::V11, VersionedRole::V11(role)) => {
                self.v11.update(cancel, id, role).await.map(Into::into)
            }
            (generation, _) => Err(mismatch(generation)),
        }
    }

    /// Deletes a role. The endpoint is the same on every version, so no
    /// server info is read.
    ///
    /// # Errors
    ///
    /// See [`ItemsClient::delete`].
    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        id: impl Into<String>,
    ) -> Result<(), ResourceError> {
        self.v11.delete(cancel, id).await
    }
}

fn wrap<R: Into<VersionedRole>>(roles: Vec<R>) -> Vec<VersionedRole> {
    roles.into_iter().map(Into::into).collect()
}

const fn mismatch(generation: RoleGeneration) -> ResourceError {
    ResourceError::RoleShapeMismatch {
        expected: generation.major(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(version: &str) -> Server {
        Server {
            version: version.to_string(),
            ..Server::default()
        }
    }

    #[test]
    fn test_generation_by_major_version() {
        assert_eq!(RoleGeneration::of(&server("10.0.0")).unwrap(), RoleGeneration::V10);
        assert_eq!(RoleGeneration::of(&server("10.13.1")).unwrap(), RoleGeneration::V10);
        assert_eq!(RoleGeneration::of(&server("11.0.2")).unwrap(), RoleGeneration::V11);
        assert_eq!(RoleGeneration::of(&server("11.5.1")).unwrap(), RoleGeneration::V11);
    }

    #[test]
    fn test_unknown_versions_are_unsupported() {
        for version in ["9.26.0", "", "latest"] {
            match RoleGeneration::of(&server(version)) {
                Err(ResourceError::UnsupportedVersion { version: reported }) => {
                    assert_eq!(reported, version);
                }
                other => panic!("expected unsupported version, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_mismatch_reports_expected_major() {
        assert!(matches!(
            mismatch(RoleGeneration::V10),
            ResourceError::RoleShapeMismatch { expected: 10 }
        ));
    }
}
