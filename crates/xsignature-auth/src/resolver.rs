//! Secret key resolution.
//!
//! The verifier never stores keys. It asks a [`SecretResolver`] for the key of
//! the integration named in the token. Lookups may be blocking or async;
//! blocking ones are adapted with [`SyncFnResolver`].
//!
//! # Object safety
//!
//! The trait uses `#[async_trait]` so it can be used behind `&dyn` and `Arc<dyn>`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use xsignature_core::SecretKey;

use crate::error::ResolveError;

/// Looks up the pre-shared secret key of an integration.
///
/// Implementations may back this with a database, a secrets manager, or any
/// other key store. Retries and timeouts belong to the implementation.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Retrieve the secret key for the given integration id.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownIntegration`] if the id is not registered,
    /// or [`ResolveError::Unavailable`] if the key store cannot answer.
    async fn resolve(&self, integration_id: &str) -> Result<SecretKey, ResolveError>;
}

#[async_trait]
impl<R: SecretResolver + ?Sized> SecretResolver for Arc<R> {
    async fn resolve(&self, integration_id: &str) -> Result<SecretKey, ResolveError> {
        (**self).resolve(integration_id).await
    }
}

/// A simple in-memory resolver backed by a `HashMap`.
///
/// Suitable for tests and development. Production deployments implement
/// [`SecretResolver`] over their own key store.
///
/// # Examples
///
/// ```
/// use xsignature_auth::resolver::StaticSecretResolver;
///
/// let resolver = StaticSecretResolver::new(vec![
///     ("partner-xyz".to_owned(), "super-secret-key-12345".to_owned()),
/// ]);
/// assert_eq!(resolver.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSecretResolver {
    keys: HashMap<String, SecretKey>,
}

impl StaticSecretResolver {
    /// Create a resolver from (integration_id, secret_key) pairs.
    pub fn new(keys: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|(id, key)| (id, SecretKey::from(key)))
                .collect(),
        }
    }

    /// Number of registered integrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no integration is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl SecretResolver for StaticSecretResolver {
    async fn resolve(&self, integration_id: &str) -> Result<SecretKey, ResolveError> {
        self.keys
            .get(integration_id)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownIntegration(integration_id.to_owned()))
    }
}

/// Adapts an async closure into a [`SecretResolver`].
///
/// The closure receives an owned integration id so the returned future does
/// not borrow from the caller.
///
/// # Examples
///
/// ```
/// use xsignature_auth::ResolveError;
/// use xsignature_auth::resolver::FnResolver;
/// use xsignature_core::SecretKey;
///
/// let resolver = FnResolver::new(|id: String| async move {
///     match id.as_str() {
///         "partner-xyz" => Ok(SecretKey::from("super-secret-key-12345")),
///         _ => Err(ResolveError::UnknownIntegration(id)),
///     }
/// });
/// # let _ = resolver;
/// ```
#[derive(Debug, Clone)]
pub struct FnResolver<F> {
    lookup: F,
}

impl<F> FnResolver<F> {
    /// Wrap an async lookup function.
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<F, Fut> SecretResolver for FnResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<SecretKey, ResolveError>> + Send,
{
    async fn resolve(&self, integration_id: &str) -> Result<SecretKey, ResolveError> {
        (self.lookup)(integration_id.to_owned()).await
    }
}

/// Adapts a blocking lookup function into a [`SecretResolver`].
#[derive(Debug, Clone)]
pub struct SyncFnResolver<F> {
    lookup: F,
}

impl<F> SyncFnResolver<F> {
    /// Wrap a blocking lookup function.
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<F> SecretResolver for SyncFnResolver<F>
where
    F: Fn(&str) -> Result<SecretKey, ResolveError> + Send + Sync,
{
    async fn resolve(&self, integration_id: &str) -> Result<SecretKey, ResolveError> {
        (self.lookup)(integration_id)
    }
}
