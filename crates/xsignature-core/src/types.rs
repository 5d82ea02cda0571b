//! Identifier and key types shared by signer and verifier.

use std::fmt;

/// Partner integration identifier, the first field of a signature token.
///
/// The token format has no escaping, so a valid identifier is non-empty and
/// contains no `.` character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IntegrationId(String);

impl IntegrationId {
    /// Field separator used by the token format.
    pub const SEPARATOR: char = '.';

    /// Create a new integration id.
    ///
    /// # Errors
    /// Returns an error if the id is empty or contains the token separator.
    pub fn new(id: impl Into<String>) -> Result<Self, crate::XsignatureError> {
        let id = id.into();
        if id.is_empty() || id.contains(Self::SEPARATOR) {
            return Err(crate::XsignatureError::InvalidIntegrationId(id));
        }
        Ok(Self(id))
    }

    /// Get the integration id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IntegrationId {
    type Error = crate::XsignatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntegrationId> for String {
    fn from(id: IntegrationId) -> Self {
        id.0
    }
}

impl AsRef<str> for IntegrationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntegrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pre-shared secret key for one integration.
///
/// The `Debug` output is redacted so keys never reach logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Wrap a secret key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Access the raw key material.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The key as bytes, the form fed to the MAC.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for SecretKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for SecretKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(\"[redacted]\")")
    }
}
