//! Error types for signing and verification.
//!
//! Verification failures fall into two groups. Rejections ([`SignatureError`]
//! kinds other than `Resolve`) are the expected outcome for bad, stale, or
//! forged tokens. Resolver failures ([`ResolveError`]) are operational
//! problems with the secret lookup and are reported separately.

/// Errors raised by a [`SecretResolver`](crate::SecretResolver).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No secret key is registered for the integration id.
    #[error("Unknown integration: {0}")]
    UnknownIntegration(String),

    /// The key store could not answer (backend error, timeout, cancellation).
    #[error("Secret lookup unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while signing or verifying a signature token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The token does not split into exactly three non-empty fields.
    #[error("Malformed signature token")]
    MalformedToken,

    /// The token names a different integration than the caller expects.
    #[error("Integration mismatch: expected {expected}, got {actual}")]
    IntegrationMismatch {
        /// The integration id the caller expects.
        expected: String,
        /// The integration id carried by the token.
        actual: String,
    },

    /// The secret key could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The timestamp field is not a non-negative decimal integer.
    #[error("Unparsable timestamp: {0}")]
    UnparsableTimestamp(String),

    /// The token timestamp is outside the tolerance window.
    #[error("Timestamp {timestamp_ms} is outside the {tolerance_ms}ms tolerance (now {now_ms})")]
    TimestampOutOfTolerance {
        /// Timestamp carried by the token.
        timestamp_ms: u64,
        /// Verifier clock reading.
        now_ms: u64,
        /// Configured tolerance.
        tolerance_ms: u64,
    },

    /// The recomputed MAC does not match the token MAC.
    #[error("Signature does not match")]
    MacMismatch,

    /// The payload cannot be represented in the JSON data model.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl SignatureError {
    /// Whether this is a plain rejection of the token rather than a lookup failure.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Resolve(_))
    }
}
