//! Signature verification.
//!
//! The verification flow, with every step short-circuiting on failure:
//!
//! 1. Parse the token into integration id, timestamp, and MAC.
//! 2. If an expected integration id is configured, require the token to carry it.
//! 3. Resolve the secret key for the token's integration id.
//! 4. Parse the timestamp and check it is within the tolerance window of the
//!    local clock, in either direction.
//! 5. Recompute the MAC over the canonical payload and the timestamp string as
//!    it appears in the token.
//! 6. Compare the MACs in constant time.
//!
//! [`verify`] reports each failure kind. [`validate`] collapses rejections
//! into `Ok(false)` and only surfaces resolver failures as errors.

use serde::Serialize;
use tracing::{debug, warn};
use xsignature_core::{DEFAULT_TOLERANCE_MS, IntegrationId, SecretKey, SignatureConfig};

use crate::canonical::canonicalize_payload;
use crate::compare::timing_safe_eq;
use crate::error::{ResolveError, SignatureError};
use crate::resolver::SecretResolver;
use crate::sign::{compute_mac, current_timestamp_millis};
use crate::token::SignatureToken;

/// Per-call verification settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Maximum allowed distance between the token timestamp and the local clock.
    pub tolerance_ms: u64,
    /// When set, tokens naming any other integration are rejected before the
    /// secret key is resolved.
    pub expected_integration_id: Option<IntegrationId>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            tolerance_ms: DEFAULT_TOLERANCE_MS,
            expected_integration_id: None,
        }
    }
}

impl VerifyOptions {
    /// Set the tolerance window.
    #[must_use]
    pub fn with_tolerance_ms(mut self, tolerance_ms: u64) -> Self {
        self.tolerance_ms = tolerance_ms;
        self
    }

    /// Require tokens to carry `integration_id`.
    #[must_use]
    pub fn with_expected_integration_id(mut self, integration_id: IntegrationId) -> Self {
        self.expected_integration_id = Some(integration_id);
        self
    }
}

impl From<&SignatureConfig> for VerifyOptions {
    fn from(config: &SignatureConfig) -> Self {
        Self {
            tolerance_ms: config.tolerance_ms,
            expected_integration_id: config.enforced_integration_id().cloned(),
        }
    }
}

/// The result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// The integration id that signed the payload.
    pub integration_id: String,
    /// The token timestamp in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Verify a signature token against a payload using the local clock.
///
/// # Errors
///
/// Returns [`SignatureError::Resolve`] if the resolver fails, or another
/// [`SignatureError`] kind if the token is rejected.
pub async fn verify<T: Serialize + ?Sized>(
    token: &str,
    payload: &T,
    resolver: &dyn SecretResolver,
    options: &VerifyOptions,
) -> Result<Verified, SignatureError> {
    verify_at(token, payload, resolver, options, current_timestamp_millis()).await
}

/// Verify a signature token against a payload with an explicit clock reading.
///
/// # Errors
///
/// Returns [`SignatureError::Resolve`] if the resolver fails, or another
/// [`SignatureError`] kind if the token is rejected.
pub async fn verify_at<T: Serialize + ?Sized>(
    token: &str,
    payload: &T,
    resolver: &dyn SecretResolver,
    options: &VerifyOptions,
    now_ms: u64,
) -> Result<Verified, SignatureError> {
    let parsed = SignatureToken::parse(token).inspect_err(|_| {
        debug!("Rejected malformed signature token");
    })?;

    check_expected_integration(&parsed, options)?;

    debug!(integration_id = %parsed.integration_id, "Resolving secret key");
    let secret_key = resolver
        .resolve(&parsed.integration_id)
        .await
        .inspect_err(|e| {
            warn!(integration_id = %parsed.integration_id, error = %e, "Secret key lookup failed");
        })?;

    check_token(&parsed, payload, &secret_key, options.tolerance_ms, now_ms)
}

/// Validate a signature token, collapsing every rejection into `false`.
///
/// # Errors
///
/// Returns the resolver's [`ResolveError`] if the secret key lookup fails, so
/// an unknown integration is distinguishable from a bad signature.
///
/// # Examples
///
/// ```
/// # tokio_test::block_on(async {
/// use serde_json::json;
/// use xsignature_auth::{StaticSecretResolver, generate, validate};
///
/// let resolver = StaticSecretResolver::new(vec![
///     ("partner-xyz".to_owned(), "super-secret-key-12345".to_owned()),
/// ]);
/// let body = json!({"userId": "12345"});
/// let token = generate(&body, "partner-xyz", "super-secret-key-12345").unwrap();
///
/// assert!(validate(&token, &body, &resolver, 300_000).await.unwrap());
/// assert!(!validate(&token, &json!({"userId": "54321"}), &resolver, 300_000).await.unwrap());
/// # });
/// ```
pub async fn validate<T: Serialize + ?Sized>(
    token: &str,
    payload: &T,
    resolver: &dyn SecretResolver,
    tolerance_ms: u64,
) -> Result<bool, ResolveError> {
    let options = VerifyOptions::default().with_tolerance_ms(tolerance_ms);
    validate_with_options(token, payload, resolver, &options).await
}

/// Validate a signature token with full options, collapsing rejections into `false`.
///
/// # Errors
///
/// Returns the resolver's [`ResolveError`] if the secret key lookup fails.
pub async fn validate_with_options<T: Serialize + ?Sized>(
    token: &str,
    payload: &T,
    resolver: &dyn SecretResolver,
    options: &VerifyOptions,
) -> Result<bool, ResolveError> {
    collapse(verify(token, payload, resolver, options).await)
}

/// Validate a token when the caller already holds the secret key.
///
/// The token must name `integration_id`. No resolver is involved, so every
/// failure is a rejection and the result is a plain boolean.
#[must_use]
pub fn validate_with_key<T: Serialize + ?Sized>(
    token: &str,
    payload: &T,
    integration_id: &str,
    secret_key: &str,
    tolerance_ms: u64,
) -> bool {
    validate_with_key_at(
        token,
        payload,
        integration_id,
        secret_key,
        tolerance_ms,
        current_timestamp_millis(),
    )
}

/// [`validate_with_key`] with an explicit clock reading.
#[must_use]
pub fn validate_with_key_at<T: Serialize + ?Sized>(
    token: &str,
    payload: &T,
    integration_id: &str,
    secret_key: &str,
    tolerance_ms: u64,
    now_ms: u64,
) -> bool {
    let outcome = SignatureToken::parse(token).and_then(|parsed| {
        if parsed.integration_id != integration_id {
            return Err(SignatureError::IntegrationMismatch {
                expected: integration_id.to_owned(),
                actual: parsed.integration_id,
            });
        }
        check_token(
            &parsed,
            payload,
            &SecretKey::from(secret_key),
            tolerance_ms,
            now_ms,
        )
    });

    if let Err(e) = &outcome {
        debug!(error = %e, "Signature rejected");
    }
    outcome.is_ok()
}

/// Map a verification outcome onto the boolean contract.
fn collapse(outcome: Result<Verified, SignatureError>) -> Result<bool, ResolveError> {
    match outcome {
        Ok(_) => Ok(true),
        Err(SignatureError::Resolve(e)) => Err(e),
        Err(e) => {
            debug!(error = %e, "Signature rejected");
            Ok(false)
        }
    }
}

/// Reject tokens naming an integration other than the expected one.
fn check_expected_integration(
    parsed: &SignatureToken,
    options: &VerifyOptions,
) -> Result<(), SignatureError> {
    match &options.expected_integration_id {
        Some(expected) if expected.as_str() != parsed.integration_id => {
            debug!(
                expected = %expected,
                actual = %parsed.integration_id,
                "Integration id mismatch"
            );
            Err(SignatureError::IntegrationMismatch {
                expected: expected.to_string(),
                actual: parsed.integration_id.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// Check the timestamp window and the MAC of a parsed token.
fn check_token<T: Serialize + ?Sized>(
    parsed: &SignatureToken,
    payload: &T,
    secret_key: &SecretKey,
    tolerance_ms: u64,
    now_ms: u64,
) -> Result<Verified, SignatureError> {
    let timestamp_ms = parsed.timestamp_millis()?;

    if now_ms.abs_diff(timestamp_ms) > tolerance_ms {
        debug!(
            integration_id = %parsed.integration_id,
            timestamp_ms,
            now_ms,
            tolerance_ms,
            "Signature timestamp outside tolerance"
        );
        return Err(SignatureError::TimestampOutOfTolerance {
            timestamp_ms,
            now_ms,
            tolerance_ms,
        });
    }

    let canonical = canonicalize_payload(payload)?;
    let expected_mac = compute_mac(secret_key.as_bytes(), &canonical, &parsed.timestamp);

    if timing_safe_eq(parsed.mac.as_bytes(), expected_mac.as_bytes()) {
        debug!(integration_id = %parsed.integration_id, "Signature verification succeeded");
        Ok(Verified {
            integration_id: parsed.integration_id.clone(),
            timestamp_ms,
        })
    } else {
        debug!(
            integration_id = %parsed.integration_id,
            timestamp = %parsed.timestamp,
            "Signature mismatch"
        );
        Err(SignatureError::MacMismatch)
    }
}
