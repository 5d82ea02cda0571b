//! Signature generation.
//!
//! ```text
//! mac   = hex(HMAC-SHA256(secret_key, canonical_payload || timestamp))
//! token = integration_id "." timestamp "." mac
//! ```
//!
//! The timestamp is the wall clock in whole milliseconds since the Unix epoch,
//! truncated (never rounded) when the clock has finer precision.

use chrono::Utc;
use hmac::{Hmac, KeyInit, Mac};
use serde::Serialize;
use sha2::Sha256;
use tracing::{debug, warn};
use xsignature_core::{IntegrationId, SecretKey};

use crate::canonical::canonicalize_payload;
use crate::error::SignatureError;
use crate::token::TOKEN_SEPARATOR;

type HmacSha256 = Hmac<Sha256>;

/// Current wall-clock time in whole milliseconds since the Unix epoch.
///
/// Clocks set before 1970 read as `0`.
#[must_use]
pub fn current_timestamp_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Compute the hex MAC over a canonical payload and a timestamp string.
///
/// The timestamp is appended to the payload bytes with no separator.
///
/// # Examples
///
/// ```
/// use xsignature_auth::sign::compute_mac;
///
/// let mac = compute_mac(b"test-secret-key", b"{}", "1700000000000");
/// assert_eq!(mac.len(), 64);
/// assert!(mac.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
/// ```
#[must_use]
pub fn compute_mac(secret_key: &[u8], canonical_payload: &[u8], timestamp: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key).expect("HMAC can accept keys of any length");
    mac.update(canonical_payload);
    mac.update(timestamp.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Generate a signature token for `payload` stamped with the current time.
///
/// The integration id is not validated; an id containing `.` produces a token
/// no verifier can parse. Use [`IntegrationId::new`] to validate up front.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidPayload`] only if the payload cannot be
/// expressed in the JSON data model.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xsignature_auth::generate;
///
/// let token = generate(&json!({"userId": "12345"}), "partner-xyz", "super-secret-key-12345").unwrap();
/// assert!(token.starts_with("partner-xyz."));
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn generate<T: Serialize + ?Sized>(
    payload: &T,
    integration_id: &str,
    secret_key: &str,
) -> Result<String, SignatureError> {
    generate_at(payload, integration_id, secret_key, current_timestamp_millis())
}

/// Generate a signature token with an explicit timestamp.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidPayload`] only if the payload cannot be
/// expressed in the JSON data model.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xsignature_auth::generate_at;
///
/// let token = generate_at(&json!(null), "test-integration", "test-secret-key", 1_700_000_000_000).unwrap();
/// assert_eq!(
///     token,
///     "test-integration.1700000000000.f5802562fb19e32dd1eb71470fd3963b8ff82fd210676f6dc5087a599909366e"
/// );
/// ```
pub fn generate_at<T: Serialize + ?Sized>(
    payload: &T,
    integration_id: &str,
    secret_key: &str,
    timestamp_ms: u64,
) -> Result<String, SignatureError> {
    if integration_id.contains(TOKEN_SEPARATOR) {
        warn!(
            integration_id,
            "Integration id contains the token separator; the signature will not parse"
        );
    }

    let canonical = canonicalize_payload(payload)?;
    let timestamp = timestamp_ms.to_string();
    let mac = compute_mac(secret_key.as_bytes(), &canonical, &timestamp);

    debug!(integration_id, timestamp = %timestamp, "Generated signature");

    Ok(format!(
        "{integration_id}{TOKEN_SEPARATOR}{timestamp}{TOKEN_SEPARATOR}{mac}"
    ))
}

/// Signs payloads on behalf of one integration.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xsignature_auth::Signer;
/// use xsignature_core::IntegrationId;
///
/// let signer = Signer::new(IntegrationId::new("partner-xyz").unwrap(), "super-secret-key-12345");
/// let token = signer.sign_at(&json!({"userId": "12345"}), 1_703_097_600_000).unwrap();
/// assert!(token.starts_with("partner-xyz.1703097600000."));
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    integration_id: IntegrationId,
    secret_key: SecretKey,
}

impl Signer {
    /// Create a signer for a validated integration id.
    pub fn new(integration_id: IntegrationId, secret_key: impl Into<SecretKey>) -> Self {
        Self {
            integration_id,
            secret_key: secret_key.into(),
        }
    }

    /// The integration id this signer stamps into tokens.
    #[must_use]
    pub fn integration_id(&self) -> &IntegrationId {
        &self.integration_id
    }

    /// Sign `payload` with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidPayload`] if the payload cannot be
    /// expressed in the JSON data model.
    pub fn sign<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String, SignatureError> {
        self.sign_at(payload, current_timestamp_millis())
    }

    /// Sign `payload` with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidPayload`] if the payload cannot be
    /// expressed in the JSON data model.
    pub fn sign_at<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        timestamp_ms: u64,
    ) -> Result<String, SignatureError> {
        generate_at(
            payload,
            self.integration_id.as_str(),
            self.secret_key.expose(),
            timestamp_ms,
        )
    }
}
