//! HMAC-SHA256 partner request signatures.
//!
//! A partner signs a request payload with its pre-shared secret key and sends
//! the resulting token alongside the request. The receiving service verifies
//! that the token was produced by a holder of the key, for this payload, within
//! a bounded time window.
//!
//! # Overview
//!
//! A signature token has three dot-separated fields:
//!
//! ```text
//! <integrationId>.<timestampMillis>.<hex(HMAC-SHA256(key, canonical_json || timestampMillis))>
//! ```
//!
//! The payload is hashed in a canonical JSON form (sorted keys, compact, no
//! extra escaping) so that independent implementations agree byte for byte.
//! The scheme is stateless: no token is ever stored.
//!
//! # Usage
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use serde_json::json;
//! use xsignature_auth::{StaticSecretResolver, VerifyOptions, generate, verify};
//!
//! let resolver = StaticSecretResolver::new(vec![
//!     ("partner-xyz".to_owned(), "super-secret-key-12345".to_owned()),
//! ]);
//!
//! let body = json!({"userId": "12345", "action": "create_booking"});
//! let token = generate(&body, "partner-xyz", "super-secret-key-12345").unwrap();
//!
//! let verified = verify(&token, &body, &resolver, &VerifyOptions::default()).await.unwrap();
//! assert_eq!(verified.integration_id, "partner-xyz");
//! # });
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical JSON serialization of payloads
//! - [`compare`] - Timing-safe byte comparison
//! - [`error`] - Signing, verification, and resolver error types
//! - [`resolver`] - Secret resolver trait and implementations
//! - [`sign`] - Signature generation
//! - [`token`] - Token wire format
//! - [`verify`] - Signature verification

pub mod canonical;
pub mod compare;
pub mod error;
pub mod resolver;
pub mod sign;
pub mod token;
pub mod verify;

pub use canonical::{canonicalize, canonicalize_payload};
pub use error::{ResolveError, SignatureError};
pub use resolver::{FnResolver, SecretResolver, StaticSecretResolver, SyncFnResolver};
pub use sign::{Signer, compute_mac, generate, generate_at};
pub use token::SignatureToken;
pub use verify::{
    Verified, VerifyOptions, validate, validate_with_key, validate_with_key_at,
    validate_with_options, verify, verify_at,
};
