//! Core types, configuration, and errors for xsignature.
//!
//! This crate holds the building blocks shared by the signing and verification
//! crates: the integration identifier and secret key types, the
//! environment-driven verification configuration, and the core error type.

mod config;
mod error;
mod types;

pub use config::{DEFAULT_TOLERANCE_MS, SignatureConfig};
pub use error::{XsignatureError, XsignatureResult};
pub use types::{IntegrationId, SecretKey};
