//! Configuration for signature verification.
//!
//! All configuration is driven by environment variables.

use crate::error::{XsignatureError, XsignatureResult};
use crate::types::IntegrationId;

/// Default timestamp tolerance: five minutes.
pub const DEFAULT_TOLERANCE_MS: u64 = 300_000;

/// Verification settings shared by every call in a deployment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfig {
    /// Maximum allowed distance between a token timestamp and the local clock.
    pub tolerance_ms: u64,
    /// Integration id the caller expects tokens to carry.
    pub expected_integration_id: Option<IntegrationId>,
    /// Whether tokens must carry `expected_integration_id`.
    pub require_integration_match: bool,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            tolerance_ms: DEFAULT_TOLERANCE_MS,
            expected_integration_id: None,
            require_integration_match: false,
        }
    }
}

impl SignatureConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `XSIGNATURE_TOLERANCE_MS` | `300000` |
    /// | `XSIGNATURE_EXPECTED_INTEGRATION_ID` | *(unset)* |
    /// | `XSIGNATURE_REQUIRE_INTEGRATION_MATCH` | `false` |
    ///
    /// # Errors
    /// Returns [`XsignatureError::Config`] if a variable holds an unparsable value.
    pub fn from_env() -> XsignatureResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    /// Returns [`XsignatureError::Config`] if a variable holds an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> XsignatureResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("XSIGNATURE_TOLERANCE_MS") {
            config.tolerance_ms = v.trim().parse().map_err(|_| {
                XsignatureError::Config(format!("XSIGNATURE_TOLERANCE_MS is not a valid u64: {v}"))
            })?;
        }
        if let Some(v) = lookup("XSIGNATURE_EXPECTED_INTEGRATION_ID") {
            config.expected_integration_id = Some(IntegrationId::new(v)?);
        }
        if let Some(v) = lookup("XSIGNATURE_REQUIRE_INTEGRATION_MATCH") {
            config.require_integration_match = parse_flag(&v).ok_or_else(|| {
                XsignatureError::Config(format!(
                    "XSIGNATURE_REQUIRE_INTEGRATION_MATCH is not a valid boolean: {v}"
                ))
            })?;
        }

        if config.require_integration_match && config.expected_integration_id.is_none() {
            return Err(XsignatureError::Config(
                "XSIGNATURE_REQUIRE_INTEGRATION_MATCH is set without XSIGNATURE_EXPECTED_INTEGRATION_ID"
                    .to_owned(),
            ));
        }

        Ok(config)
    }

    /// The integration id tokens must carry, if the pre-check is enabled.
    #[must_use]
    pub fn enforced_integration_id(&self) -> Option<&IntegrationId> {
        if self.require_integration_match {
            self.expected_integration_id.as_ref()
        } else {
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" => Some(true),
        "0" => Some(false),
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
