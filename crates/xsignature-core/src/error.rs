//! Error types for the xsignature core.

/// Core error type for xsignature types and configuration.
#[derive(Debug, thiserror::Error)]
pub enum XsignatureError {
    /// Invalid integration identifier (empty or containing a `.`).
    #[error("invalid integration id: {0:?} (must be non-empty and must not contain '.')")]
    InvalidIntegrationId(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for xsignature core operations.
pub type XsignatureResult<T> = Result<T, XsignatureError>;
