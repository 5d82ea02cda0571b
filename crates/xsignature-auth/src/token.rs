//! Signature token wire format.
//!
//! ```text
//! <integrationId>.<timestampMillis>.<hexMac>
//! ```
//!
//! The integration id is not escaped, so it must not contain `.`.

use std::fmt;
use std::str::FromStr;

use crate::error::SignatureError;

/// Separator between the three token fields.
pub const TOKEN_SEPARATOR: char = '.';

/// A parsed signature token.
///
/// The timestamp is kept as the literal string from the wire so that the MAC
/// is recomputed over exactly the bytes the signer used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureToken {
    /// The integration id that produced the token.
    pub integration_id: String,
    /// The timestamp field, verbatim.
    pub timestamp: String,
    /// The lowercase hex MAC.
    pub mac: String,
}

impl SignatureToken {
    /// Parse a token string.
    ///
    /// Only the field layout is checked here; the timestamp is parsed by
    /// [`SignatureToken::timestamp_millis`].
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::MalformedToken`] unless the input splits into
    /// exactly three non-empty fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use xsignature_auth::token::SignatureToken;
    ///
    /// let token = SignatureToken::parse("partner-xyz.1703097600000.abcdef").unwrap();
    /// assert_eq!(token.integration_id, "partner-xyz");
    /// assert_eq!(token.timestamp_millis().unwrap(), 1_703_097_600_000);
    ///
    /// assert!(SignatureToken::parse("not-a-valid-token").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, SignatureError> {
        let mut fields = token.split(TOKEN_SEPARATOR);
        let (Some(integration_id), Some(timestamp), Some(mac), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(SignatureError::MalformedToken);
        };

        if integration_id.is_empty() || timestamp.is_empty() || mac.is_empty() {
            return Err(SignatureError::MalformedToken);
        }

        Ok(Self {
            integration_id: integration_id.to_owned(),
            timestamp: timestamp.to_owned(),
            mac: mac.to_owned(),
        })
    }

    /// Parse the timestamp field as milliseconds since the Unix epoch.
    ///
    /// Only ASCII digits are accepted; signs, whitespace, and fractions are not.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::UnparsableTimestamp`] for anything else,
    /// including values that overflow `u64`.
    pub fn timestamp_millis(&self) -> Result<u64, SignatureError> {
        if !self.timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SignatureError::UnparsableTimestamp(self.timestamp.clone()));
        }
        self.timestamp
            .parse()
            .map_err(|_| SignatureError::UnparsableTimestamp(self.timestamp.clone()))
    }
}

impl FromStr for SignatureToken {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SignatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TOKEN_SEPARATOR}{}{TOKEN_SEPARATOR}{}",
            self.integration_id, self.timestamp, self.mac
        )
    }
}
