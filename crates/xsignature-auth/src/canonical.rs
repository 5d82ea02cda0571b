//! Canonical payload serialization.
//!
//! The MAC covers the payload in a canonical JSON form so that signer and
//! verifier produce identical bytes regardless of how each side ordered its
//! map keys:
//!
//! - map keys are sorted in ascending byte order at every depth, including
//!   maps nested inside arrays
//! - arrays keep their element order
//! - scalars are emitted unchanged; date/time values serialize to a single
//!   string and are never decomposed
//! - a null (absent) payload is treated as `{}`
//! - output is compact: no whitespace, and no escaping beyond what JSON
//!   requires, so `/` and non-ASCII characters stay literal
//!
//! Other implementations of the scheme must produce the same bytes, otherwise
//! cross-language verification fails.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SignatureError;

/// Serialize a JSON value into its canonical byte form.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xsignature_auth::canonical::canonicalize;
///
/// let bytes = canonicalize(&json!({"b": 2, "a": {"d": [3, {"z": 1, "y": 0}], "c": "/x"}}));
/// assert_eq!(bytes, br#"{"a":{"c":"/x","d":[3,{"y":0,"z":1}]},"b":2}"#);
///
/// assert_eq!(canonicalize(&json!(null)), b"{}");
/// ```
#[must_use]
pub fn canonicalize(value: &Value) -> Vec<u8> {
    if value.is_null() {
        return b"{}".to_vec();
    }
    // `Display` for `Value` writes compact JSON and cannot fail.
    sort_keys(value).to_string().into_bytes()
}

/// Serialize any `serde` value into its canonical byte form.
///
/// `None` and unit values are treated as an empty map.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidPayload`] if the value cannot be expressed
/// in the JSON data model (for example a map with non-string keys).
pub fn canonicalize_payload<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>, SignatureError> {
    let value =
        serde_json::to_value(payload).map_err(|e| SignatureError::InvalidPayload(e.to_string()))?;
    Ok(canonicalize(&value))
}

/// Return a copy of `value` with every map's keys in ascending byte order.
///
/// The ordering does not depend on whether `serde_json` was built with
/// `preserve_order`: entries are sorted explicitly and re-inserted in order.
#[must_use]
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, nested) in entries {
                sorted.insert(key.clone(), sort_keys(nested));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        scalar => scalar.clone(),
    }
}
