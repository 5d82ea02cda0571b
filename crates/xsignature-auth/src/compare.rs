//! Timing-safe comparison.

use subtle::ConstantTimeEq;

/// Compare two byte strings without leaking the position of the first difference.
///
/// Inputs of different length compare unequal.
///
/// # Examples
///
/// ```
/// use xsignature_auth::compare::timing_safe_eq;
///
/// assert!(timing_safe_eq(b"abc", b"abc"));
/// assert!(!timing_safe_eq(b"abc", b"abd"));
/// assert!(!timing_safe_eq(b"abc", b"abcd"));
/// ```
#[must_use]
pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
