//! Debug-safe wrapper for sensitive string values
//!
//! Secrets travel inside request envelopes (acquirer password, cardholder
//! digit-codes) and must reach the backend unmodified, but they must never
//! leak through `Debug` or `Display` formatting of configuration or request
//! structures.

use serde::{Deserialize, Serialize};
use std::fmt;

const REDACTED: &str = "*** masked ***";

/// A string whose `Debug` and `Display` output is redacted
///
/// Serialization exposes the raw value so request envelopes built from
/// configuration stay intact; only formatted output is masked.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a sensitive value
    pub fn new(value: impl Into<String>) -> Self {
        SecretString(value.into())
    }

    /// Read the wrapped value
    ///
    /// Avoid holding on to the returned reference; use it at the envelope
    /// build site and let it go.
    pub fn peek(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        SecretString::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        SecretString(value)
    }
}
