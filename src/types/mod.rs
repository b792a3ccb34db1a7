//! Types module
//!
//! Contains core data structures used throughout the gateway.
//! This module organizes types into logical submodules:
//! - `schema`: Operation shape templates for request validation
//! - `result`: The normalized outcome returned by every operation
//! - `error`: Configuration and transport error types
//! - `secret`: Debug-safe wrapper for sensitive string values

pub mod error;
pub mod result;
pub mod schema;
pub mod secret;

pub use error::{ConfigError, TransportFault};
pub use result::{NormalizedResult, CODE_APPROVED, CODE_DECLINED};
pub use schema::{OperationSchemas, Shape};
pub use secret::SecretString;

/// Caller-supplied transaction payload
///
/// A mapping from field name to value (scalars or nested mappings), shaped
/// to mirror exactly one operation template's keys. Created and discarded
/// within a single call.
pub type TransactionRequest = serde_json::Map<String, serde_json::Value>;
