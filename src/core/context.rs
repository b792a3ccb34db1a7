//! Acquirer context construction
//!
//! Every card-switch request carries the static acquirer identity plus a
//! freshly generated Acquisition Reference Number. The ARN correlates log
//! lines and the returned result with the downstream reply; it is a
//! correlation token, not a security credential, and is never persisted.

use rand::RngCore;
use serde_json::json;
use sha2::{Digest, Sha512};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::AcquirerConfig;
use crate::types::{SecretString, TransactionRequest};

/// Length of a generated Acquisition Reference Number
pub const ARN_LENGTH: usize = 20;

/// Per-call acquirer identity block
///
/// Created at the start of each card-switch operation and discarded with it.
#[derive(Debug, Clone)]
pub struct AcquirerContext {
    en_user_id: String,
    en_pwd: SecretString,
    arn: String,
}

impl AcquirerContext {
    /// Build a context from the static acquirer configuration
    ///
    /// Generates one fresh ARN; two contexts built from the same
    /// configuration never share a reference number.
    pub fn build(config: &AcquirerConfig) -> Self {
        AcquirerContext {
            en_user_id: config.en_user_id.clone(),
            en_pwd: config.en_pwd.clone(),
            arn: generate_arn(),
        }
    }

    /// The reference number generated for this call
    pub fn arn(&self) -> &str {
        &self.arn
    }

    /// Merge the context into caller data
    ///
    /// Shallow merge at the top level: the acquirer-owned `Acquirer` key
    /// replaces any caller-supplied entry of the same name.
    pub fn merge_into(self, mut data: TransactionRequest) -> TransactionRequest {
        data.insert(
            "Acquirer".to_string(),
            json!({
                "EnUserID": self.en_user_id,
                "EnPwd": self.en_pwd.peek(),
                "ARN": self.arn,
            }),
        );
        data
    }
}

/// Generate a fresh Acquisition Reference Number
///
/// SHA-512 over the current wall clock, a process-unique identifier, and
/// 32 random bytes, hex-encoded and truncated to [`ARN_LENGTH`] characters.
/// Collisions within one process lifetime are extremely unlikely but no
/// formal uniqueness bound is claimed.
fn generate_arn() -> String {
    let mut hasher = Sha512::new();
    hasher.update(
        OffsetDateTime::now_utc()
            .unix_timestamp_nanos()
            .to_be_bytes(),
    );
    hasher.update(Uuid::new_v4().as_bytes());

    let mut entropy = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut entropy);
    hasher.update(entropy);

    let mut token = hex::encode(hasher.finalize());
    token.truncate(ARN_LENGTH);
    token
}
