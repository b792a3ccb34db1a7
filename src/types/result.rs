//! Normalized outcome shape for gateway operations
//!
//! Every public operation returns a [`NormalizedResult`] regardless of which
//! backend handled it or how it failed. Backend declines, validation
//! rejections, and transport faults all surface through the same structure;
//! nothing crosses the public boundary as an error.

use serde::Serialize;
use serde_json::Value;

use super::error::TransportFault;

/// Result code for an approved transaction
pub const CODE_APPROVED: u16 = 200;

/// Result code for a declined or rejected transaction
///
/// Used both for local validation rejections (no network call made) and for
/// backend replies whose business response code signals a decline.
pub const CODE_DECLINED: u16 = 422;

/// The single structured outcome returned by every gateway operation
///
/// Owned solely by the call that produced it; never shared or cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResult {
    /// Outcome code: 200 approved, 422 declined/rejected, or the transport
    /// fault's own code
    pub code: u16,

    /// Raw backend reply, attached whenever the backend answered at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Human-readable outcome description; empty on approval
    pub message: String,

    /// Acquisition Reference Number correlating logs with this call
    ///
    /// Present for card-switch operations only; the debit network carries
    /// its own tracking id inside the envelope instead.
    #[serde(rename = "ARN", skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl NormalizedResult {
    /// Build an approved result carrying the raw backend reply
    pub fn approved(data: Value, arn: Option<String>) -> Self {
        NormalizedResult {
            code: CODE_APPROVED,
            data: Some(data),
            message: String::new(),
            arn,
        }
    }

    /// Build a declined result for a backend business-level failure
    pub fn declined(message: impl Into<String>, data: Value, arn: Option<String>) -> Self {
        NormalizedResult {
            code: CODE_DECLINED,
            data: Some(data),
            message: message.into(),
            arn,
        }
    }

    /// Build a rejection result for a payload that failed validation
    ///
    /// No network call was made; neither backend data nor an ARN is attached.
    pub fn rejected(message: impl Into<String>) -> Self {
        NormalizedResult {
            code: CODE_DECLINED,
            data: None,
            message: message.into(),
            arn: None,
        }
    }

    /// Build a result from a transport-level fault
    ///
    /// The fault's own code and message are surfaced; no `data` or `ARN`
    /// fields are present.
    pub fn from_fault(fault: &TransportFault) -> Self {
        NormalizedResult {
            code: fault.code,
            data: None,
            message: fault.message.clone(),
            arn: None,
        }
    }

    /// Whether this result represents an approved transaction
    pub fn is_approved(&self) -> bool {
        self.code == CODE_APPROVED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approved_result_has_empty_message() {
        let result = NormalizedResult::approved(json!({"ResponseCode": "I2C00"}), None);

        assert_eq!(result.code, CODE_APPROVED);
        assert_eq!(result.message, "");
        assert!(result.is_approved());
    }

    #[test]
    fn test_fault_result_omits_data_and_arn() {
        let fault = TransportFault::new(504, "gateway timeout");
        let result = NormalizedResult::from_fault(&fault);

        assert_eq!(result.code, 504);
        assert_eq!(result.message, "gateway timeout");
        assert!(result.data.is_none());
        assert!(result.arn.is_none());
    }

    #[test]
    fn test_serialization_skips_absent_fields_and_renames_arn() {
        let rejected = serde_json::to_value(NormalizedResult::rejected("Validation error")).unwrap();
        assert_eq!(rejected, json!({"code": 422, "message": "Validation error"}));

        let approved = serde_json::to_value(NormalizedResult::approved(
            json!({"ResponseDesc": "OK"}),
            Some("a".repeat(20)),
        ))
        .unwrap();
        assert_eq!(approved["ARN"], json!("a".repeat(20)));
        assert!(approved.get("arn").is_none());
    }
}
