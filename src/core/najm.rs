//! Debit-network protocol adapter
//!
//! Builds the header/body message envelope for the national debit network
//! and classifies its replies. Header and body constants come from static
//! routing configuration; per-call fields come from the validated request.
//! The reply is judged successful only when status, error description, and
//! error code all agree.

use serde_json::{json, Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::config::NajmConfig;
use crate::core::secrets::{mask_card_number, mask_expiry};
use crate::types::TransactionRequest;

/// Single-character status signalling success, compared case-insensitively
const SUCCESS_STATUS: &str = "S";

/// Error description literal signalling success, compared case-insensitively
const SUCCESS_DESCRIPTION: &str = "success";

/// Error code value signalling success
const SUCCESS_ERROR_CODE: i64 = 0;

/// Key of the nested reply block carrying the outcome fields
const EXCEPTION_DETAILS: &str = "exception_details";

/// Build the debit-network request envelope from a validated request
///
/// The header tracking id mirrors the caller's transaction reference; the
/// timestamp is captured from the wall clock at build time so every envelope
/// leaves with it populated.
pub fn build_debit_envelope(data: &TransactionRequest, config: &NajmConfig) -> Value {
    let reference = field(data, "TransactionRefId");

    json!({
        "Header": {
            "Version": config.version,
            "MsgType": config.msg_type,
            "MsgFunction": config.msg_function,
            "SrcApplication": config.src_application,
            "TargetApplication": config.target_application,
            "BankId": config.bank_id,
            "TrackingId": reference,
            "Timestamp": current_timestamp(),
        },
        "Body": {
            "CardNumber": card_field(data, "Number"),
            "ExpiryDate": card_field(data, "ExpiryDate"),
            "ChannelName": config.channel_name,
            "TransactionRefId": field(data, "TransactionRefId"),
            "Amount": field(data, "Amount"),
            "MerchantId": config.merchant_id,
            "TerminalId": config.terminal_id,
        },
    })
}

/// Whether a debit-network reply signals success
///
/// Three conditions must jointly hold: status equals `"S"`, the error
/// description equals `"success"`, and the error code equals zero. Any other
/// combination is a declared failure, not a transport failure. The outcome
/// fields are read from the nested `exception_details` block, falling back
/// to the reply's top level when the block is absent.
pub fn is_success(reply: &Value) -> bool {
    let details = reply.get(EXCEPTION_DETAILS).unwrap_or(reply);

    let status_ok = details
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|status| status.eq_ignore_ascii_case(SUCCESS_STATUS));

    let description_ok = details
        .get("error_description")
        .and_then(Value::as_str)
        .is_some_and(|description| description.eq_ignore_ascii_case(SUCCESS_DESCRIPTION));

    let code_ok = details.get("error_code").and_then(Value::as_i64) == Some(SUCCESS_ERROR_CODE);

    status_ok && description_ok && code_ok
}

/// Error description carried by a debit-network reply, if any
pub fn error_description(reply: &Value) -> &str {
    reply
        .get(EXCEPTION_DETAILS)
        .unwrap_or(reply)
        .get("error_description")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Produce the log-safe copy of a debit envelope
///
/// The card number keeps its last four digits; the expiry date is fully
/// redacted. The original envelope is left untouched - masking never applies
/// to the payload sent to the backend.
pub fn masked_for_log(envelope: &Value) -> Value {
    let mut masked = envelope.clone();

    if let Some(body) = masked.get_mut("Body").and_then(Value::as_object_mut) {
        if let Some(number) = body.get("CardNumber").and_then(Value::as_str) {
            let log_safe = mask_card_number(number);
            body.insert("CardNumber".to_string(), Value::String(log_safe));
        }
        if let Some(expiry) = body.get("ExpiryDate").and_then(Value::as_str) {
            let log_safe = mask_expiry(expiry);
            body.insert("ExpiryDate".to_string(), Value::String(log_safe));
        }
    }

    masked
}

fn field(data: &Map<String, Value>, key: &str) -> Value {
    data.get(key).cloned().unwrap_or(Value::Null)
}

fn card_field(data: &Map<String, Value>, key: &str) -> Value {
    data.get("Card")
        .and_then(|card| card.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

fn current_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
