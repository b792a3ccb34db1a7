//! End-to-end gateway tests
//!
//! These tests drive the complete pipeline through the public operation
//! surface using stub RPC invokers. Each test:
//! 1. Builds a gateway from a fixed configuration
//! 2. Calls one public operation with caller-shaped data
//! 3. Asserts on the normalized result and on what the stub observed
//!
//! Covered scenarios:
//! - Approval and decline flows on both backends
//! - Validation rejections that never reach the network
//! - Transport faults surfaced as normalized results
//! - Masking of debit-path log copies vs. the unmasked outbound payload

use async_trait::async_trait;
use card_gateway::{
    CardGateway, GatewayConfig, NormalizedResult, RpcInvoker, SecretString, TransactionRequest,
    TransportFault, ARN_LENGTH,
};
use rstest::rstest;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Stub invoker returning a canned reply and recording every call
struct StubInvoker {
    reply: Result<Value, TransportFault>,
    calls: AtomicUsize,
    last_envelope: Mutex<Option<Value>>,
}

impl StubInvoker {
    fn replying(reply: Value) -> Self {
        StubInvoker {
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
            last_envelope: Mutex::new(None),
        }
    }

    fn faulting(code: u16, message: &str) -> Self {
        StubInvoker {
            reply: Err(TransportFault::new(code, message)),
            calls: AtomicUsize::new(0),
            last_envelope: Mutex::new(None),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_envelope(&self) -> Option<Value> {
        self.last_envelope.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcInvoker for &StubInvoker {
    async fn invoke(&self, _method: &str, envelope: &Value) -> Result<Value, TransportFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_envelope.lock().unwrap() = Some(envelope.clone());
        self.reply.clone()
    }
}

fn config() -> GatewayConfig {
    serde_json::from_value(json!({
        "switch_wsdl_url": "https://switch.example.com/service?wsdl",
        "debit_wsdl_url": "https://debit.example.com/service?wsdl",
        "switch_log_path": "/tmp/switch.log",
        "debit_log_path": "/tmp/debit.log",
        "acquirer": {"en_user_id": "acq-user", "en_pwd": "acq-pass"},
        "allowed_starting_numbers": "4000123,4000124",
        "virtual_card_prefix": "40001230",
        "najm": {
            "version": "1.0",
            "msg_type": "REQ",
            "msg_function": "DEBIT",
            "src_application": "GATEWAY",
            "target_application": "NAJM",
            "bank_id": "0017",
            "channel_name": "ECOM",
            "merchant_id": "M-100",
            "terminal_id": "T-200",
        },
    }))
    .expect("test configuration must deserialize")
}

fn request(value: Value) -> TransactionRequest {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {:?}", other),
    }
}

/// Install a test subscriber so the logging path is exercised
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("card_gateway=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_check_balance_end_to_end_approval() {
    init_tracing();
    let invoker = StubInvoker::replying(json!({"ResponseCode": "I2C00", "ResponseDesc": "OK"}));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let result = gateway
        .check_balance(
            request(json!({
                "CardAcceptor": {"Id": "A1"},
                "Card": {"ReferenceID": "R1"},
                "ApplyFee": "N",
            })),
            SecretString::new("1234"),
        )
        .await;

    assert_eq!(result.code, 200);
    assert_eq!(result.message, "");
    assert_eq!(result.data, Some(json!({"ResponseCode": "I2C00", "ResponseDesc": "OK"})));
    assert_eq!(result.arn.as_ref().map(|arn| arn.len()), Some(ARN_LENGTH));
    assert_eq!(invoker.call_count(), 1);

    // The secret reached the backend in the PIN field, unmasked
    let envelope = invoker.last_envelope().unwrap();
    assert_eq!(envelope["Card"]["Pin"], "1234");
    assert_eq!(envelope["Acquirer"]["EnUserID"], "acq-user");
}

#[tokio::test]
async fn test_generate_card_rejected_before_any_network_call() {
    let invoker = StubInvoker::replying(json!({"ResponseCode": "I2C00"}));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let result = gateway
        .generate_card(request(json!({
            "CardAcceptor": {"Id": "A1"},
            "Card": {"StartingNumbers": "5555555"},
            "Profile": {
                "Holders": [{
                    "FirstName": "Nadia",
                    "LastName": "Haddad",
                    "Email": "nadia@example.com",
                    "CellNumber": "0790000000",
                }],
                "ApplyFee": "Y",
            },
        })))
        .await;

    assert_eq!(result.code, 422);
    assert!(result.message.starts_with("Validation error"));
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn test_deposit_transport_fault_is_normalized_not_propagated() {
    let invoker = StubInvoker::faulting(503, "service unavailable");
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let result = gateway
        .deposit(request(json!({
            "CardAcceptor": {"Id": "A1"},
            "Card": {"ReferenceID": "R1"},
            "FundingCard": {"Number": "4000123099990001"},
            "ApplyFee": "N",
            "Amount": "25.00",
        })))
        .await;

    assert_eq!(result.code, 503);
    assert_eq!(result.message, "service unavailable");

    // Neither `data` nor `ARN` appears in the serialized result
    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(serialized, json!({"code": 503, "message": "service unavailable"}));
}

#[tokio::test]
async fn test_withdraw_end_to_end_success_with_raw_outbound_payload() {
    init_tracing();
    let invoker = StubInvoker::replying(json!({
        "exception_details": {
            "status": "S",
            "error_description": "Success",
            "error_code": 0,
            "transaction_ref_id": "TRX-42",
        }
    }));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let result = gateway
        .withdraw(request(json!({
            "Card": {"Number": "4111111111111111", "ExpiryDate": "12/27"},
            "TransactionRefId": "TRX-42",
            "Amount": "150.00",
        })))
        .await;

    assert_eq!(result.code, 200);
    assert!(result.arn.is_none(), "debit operations carry no ARN");

    // The outbound envelope is never masked and carries routing constants
    let envelope = invoker.last_envelope().unwrap();
    assert_eq!(envelope["Body"]["CardNumber"], "4111111111111111");
    assert_eq!(envelope["Body"]["MerchantId"], "M-100");
    assert_eq!(envelope["Header"]["TrackingId"], "TRX-42");
    assert_ne!(envelope["Header"]["Timestamp"], "");
}

#[tokio::test]
async fn test_withdraw_declined_reply_is_a_result_not_an_error() {
    let invoker = StubInvoker::replying(json!({
        "exception_details": {
            "status": "F",
            "error_description": "Card expired",
            "error_code": 54,
            "transaction_ref_id": "TRX-42",
        }
    }));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let result = gateway
        .withdraw(request(json!({
            "Card": {"Number": "4111111111111111", "ExpiryDate": "12/20"},
            "TransactionRefId": "TRX-42",
            "Amount": "150.00",
        })))
        .await;

    assert_eq!(result.code, 422);
    assert_eq!(result.message, "Card expired");
    assert!(result.data.is_some());
}

#[tokio::test]
async fn test_activate_card_end_to_end_approval() {
    let invoker = StubInvoker::replying(json!({"ResponseCode": "I2C00", "ResponseDesc": "OK"}));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let result = gateway
        .activate_card(request(json!({
            "CardAcceptor": {"LocalDateTime": "2026-08-06T10:00:00"},
            "Card": {"ReferenceID": "R1"},
        })))
        .await;

    assert_eq!(result.code, 200);
    assert_eq!(result.arn.as_ref().map(|arn| arn.len()), Some(ARN_LENGTH));
}

#[rstest]
#[case::generate_card("generate_card")]
#[case::deposit("deposit")]
#[case::check_balance("check_balance")]
#[case::withdraw("withdraw")]
#[case::activate_card("activate_card")]
#[tokio::test]
async fn test_empty_payload_is_rejected_by_every_operation(#[case] operation: &str) {
    let invoker = StubInvoker::replying(json!({"ResponseCode": "I2C00"}));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");
    let empty = TransactionRequest::new();

    let result: NormalizedResult = match operation {
        "generate_card" => gateway.generate_card(empty).await,
        "deposit" => gateway.deposit(empty).await,
        "check_balance" => gateway.check_balance(empty, SecretString::new("1234")).await,
        "withdraw" => gateway.withdraw(empty).await,
        "activate_card" => gateway.activate_card(empty).await,
        other => panic!("unknown operation {}", other),
    };

    assert_eq!(result.code, 422);
    assert!(result.data.is_none());
    assert_eq!(invoker.call_count(), 0, "no network call for {}", operation);
}

#[tokio::test]
async fn test_arns_differ_between_consecutive_calls() {
    let invoker = StubInvoker::replying(json!({"ResponseCode": "I2C00"}));
    let gateway = CardGateway::new(config(), &invoker).expect("configuration is valid");

    let balance_request = || {
        request(json!({
            "CardAcceptor": {"Id": "A1"},
            "Card": {"ReferenceID": "R1"},
            "ApplyFee": "N",
        }))
    };

    let first = gateway
        .check_balance(balance_request(), SecretString::new("1234"))
        .await;
    let second = gateway
        .check_balance(balance_request(), SecretString::new("1234"))
        .await;

    assert_ne!(first.arn, second.arn);
}
