//! Transaction orchestration
//!
//! This module provides the CardGateway that exposes one public operation
//! per transaction type and funnels all of them through the same pipeline:
//! validate the payload shape, build the provider-specific envelope,
//! dispatch through the RPC invoker, and classify the reply into a
//! normalized result.
//!
//! The gateway enforces the call contract:
//! - No network call is attempted for a payload that fails validation
//! - Transport faults are caught at this boundary and never propagate
//! - Every request payload and every normalized result is logged

use serde_json::Value;
use tracing::{error, info};

use crate::config::{
    validate_virtual_prefix, AcquirerConfig, GatewayConfig, NajmConfig, StartingNumberAllowList,
};
use crate::core::context::AcquirerContext;
use crate::core::najm;
use crate::core::secrets::classify_secret;
use crate::core::traits::RpcInvoker;
use crate::types::{
    ConfigError, NormalizedResult, OperationSchemas, SecretString, TransactionRequest,
};
use crate::validation::follows_format;

/// Backend method name for card issuance
const METHOD_ADD_CARD: &str = "AddCard";

/// Backend method name for card funding
const METHOD_CREDIT_FUNDS: &str = "CreditFunds";

/// Backend method name for balance inquiry
const METHOD_BALANCE_INQUIRY: &str = "balanceInquiry";

/// Backend method name for the debit-network withdrawal
const METHOD_CARD_DEBIT: &str = "CARD_DEBIT";

/// Backend method name for card activation
const METHOD_ACTIVATE_CARD: &str = "activateCard";

/// Card-switch response code signalling approval
const SWITCH_APPROVED_CODE: &str = "I2C00";

/// Rejection message for a payload whose shape diverges from its template
const SHAPE_MESSAGE: &str = "Validation error: request data does not follow the expected format";

/// Rejection message for starting numbers outside the configured allow-list
const STARTING_NUMBERS_MESSAGE: &str =
    "Validation error: card starting numbers are not permitted";

/// Card transaction gateway
///
/// Holds only immutable configuration and the operation schemas, so `&self`
/// operations are safe under concurrent use without internal locking. Each
/// call is stateless: contexts, envelopes, and results live and die with it.
pub struct CardGateway<I> {
    invoker: I,
    acquirer: AcquirerConfig,
    najm: NajmConfig,
    allow_list: StartingNumberAllowList,
    virtual_card_prefix: String,
    schemas: OperationSchemas,
}

impl<I: RpcInvoker> CardGateway<I> {
    /// Create a new gateway from static configuration and an RPC invoker
    ///
    /// Parses the starting-number allow-list and checks the virtual-card
    /// prefix; this is the only point where the crate fails fatally. The
    /// operation schemas are built here, once, and never mutated afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the allow-list is effectively empty or
    /// the virtual-card prefix is not an 8-digit number.
    pub fn new(config: GatewayConfig, invoker: I) -> Result<Self, ConfigError> {
        let allow_list = StartingNumberAllowList::parse(&config.allowed_starting_numbers)?;
        validate_virtual_prefix(&config.virtual_card_prefix)?;

        Ok(CardGateway {
            invoker,
            acquirer: config.acquirer,
            najm: config.najm,
            allow_list,
            virtual_card_prefix: config.virtual_card_prefix,
            schemas: OperationSchemas::new(),
        })
    }

    /// Issue a new prepaid card (`AddCard`)
    ///
    /// Beyond the shape check, the card's starting numbers must be on the
    /// configured allow-list; a payload failing either check is rejected
    /// without any network call.
    pub async fn generate_card(&self, data: TransactionRequest) -> NormalizedResult {
        if !follows_format(&data, &self.schemas.add_card) {
            return self.reject(METHOD_ADD_CARD, &data, SHAPE_MESSAGE);
        }

        if !self.allow_list.permits(&card_entry(&data, "StartingNumbers")) {
            return self.reject(METHOD_ADD_CARD, &data, STARTING_NUMBERS_MESSAGE);
        }

        self.dispatch_switch(METHOD_ADD_CARD, data).await
    }

    /// Load funds onto an existing card (`CreditFunds`)
    pub async fn deposit(&self, data: TransactionRequest) -> NormalizedResult {
        if !follows_format(&data, &self.schemas.load_card) {
            return self.reject(METHOD_CREDIT_FUNDS, &data, SHAPE_MESSAGE);
        }

        self.dispatch_switch(METHOD_CREDIT_FUNDS, data).await
    }

    /// Query a card's balance (`balanceInquiry`)
    ///
    /// The caller's secret digit-code is routed into exactly one destination
    /// field - PIN or authentication cryptogram - decided by the card
    /// reference's BIN against the configured virtual-card prefix.
    pub async fn check_balance(
        &self,
        mut data: TransactionRequest,
        secret_code: SecretString,
    ) -> NormalizedResult {
        if !follows_format(&data, &self.schemas.check_balance) {
            return self.reject(METHOD_BALANCE_INQUIRY, &data, SHAPE_MESSAGE);
        }

        let classification =
            classify_secret(&card_entry(&data, "ReferenceID"), &self.virtual_card_prefix);
        if let Some(card) = data.get_mut("Card").and_then(Value::as_object_mut) {
            card.insert(
                classification.field.key().to_string(),
                Value::String(secret_code.peek().to_string()),
            );
        }
        info!(
            method = METHOD_BALANCE_INQUIRY,
            card = %classification.masked_card_number,
            destination = classification.field.key(),
            "routed secret digit-code"
        );

        self.dispatch_switch(METHOD_BALANCE_INQUIRY, data).await
    }

    /// Debit funds through the national debit network (`CARD_DEBIT`)
    ///
    /// The only operation carried by the debit network: it uses the
    /// header/body envelope instead of the acquirer context and attaches no
    /// ARN to its result. Log lines for this path always carry the masked
    /// copy of the envelope, never the raw card data.
    pub async fn withdraw(&self, data: TransactionRequest) -> NormalizedResult {
        if !follows_format(&data, &self.schemas.debit_funds) {
            return self.reject(METHOD_CARD_DEBIT, &data, SHAPE_MESSAGE);
        }

        let envelope = najm::build_debit_envelope(&data, &self.najm);
        let log_payload = render(&najm::masked_for_log(&envelope));

        self.dispatch(METHOD_CARD_DEBIT, envelope, log_payload, None, classify_debit)
            .await
    }

    /// Activate an issued card (`activateCard`)
    pub async fn activate_card(&self, data: TransactionRequest) -> NormalizedResult {
        if !follows_format(&data, &self.schemas.activate_card) {
            return self.reject(METHOD_ACTIVATE_CARD, &data, SHAPE_MESSAGE);
        }

        self.dispatch_switch(METHOD_ACTIVATE_CARD, data).await
    }

    /// Build and dispatch a card-switch request
    ///
    /// Merges the acquirer context (identity plus a fresh ARN) into the
    /// caller data; the ARN travels on the normalized result for log
    /// correlation.
    async fn dispatch_switch(
        &self,
        method: &'static str,
        data: TransactionRequest,
    ) -> NormalizedResult {
        let context = AcquirerContext::build(&self.acquirer);
        let arn = context.arn().to_string();
        let envelope = Value::Object(context.merge_into(data));
        let log_payload = render(&envelope);

        self.dispatch(method, envelope, log_payload, Some(arn), classify_switch)
            .await
    }

    /// Dispatch one built envelope and classify the reply
    ///
    /// The single generic pipeline tail shared by every operation,
    /// parameterized by backend method name, envelope, log rendering, ARN
    /// attachment, and success predicate. A transport fault is terminal for
    /// the call: it is logged at error level and converted into a normalized
    /// result, never re-raised.
    async fn dispatch(
        &self,
        method: &'static str,
        envelope: Value,
        log_payload: String,
        arn: Option<String>,
        classify: fn(&Value) -> (bool, String),
    ) -> NormalizedResult {
        info!(method, payload = %log_payload, "dispatching gateway request");

        match self.invoker.invoke(method, &envelope).await {
            Ok(reply) => {
                let (approved, message) = classify(&reply);
                let result = if approved {
                    NormalizedResult::approved(reply, arn)
                } else {
                    NormalizedResult::declined(message, reply, arn)
                };
                info!(method, code = result.code, result = %render_result(&result), "gateway reply classified");
                result
            }
            Err(fault) => {
                error!(method, code = fault.code, message = %fault.message, "transport fault reported by invoker");
                NormalizedResult::from_fault(&fault)
            }
        }
    }

    /// Reject a payload at validation time
    ///
    /// No network call is made; both the offending payload and the
    /// normalized rejection are logged before returning.
    fn reject(
        &self,
        method: &'static str,
        data: &TransactionRequest,
        message: &str,
    ) -> NormalizedResult {
        let result = NormalizedResult::rejected(message);
        let log_payload = render(&Value::Object(data.clone()));
        info!(
            method,
            payload = %log_payload,
            result = %render_result(&result),
            "request rejected by validation"
        );
        result
    }
}

/// Classify a card-switch reply
fn classify_switch(reply: &Value) -> (bool, String) {
    let approved = reply.get("ResponseCode").and_then(Value::as_str) == Some(SWITCH_APPROVED_CODE);
    let message = if approved {
        String::new()
    } else {
        reply
            .get("ResponseDesc")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    (approved, message)
}

/// Classify a debit-network reply
fn classify_debit(reply: &Value) -> (bool, String) {
    let approved = najm::is_success(reply);
    let message = if approved {
        String::new()
    } else {
        najm::error_description(reply).to_string()
    };

    (approved, message)
}

/// Read a scalar entry of the payload's `Card` block as a string
fn card_entry(data: &TransactionRequest, key: &str) -> String {
    match data.get("Card").and_then(|card| card.get(key)) {
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn render_result(result: &NormalizedResult) -> String {
    serde_json::to_string(result).unwrap_or_default()
}
