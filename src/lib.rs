//! Card Gateway Library
//! # Overview
//!
//! This library is a client for two heterogeneous remote card services - a
//! generic card-switch ("I2C") and a national debit network ("NAJM") -
//! normalizing their different request/response shapes into one consistent
//! result contract.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (schemas, normalized results, errors)
//! - [`config`] - Static, immutable gateway configuration
//! - [`validation`] - Structural request validation against per-operation templates
//! - [`core`] - Business logic components:
//!   - [`core::gateway`] - Transaction orchestration across both backends
//!   - [`core::context`] - Acquirer identity and ARN generation
//!   - [`core::secrets`] - Sensitive-field routing and masking
//!   - [`core::najm`] - Debit-network envelope building and reply classification
//!
//! # Operations
//!
//! The gateway supports five transaction types:
//!
//! - **generate_card**: Issue a new prepaid card (`AddCard`)
//! - **deposit**: Load funds onto a card (`CreditFunds`)
//! - **check_balance**: Query a card balance (`balanceInquiry`)
//! - **withdraw**: Debit funds through the debit network (`CARD_DEBIT`)
//! - **activate_card**: Activate an issued card (`activateCard`)
//!
//! # Outcome Contract
//!
//! Every operation returns a [`NormalizedResult`] with:
//! - `code`: 200 approved, 422 declined/rejected, or a transport fault code
//! - `data`: the raw backend reply, when the backend answered
//! - `message`: outcome description; empty on approval
//! - `ARN`: per-call correlation token (card-switch operations only)
//!
//! Transport faults never propagate to callers; validation rejections never
//! reach the network.

// Module declarations
pub mod config;
pub mod core;
pub mod types;
pub mod validation;

pub use config::{AcquirerConfig, GatewayConfig, NajmConfig, StartingNumberAllowList};
pub use core::{CardGateway, RpcInvoker, ARN_LENGTH};
pub use types::{
    ConfigError, NormalizedResult, OperationSchemas, SecretString, Shape, TransactionRequest,
    TransportFault,
};
