//! Core business logic module
//!
//! This module contains the transaction orchestration components:
//! - `traits` - The RPC invoker abstraction the orchestrator dispatches through
//! - `gateway` - Transaction orchestration across both backends
//! - `context` - Acquirer identity block and ARN generation
//! - `secrets` - Sensitive-field routing and masking helpers
//! - `najm` - Debit-network envelope builder and reply classifier

pub mod context;
pub mod gateway;
pub mod najm;
pub mod secrets;
pub mod traits;

pub use context::{AcquirerContext, ARN_LENGTH};
pub use gateway::CardGateway;
pub use secrets::{classify_secret, SecretClassification, SecretField};
pub use traits::RpcInvoker;
