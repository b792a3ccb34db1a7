//! Core trait abstractions for the gateway
//!
//! The transport layer is deliberately narrow: the orchestrator depends on
//! nothing beyond "invoke this backend method with this envelope and give me
//! the reply or a fault". Endpoint discovery, wire encoding, and retries all
//! live behind implementations of this trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::types::TransportFault;

/// Opaque RPC invoker for a remote card service
///
/// One implementation exists per configured backend endpoint. Transport
/// failures are reported as [`TransportFault`] values rather than panics or
/// opaque errors so the orchestrator can match on them explicitly.
#[async_trait]
pub trait RpcInvoker: Send + Sync {
    /// Invoke `method` on the remote service with the given request envelope
    ///
    /// # Arguments
    ///
    /// * `method` - Backend operation name (e.g. `"AddCard"`, `"CARD_DEBIT"`)
    /// * `envelope` - Fully built request envelope
    ///
    /// # Returns
    ///
    /// * `Ok(reply)` - The backend answered at the transport level; the reply
    ///   may still signal a business-level decline
    /// * `Err(fault)` - The transport itself failed (timeout, connection
    ///   fault, malformed reply)
    async fn invoke(&self, method: &str, envelope: &Value) -> Result<Value, TransportFault>;
}
