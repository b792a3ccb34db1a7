//! Error types for the card gateway
//!
//! Only two kinds of failure are modelled as Rust errors: construction-time
//! misconfiguration ([`ConfigError`]) and transport-level RPC faults
//! ([`TransportFault`]). Validation rejections and backend declines are not
//! errors - they are ordinary [`NormalizedResult`](super::NormalizedResult)
//! values, so no error ever crosses the public operation boundary.

use thiserror::Error;

/// Construction-time configuration error
///
/// The only fatal error surface in the crate: raised by the gateway
/// constructor when static configuration is unusable, never during calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The comma-separated allow-list of card starting numbers contained
    /// no usable entries
    #[error("allowed starting numbers list is empty")]
    EmptyAllowList,

    /// The virtual-card BIN prefix is not an 8-digit number
    #[error("virtual card prefix '{value}' must be exactly 8 digits")]
    InvalidVirtualPrefix {
        /// The offending configured value
        value: String,
    },
}

/// Transport-level fault raised by the RPC invoker
///
/// Covers timeouts, connection failures, and malformed replies. Caught at
/// the orchestrator boundary and converted into a normalized result using
/// the fault's own code and message; never propagated to callers.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("transport fault {code}: {message}")]
pub struct TransportFault {
    /// Fault code reported by the transport layer
    pub code: u16,

    /// Fault description reported by the transport layer
    pub message: String,
}

impl TransportFault {
    /// Create a new transport fault
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        TransportFault {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_allow_list(
        ConfigError::EmptyAllowList,
        "allowed starting numbers list is empty"
    )]
    #[case::invalid_prefix(
        ConfigError::InvalidVirtualPrefix { value: "40A".to_string() },
        "virtual card prefix '40A' must be exactly 8 digits"
    )]
    fn test_config_error_display(#[case] error: ConfigError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_transport_fault_display() {
        let fault = TransportFault::new(504, "connection timed out");
        assert_eq!(fault.to_string(), "transport fault 504: connection timed out");
    }
}
