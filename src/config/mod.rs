//! Static gateway configuration
//!
//! All types derive Serde traits so the host can deserialize them from
//! whatever source it prefers (file, environment bridge); this crate never
//! loads configuration itself. The configuration is immutable after
//! construction and passed by reference into the orchestrator - there is no
//! ambient or global configuration access inside call logic.

use serde::Deserialize;
use std::path::PathBuf;

use crate::types::{ConfigError, SecretString};

/// Number of digits in the configured virtual-card BIN prefix
pub const VIRTUAL_PREFIX_DIGITS: usize = 8;

/// Root configuration for the card gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// WSDL endpoint of the generic card-switch service
    pub switch_wsdl_url: String,

    /// WSDL endpoint of the national debit-network service
    pub debit_wsdl_url: String,

    /// Log destination for card-switch traffic
    ///
    /// Consumed by the host's subscriber setup; the core only emits
    /// `tracing` events and never opens these paths itself.
    pub switch_log_path: PathBuf,

    /// Log destination for debit-network traffic
    pub debit_log_path: PathBuf,

    /// Static merchant/acquirer identity block
    pub acquirer: AcquirerConfig,

    /// Comma-separated list of permitted card starting numbers
    pub allowed_starting_numbers: String,

    /// 8-digit BIN prefix identifying virtual cards
    ///
    /// Card numbers beginning with this prefix carry an authentication
    /// cryptogram instead of a physical PIN.
    pub virtual_card_prefix: String,

    /// Routing constants for the debit-network message envelope
    pub najm: NajmConfig,
}

/// Acquirer identity injected into every card-switch request
#[derive(Debug, Clone, Deserialize)]
pub struct AcquirerConfig {
    /// Acquirer user id (`EnUserID`)
    pub en_user_id: String,

    /// Acquirer password (`EnPwd`); redacted in Debug output
    pub en_pwd: SecretString,
}

/// Header/body constants for the debit-network envelope
///
/// All fields are static routing configuration; per-call fields come from
/// the validated request instead.
#[derive(Debug, Clone, Deserialize)]
pub struct NajmConfig {
    /// Protocol version
    pub version: String,

    /// Message type code
    pub msg_type: String,

    /// Message function code
    pub msg_function: String,

    /// Source application identifier
    pub src_application: String,

    /// Target application identifier
    pub target_application: String,

    /// Bank identifier
    pub bank_id: String,

    /// Channel name placed in the message body
    pub channel_name: String,

    /// Merchant identifier placed in the message body
    pub merchant_id: String,

    /// Terminal identifier placed in the message body
    pub terminal_id: String,
}

/// Parsed allow-list of permitted card starting numbers
///
/// Built once at gateway construction from the raw comma-separated
/// configuration value and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StartingNumberAllowList {
    prefixes: Vec<String>,
}

impl StartingNumberAllowList {
    /// Parse the raw comma-separated configuration value
    ///
    /// Entries are trimmed and empty entries are skipped. An effectively
    /// empty list is a configuration defect: it would silently reject every
    /// card issuance, so construction fails instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAllowList`] if no usable entry remains.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let prefixes: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();

        if prefixes.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }

        Ok(StartingNumberAllowList { prefixes })
    }

    /// Whether the given starting numbers are on the allow-list
    pub fn permits(&self, starting_numbers: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| prefix == starting_numbers)
    }
}

/// Validate the configured virtual-card BIN prefix
///
/// # Errors
///
/// Returns [`ConfigError::InvalidVirtualPrefix`] unless the value is exactly
/// eight ASCII digits.
pub fn validate_virtual_prefix(value: &str) -> Result<(), ConfigError> {
    let digits = value.len() == VIRTUAL_PREFIX_DIGITS
        && value.chars().all(|c| c.is_ascii_digit());

    if !digits {
        return Err(ConfigError::InvalidVirtualPrefix {
            value: value.to_string(),
        });
    }

    Ok(())
}
