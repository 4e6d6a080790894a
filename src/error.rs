//! Error types

use thiserror::Error;

/// Assertion and conversion failures raised by the helpers themselves.
///
/// Transport failures are not part of this enum; they surface as `anyhow::Error`
/// from [`crate::EvmClient`] with the method and node URL attached as context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HelperError {
    /// The error did not carry a revert, invalid opcode or invalid JUMP signature
    #[error("{0}")]
    UnexpectedException(String),

    /// The (optionally filtered) log list did not contain exactly one entry
    #[error("too many logs found! (expected 1, found {found})")]
    LogCount { found: usize },

    #[error("event log has no parameter named '{0}'")]
    MissingEventParam(String),

    #[error("getting {param_name} failed for {param}")]
    ContractResolution { param_name: String, param: String },

    #[error("Missing rejection{}", .expected.as_ref().map(|kind| format!(" with {}", kind)).unwrap_or_default())]
    MissingRejection { expected: Option<String> },

    #[error("invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("amount '{0}' does not fit in 256 bits")]
    AmountOverflow(String),
}
