//! Event log parameter extraction
//!
//! Works on decoded receipts: each log carries an event name and a map of named
//! arguments. ABI decoding itself is left to a caller-supplied [`LogDecoder`];
//! resolving an address into a contract binding is left to a [`ContractFactory`].

use crate::error::HelperError;
use crate::evm_client::{EvmLog, EvmTransactionReceipt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha3::{Digest, Keccak256};

// ============================================================================
// DECODED RECEIPT MODEL
// ============================================================================

/// A decoded event log: name plus named parameters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EventLog {
    /// Event name (e.g., "Transfer"); None for logs the decoder could not name
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// A transaction receipt whose logs have been decoded
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TransactionReceipt {
    #[serde(default)]
    pub logs: Vec<EventLog>,
}

/// Decodes raw EVM logs into named events
pub trait LogDecoder {
    /// Returns None for logs this decoder does not recognize
    fn decode(&self, log: &EvmLog) -> Option<EventLog>;
}

/// Resolves a contract address into a handle bound to that address
pub trait ContractFactory {
    type Handle;

    fn at(&self, address: &str) -> Option<Self::Handle>;
}

impl TransactionReceipt {
    /// Decodes a raw receipt, keeping log order and dropping unrecognized logs
    pub fn decode<D: LogDecoder + ?Sized>(raw: &EvmTransactionReceipt, decoder: &D) -> Self {
        Self {
            logs: raw.logs.iter().filter_map(|log| decoder.decode(log)).collect(),
        }
    }
}

/// Keccak-256 topic hash of a canonical event signature
///
/// `event_topic("Transfer(address,address,uint256)")` is the value a node puts in
/// `topics[0]` of every Transfer log.
pub fn event_topic(signature: &str) -> String {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}

// ============================================================================
// PARAMETER EXTRACTION
// ============================================================================

/// Returns the single log left after the optional event-name filter
fn single_log<'a>(
    transaction: &'a TransactionReceipt,
    event_name: Option<&str>,
) -> Result<&'a EventLog, HelperError> {
    let logs: Vec<&EventLog> = match event_name {
        Some(name) => transaction
            .logs
            .iter()
            .filter(|log| log.event.as_deref() == Some(name))
            .collect(),
        None => transaction.logs.iter().collect(),
    };

    // Zero and multiple matches fail alike; the count tells them apart
    match logs.as_slice() {
        [log] => Ok(*log),
        _ => Err(HelperError::LogCount { found: logs.len() }),
    }
}

/// Reads `param_name` from the only log (optionally restricted to `event_name`)
///
/// # Arguments
///
/// * `transaction` - Decoded receipt
/// * `param_name` - Argument name inside the event
/// * `event_name` - Exact event name to filter on, if any
///
/// # Returns
///
/// * `Ok(Value)` - The parameter value, verbatim
/// * `Err(HelperError::LogCount)` - Zero or several logs remained after filtering
/// * `Err(HelperError::MissingEventParam)` - The log has no such argument
pub fn get_param_from_tx_event(
    transaction: &TransactionReceipt,
    param_name: &str,
    event_name: Option<&str>,
) -> Result<Value, HelperError> {
    let log = single_log(transaction, event_name)?;
    log.args
        .get(param_name)
        .cloned()
        .ok_or_else(|| HelperError::MissingEventParam(param_name.to_string()))
}

/// Reads an address parameter from the only log and resolves it through `factory`
///
/// Fails with [`HelperError::ContractResolution`] when the parameter is not an
/// address string or the factory cannot bind to it.
pub fn get_contract_from_tx_event<F: ContractFactory + ?Sized>(
    transaction: &TransactionReceipt,
    param_name: &str,
    factory: &F,
    event_name: Option<&str>,
) -> Result<F::Handle, HelperError> {
    let param = get_param_from_tx_event(transaction, param_name, event_name)?;
    let resolution_failed = || HelperError::ContractResolution {
        param_name: param_name.to_string(),
        param: match &param {
            Value::String(address) => address.clone(),
            other => other.to_string(),
        },
    };

    let address = param.as_str().ok_or_else(resolution_failed)?;
    factory.at(address).ok_or_else(resolution_failed)
}
