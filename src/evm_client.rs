//! EVM Client Module
//!
//! This module provides a client for communicating with an EVM development node
//! (ganache, hardhat, anvil) via its JSON-RPC API. It is the single transport the
//! test helpers use; every request is built per call and discarded after the
//! response arrives.

use crate::config::HarnessConfig;
use anyhow::{Context, Result};
use ethereum_types::U256;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

// ============================================================================
// API RESPONSE STRUCTURES
// ============================================================================

/// EVM JSON-RPC request wrapper
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    /// Omitted on the wire when empty (`evm_mine`, `evm_snapshot`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<Value>,
    id: u64,
}

/// EVM JSON-RPC response wrapper
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// EVM event log entry as returned inside a transaction receipt
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmLog {
    /// Address of the contract that emitted the event
    pub address: String,
    /// Array of topics (topics[0] is the event signature hash)
    pub topics: Vec<String>,
    /// Event data (non-indexed parameters)
    pub data: String,
    #[serde(rename = "blockNumber", default)]
    pub block_number: Option<String>,
    #[serde(rename = "transactionHash", default)]
    pub transaction_hash: Option<String>,
    #[serde(rename = "logIndex", default)]
    pub log_index: Option<String>,
}

/// Raw transaction receipt from eth_getTransactionReceipt
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmTransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    #[serde(rename = "blockNumber", default)]
    pub block_number: Option<String>,
    /// Transaction status ("0x1" = success, "0x0" = failure)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Vec<EvmLog>,
}

// ============================================================================
// EVM CLIENT IMPLEMENTATION
// ============================================================================

/// Client for communicating with an EVM development node via JSON-RPC
pub struct EvmClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL of the EVM node (e.g., "http://127.0.0.1:8545")
    base_url: String,
}

impl EvmClient {
    /// Creates a new EVM client for the given node URL with a 30 second request timeout
    ///
    /// # Arguments
    ///
    /// * `node_url` - Base URL of the EVM node (e.g., "http://127.0.0.1:8545")
    ///
    /// # Returns
    ///
    /// * `Ok(EvmClient)` - Successfully created client
    /// * `Err(anyhow::Error)` - Failed to create client
    pub fn new(node_url: &str) -> Result<Self> {
        Self::with_timeout(node_url, Duration::from_secs(30))
    }

    /// Creates a new EVM client with an explicit request timeout
    pub fn with_timeout(node_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy() // Avoid macOS system-configuration issues in tests
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: node_url.to_string(),
        })
    }

    /// Creates a client from a validated harness configuration
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        Self::with_timeout(
            &config.rpc_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Sends a raw JSON-RPC request and returns the `result` field
    ///
    /// The request id is derived from the current wall-clock time in milliseconds.
    ///
    /// # Arguments
    ///
    /// * `method` - JSON-RPC method name, sent byte-for-byte
    /// * `params` - Positional parameters; an empty vector omits `params`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - Node returned a result
    /// * `Ok(None)` - Node returned `"result": null`
    /// * `Err(anyhow::Error)` - Send failure, unparseable body, or JSON-RPC error object
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Option<T>> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: request_id(),
        };

        debug!(method, id = request.id, url = %self.base_url, "Sending JSON-RPC request");

        let response: JsonRpcResponse<T> = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", method, self.base_url))?
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response from {}", method, self.base_url))?;

        if let Some(error) = response.error {
            warn!(method, code = error.code, message = %error.message, "JSON-RPC error response");
            return Err(anyhow::anyhow!(
                "JSON-RPC error from {}: {} (code: {})",
                self.base_url,
                error.message,
                error.code
            ));
        }

        Ok(response.result)
    }

    /// Gets the balance of an account at the latest block, in wei
    ///
    /// # Arguments
    ///
    /// * `account` - Account address (0x-prefixed)
    ///
    /// # Returns
    ///
    /// * `Ok(U256)` - Balance in wei
    /// * `Err(anyhow::Error)` - Failed to query or parse the balance
    pub async fn get_balance(&self, account: &str) -> Result<U256> {
        let balance_hex: String = self
            .send("eth_getBalance", vec![serde_json::json!(account), serde_json::json!("latest")])
            .await?
            .ok_or_else(|| anyhow::anyhow!("No result in eth_getBalance response"))?;

        parse_quantity(&balance_hex)
            .with_context(|| format!("Failed to parse balance of {}", account))
    }

    /// Queries a transaction receipt by hash using eth_getTransactionReceipt
    ///
    /// # Arguments
    ///
    /// * `hash` - Transaction hash (with or without 0x prefix)
    ///
    /// # Returns
    ///
    /// * `Ok(Some(EvmTransactionReceipt))` - Mined transaction receipt with raw logs
    /// * `Ok(None)` - Transaction is pending or unknown
    /// * `Err(anyhow::Error)` - Failed to query the receipt
    pub async fn get_transaction_receipt(&self, hash: &str) -> Result<Option<EvmTransactionReceipt>> {
        // Normalize hash (ensure 0x prefix)
        let hash = if hash.starts_with("0x") {
            hash.to_string()
        } else {
            format!("0x{}", hash)
        };

        self.send("eth_getTransactionReceipt", vec![serde_json::json!(hash)])
            .await
    }

    /// Gets the current block number
    pub async fn get_block_number(&self) -> Result<u64> {
        let block_number_hex: String = self
            .send("eth_blockNumber", vec![])
            .await?
            .ok_or_else(|| anyhow::anyhow!("No result in eth_blockNumber response"))?;

        let block_number = u64::from_str_radix(
            block_number_hex
                .strip_prefix("0x")
                .unwrap_or(&block_number_hex),
            16,
        )
        .context("Failed to parse block number")?;

        Ok(block_number)
    }

    /// Returns the base URL of this client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Parses a JSON-RPC hex quantity ("0x1bc16d674ec80000") into a U256
pub fn parse_quantity(quantity: &str) -> Result<U256> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| anyhow::anyhow!("Invalid hex quantity '{}': {:?}", quantity, e))
}

fn request_id() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
