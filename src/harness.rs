//! Dev node control
//!
//! [`ChainTestHelpers`] owns the injected [`EvmClient`] and exposes the chain
//! operations tests need: time warps, block mining, snapshots and balances.
//! Every step is a sequential `async fn`; calls against the same node are not
//! serialized, so callers must not overlap two time warps.

use crate::config::HarnessConfig;
use crate::evm_client::EvmClient;
use anyhow::{Context, Result};
use ethereum_types::U256;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Test harness bound to one dev node
pub struct ChainTestHelpers {
    client: EvmClient,
}

impl ChainTestHelpers {
    pub fn new(client: EvmClient) -> Self {
        Self { client }
    }

    /// Builds the harness from a [`HarnessConfig`]
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let client = EvmClient::from_config(config).with_context(|| {
            format!("Failed to create EVM client for RPC URL: {}", config.rpc_url)
        })?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &EvmClient {
        &self.client
    }

    /// Mines one block (`evm_mine`, no params)
    pub async fn mine_block(&self) -> Result<()> {
        self.client.send::<Value>("evm_mine", vec![]).await?;
        debug!(url = %self.client.base_url(), "Mined block");
        Ok(())
    }

    /// Advances the node clock by `seconds` and mines a block so the warp takes effect
    ///
    /// Returns only after both `evm_increaseTime` and `evm_mine` have completed.
    /// If the time warp fails, its error is returned and no block is mined.
    ///
    /// # Arguments
    ///
    /// * `seconds` - Seconds to add to the node's clock
    pub async fn increase_timestamp(&self, seconds: u64) -> Result<()> {
        self.client
            .send::<Value>("evm_increaseTime", vec![json!(seconds)])
            .await?;
        self.mine_block().await?;
        info!(seconds, "Increased dev node timestamp");
        Ok(())
    }

    /// Takes a state snapshot (`evm_snapshot`) and returns its id
    pub async fn snapshot(&self) -> Result<String> {
        let id: Value = self
            .client
            .send("evm_snapshot", vec![])
            .await?
            .ok_or_else(|| anyhow::anyhow!("No result in evm_snapshot response"))?;

        // ganache returns a hex string, some nodes a bare number
        match id {
            Value::String(id) => Ok(id),
            Value::Number(n) => {
                let id = n
                    .as_u64()
                    .ok_or_else(|| anyhow::anyhow!("Unexpected evm_snapshot result: {}", n))?;
                Ok(format!("0x{:x}", id))
            }
            other => Err(anyhow::anyhow!("Unexpected evm_snapshot result: {}", other)),
        }
    }

    /// Reverts the node to a snapshot (`evm_revert`)
    ///
    /// Returns whether the node accepted the snapshot id. A snapshot can only be
    /// reverted to once.
    pub async fn revert_to(&self, snapshot_id: &str) -> Result<bool> {
        let reverted: Option<bool> = self
            .client
            .send("evm_revert", vec![json!(snapshot_id)])
            .await?;
        Ok(reverted.unwrap_or(false))
    }

    /// Gets an account balance in wei
    pub async fn get_balance(&self, account: &str) -> Result<U256> {
        self.client.get_balance(account).await
    }
}
