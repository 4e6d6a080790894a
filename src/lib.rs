//! Chain Test Helpers
//!
//! Test-support helpers for suites that exercise smart contracts on an EVM
//! development node through JSON-RPC:
//!
//! - Classifying failed transactions as expected reverts
//! - Extracting parameters from emitted event logs
//! - Warping dev node time and mining blocks
//! - Fetching balances as `U256`
//! - Asserting that an async operation rejects
//! - Converting human-readable token amounts to wei
//!
//! ## Usage
//!
//! ```no_run
//! use chain_test_helpers::{to_wei, ChainTestHelpers, EvmClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let helpers = ChainTestHelpers::new(EvmClient::new("http://127.0.0.1:8545")?);
//! helpers.increase_timestamp(3600).await?;
//! let balance = helpers.get_balance("0x0000000000000000000000000000000000000001").await?;
//! assert!(balance >= to_wei(0, "ether")?);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod config;
pub mod error;
pub mod events;
pub mod evm_client;
pub mod exceptions;
pub mod harness;
pub mod logging;
pub mod units;

pub use assertions::{assert_throws_asynchronously, assert_throws_asynchronously_with, EVERYTHING_IS_FINE};
pub use crate::config::HarnessConfig;
pub use error::HelperError;
pub use events::{
    event_topic, get_contract_from_tx_event, get_param_from_tx_event, ContractFactory, EventLog,
    LogDecoder, TransactionReceipt,
};
pub use evm_client::{EvmClient, EvmLog, EvmTransactionReceipt};
pub use exceptions::{ensure_exception, ensure_exception_chain, is_exception, is_exception_chain};
pub use harness::ChainTestHelpers;
pub use units::{to_wei, Unit};

/// The all-zero address used as the "null" account sentinel
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
