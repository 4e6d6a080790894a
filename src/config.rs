//! Harness configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML file,
//! then `CHAIN_TEST_*` environment variables.
//!
//! ```toml
//! rpc_url = "http://127.0.0.1:8545"
//! request_timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the config file path used by [`HarnessConfig::load`]
pub const CONFIG_PATH_ENV: &str = "CHAIN_TEST_CONFIG_PATH";

const ENV_PREFIX: &str = "CHAIN_TEST";
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the dev node under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// JSON-RPC endpoint of the dev node
    pub rpc_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl HarnessConfig {
    /// Loads configuration, reading the file named by `CHAIN_TEST_CONFIG_PATH` if set
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from_path(path.as_deref())
    }

    /// Loads configuration from an explicit TOML file (or defaults + env when None)
    pub fn load_from_path(path: Option<&str>) -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .set_default("rpc_url", DEFAULT_RPC_URL)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::new(path, ::config::FileFormat::Toml).required(true),
            );
        }

        let config: HarnessConfig = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| match path {
                Some(path) => format!("Failed to read harness config from {}", path),
                None => "Failed to build harness config".to_string(),
            })?
            .try_deserialize()
            .context("Failed to deserialize harness config")?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that the endpoint is an http(s) URL and the timeout is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            anyhow::bail!("rpc_url must not be empty");
        }
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            anyhow::bail!("rpc_url must start with http:// or https://: {}", self.rpc_url);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }
}
