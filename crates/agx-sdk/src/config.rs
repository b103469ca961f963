//! Client configuration
//!
//! A `ClientConfig` is built once, validated, and never mutated afterwards.
//! The client shares it behind an `Arc`, so concurrent submission flows all
//! read the same instance.

use std::time::Duration;

use crate::{SdkError, Wallet};

/// Default number of submission attempts before giving up
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default initial backoff between submission attempts (doubles per attempt)
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);
/// Default interval between receipt polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Default per-request timeout for the HTTP transport
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable client configuration
#[derive(Debug)]
pub struct ClientConfig {
    rpc_url: String,
    chain_id: String,
    wallet: Option<Wallet>,
    max_retries: u32,
    retry_backoff: Duration,
    poll_interval: Duration,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Start building a configuration for the given endpoint and chain
    pub fn builder(rpc_url: impl Into<String>, chain_id: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            rpc_url: rpc_url.into(),
            chain_id: chain_id.into(),
            wallet: None,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Build a configuration from environment variables
    ///
    /// Reads `AGEFIX_RPC_URL` and `AGEFIX_CHAIN_ID` (required) and
    /// `AGEFIX_PRIVATE_KEY` (optional; enables write operations).
    pub fn from_env() -> Result<Self, SdkError> {
        let rpc_url = std::env::var("AGEFIX_RPC_URL")
            .map_err(|_| SdkError::Config("AGEFIX_RPC_URL is not set".to_string()))?;
        let chain_id = std::env::var("AGEFIX_CHAIN_ID")
            .map_err(|_| SdkError::Config("AGEFIX_CHAIN_ID is not set".to_string()))?;

        let mut builder = Self::builder(rpc_url, chain_id);
        if let Ok(key) = std::env::var("AGEFIX_PRIVATE_KEY") {
            builder = builder.wallet(Wallet::from_private_key_hex(&key)?);
        }
        builder.build()
    }

    /// RPC endpoint URL, without trailing slash
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Chain identifier, e.g. `agefix-mainnet-1`
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Configured signing wallet, if any
    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    /// Maximum submission attempts
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Initial backoff between submission attempts
    pub fn retry_backoff(&self) -> Duration {
        self.retry_backoff
    }

    /// Interval between receipt polls
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Per-request timeout for the HTTP transport
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    rpc_url: String,
    chain_id: String,
    wallet: Option<Wallet>,
    max_retries: u32,
    retry_backoff: Duration,
    poll_interval: Duration,
    request_timeout: Duration,
}

impl ClientConfigBuilder {
    /// Set the signing wallet
    pub fn wallet(mut self, wallet: Wallet) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Set the maximum number of submission attempts
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial backoff between submission attempts
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the receipt poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the per-request timeout for the HTTP transport
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ClientConfig, SdkError> {
        let rpc_url = self.rpc_url.trim_end_matches('/').to_string();
        if rpc_url.is_empty() {
            return Err(SdkError::Config("rpc_url must not be empty".to_string()));
        }
        if self.chain_id.is_empty() {
            return Err(SdkError::Config("chain_id must not be empty".to_string()));
        }
        if self.max_retries == 0 {
            return Err(SdkError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }

        Ok(ClientConfig {
            rpc_url,
            chain_id: self.chain_id,
            wallet: self.wallet,
            max_retries: self.max_retries,
            retry_backoff: self.retry_backoff,
            poll_interval: self.poll_interval,
            request_timeout: self.request_timeout,
        })
    }
}
