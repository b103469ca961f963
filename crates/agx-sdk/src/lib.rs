//! # agx-sdk
//!
//! Rust SDK for the AgeFix blockchain.
//!
//! ## Features
//!
//! - **AgefixClient**: client for the node's HTTP API
//! - **ClientConfig**: immutable, `Arc`-shared configuration
//! - **Wallet**: key management and local payload signing
//! - **Transaction submission**: bounded-retry submission plus receipt
//!   polling with a deadline
//! - **Contract helpers**: method registries and the stock token/NFT
//!   contract wrappers
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use agx_sdk::{AgefixClient, ClientConfig, Wallet};
//! use agx_sdk::abi::Token;
//! use agx_primitives::U256;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder("https://rpc.agefix.com", "agefix-mainnet-1")
//!         .wallet(Wallet::new_random())
//!         .build()?;
//!     let client = AgefixClient::connect(config)?;
//!
//!     let result = client
//!         .submit(
//!             "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d",
//!             "transfer",
//!             &[
//!                 Token::Address("0x1234567890123456789012345678901234567890".parse()?),
//!                 Token::Uint(U256::from(1000u64)),
//!             ],
//!             U256::zero(),
//!         )
//!         .await?;
//!
//!     let receipt = client
//!         .await_receipt(result.hash(), Duration::from_secs(30))
//!         .await?;
//!     println!("confirmed in block {}", receipt.block_number);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Read-only queries
//!
//! ```rust,no_run
//! use agx_sdk::{Address, AgefixClient};
//! use agx_sdk::abi::Token;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AgefixClient::new_mock();
//!
//!     let owner: Address = "0x1234567890123456789012345678901234567890".parse()?;
//!     let result = client
//!         .query_contract(
//!             "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d",
//!             "balanceOf",
//!             &[Token::Address(owner)],
//!         )
//!         .await?;
//!     println!("{}: {:?}", result.method, result.data);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod client;
mod config;
pub mod contract;
mod error;
mod submitter;
mod transport;
mod types;
mod wallet;

// Re-export main types
pub use client::AgefixClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::SdkError;
pub use transport::MockTransport;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use types::{ContractDeployment, QueryResult, SubmitStatus, TransactionResult};
pub use wallet::Wallet;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives and wire types for convenience
pub use agx_primitives::{Address, BlockHeight, Gas, TxHash, H256, U256};
pub use agx_types::{Receipt, TxStatus};
