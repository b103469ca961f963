//! AgefixClient - main client for the node's HTTP API

use std::sync::Arc;

use agx_primitives::{Address, H256, U256};
use agx_types::{DeployPayload, Receipt, TxLookup};
use bytes::Bytes;
use serde_json::Value;

use crate::abi::{encode, Token};
use crate::config::ClientConfig;
use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::types::{ContractDeployment, QueryResult};
use crate::wallet::Wallet;
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for the AgeFix node's HTTP API
///
/// The configuration is immutable and shared behind an `Arc`; the client
/// itself is `Send + Sync` and safe to use from concurrent submission flows.
pub struct AgefixClient {
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) config: Arc<ClientConfig>,
}

impl AgefixClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn connect(config: ClientConfig) -> Result<Self, SdkError> {
        let transport = HttpTransport::new(config.rpc_url(), config.request_timeout())?;
        Ok(Self {
            transport: Box::new(transport),
            config: Arc::new(config),
        })
    }

    /// Create a client with mock transport and a test wallet (for testing)
    pub fn new_mock() -> Self {
        let wallet = Wallet::from_private_key(&[0x42; 32]).expect("static test key is valid");
        let config = ClientConfig::builder("mock://agefix", "agefix-testnet-1")
            .wallet(wallet)
            .build()
            .expect("static test config is valid");

        Self {
            transport: Box::new(MockTransport::new()),
            config: Arc::new(config),
        }
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static, config: ClientConfig) -> Self {
        Self {
            transport: Box::new(transport),
            config: Arc::new(config),
        }
    }

    /// The client configuration
    pub fn config(&self) -> &Arc<ClientConfig> {
        &self.config
    }

    /// The configured wallet, or a config error if none is set
    pub(crate) fn wallet(&self) -> Result<&Wallet, SdkError> {
        self.config
            .wallet()
            .ok_or_else(|| SdkError::Config("no signing key configured".to_string()))
    }

    /// Parse a caller-supplied contract or account address
    pub(crate) fn parse_address(&self, address: &str) -> Result<Address, SdkError> {
        Address::from_hex(address)
            .map_err(|e| SdkError::InvalidArgument(format!("malformed address: {}", e)))
    }

    // ==================== Contract Deployment ====================

    /// Deploy a new AGXCL contract
    ///
    /// The deployment payload is signed locally with the configured key.
    pub async fn deploy_contract(
        &self,
        code: &str,
        constructor_args: &[Token],
    ) -> Result<ContractDeployment, SdkError> {
        let wallet = self.wallet()?;
        if code.trim().is_empty() {
            return Err(SdkError::InvalidArgument(
                "contract code must not be empty".to_string(),
            ));
        }

        let payload = DeployPayload {
            chain_id: self.config.chain_id().to_string(),
            code: code.to_string(),
            ctor_data: Bytes::from(encode(constructor_args)),
        };
        let signature = wallet.sign_digest(&payload.digest())?;

        let body = serde_json::json!({
            "code": code,
            "args": tokens_to_json(constructor_args),
            "chainId": self.config.chain_id(),
            "sender": wallet.address().to_hex(),
            "payload": format!("0x{}", hex::encode(&payload.ctor_data)),
            "signature": signature.to_hex(),
        });

        let response = self.post_with_retry("deploy", body).await?;

        Ok(ContractDeployment {
            contract_address: parse_address_field(&response, "contractAddress")?,
            transaction_hash: parse_hash_field(&response, "txHash")?,
            block_number: parse_u64_field(&response, "blockNumber")?,
        })
    }

    // ==================== Read-only Queries ====================

    /// Query contract state (read-only, does not create a transaction)
    pub async fn query_contract(
        &self,
        contract_address: &str,
        method: &str,
        args: &[Token],
    ) -> Result<QueryResult, SdkError> {
        let contract = self.parse_address(contract_address)?;

        let body = serde_json::json!({
            "contractAddress": contract.to_hex(),
            "method": method,
            "args": tokens_to_json(args),
            "chainId": self.config.chain_id(),
        });

        let mut response = self.transport.post_json("query", body).await?;
        let data = response
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| SdkError::Serialization("response missing result".to_string()))?;

        Ok(QueryResult {
            method: method.to_string(),
            data,
        })
    }

    /// Get the AGX balance of an account
    pub async fn get_balance(&self, address: &str) -> Result<U256, SdkError> {
        let address = self.parse_address(address)?;

        let response = self
            .transport
            .get_json(&format!("balance/{}", address.to_hex()))
            .await?;

        parse_u256_field(&response, "balance")
    }

    /// Estimate gas for a contract method call
    pub async fn estimate_gas(
        &self,
        contract_address: &str,
        method: &str,
        args: &[Token],
    ) -> Result<u64, SdkError> {
        let contract = self.parse_address(contract_address)?;

        let body = serde_json::json!({
            "contractAddress": contract.to_hex(),
            "method": method,
            "args": tokens_to_json(args),
            "chainId": self.config.chain_id(),
        });

        let response = self.transport.post_json("estimateGas", body).await?;
        parse_u64_field(&response, "gasEstimate")
    }

    // ==================== Transaction Queries ====================

    /// Get a transaction receipt
    ///
    /// Returns `None` while the transaction is still pending. A
    /// node-reported drop surfaces as [`SdkError::TransactionDropped`].
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: &H256,
    ) -> Result<Option<Receipt>, SdkError> {
        match self.lookup_transaction(tx_hash).await? {
            TxLookup::Pending => Ok(None),
            TxLookup::Confirmed { receipt } => Ok(Some(receipt)),
            TxLookup::Dropped => Err(SdkError::TransactionDropped),
        }
    }

    /// Look up a transaction's pool state by hash
    pub(crate) async fn lookup_transaction(&self, tx_hash: &H256) -> Result<TxLookup, SdkError> {
        let response = self
            .transport
            .get_json(&format!("tx/{}", tx_hash.to_hex()))
            .await?;
        deserialize_response(response)
    }
}

// ==================== Response Parsing Helpers ====================

/// Project tokens into the JSON argument array the node expects
pub(crate) fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(Token::to_json).collect())
}

fn field<'a>(response: &'a Value, name: &str) -> Result<&'a Value, SdkError> {
    response
        .get(name)
        .ok_or_else(|| SdkError::Serialization(format!("response missing {}", name)))
}

pub(crate) fn parse_str_field<'a>(response: &'a Value, name: &str) -> Result<&'a str, SdkError> {
    field(response, name)?
        .as_str()
        .ok_or_else(|| SdkError::Serialization(format!("{} is not a string", name)))
}

pub(crate) fn parse_u64_field(response: &Value, name: &str) -> Result<u64, SdkError> {
    field(response, name)?
        .as_u64()
        .ok_or_else(|| SdkError::Serialization(format!("{} is not an unsigned integer", name)))
}

pub(crate) fn parse_u256_field(response: &Value, name: &str) -> Result<U256, SdkError> {
    let s = parse_str_field(response, name)?;
    U256::from_dec_str(s)
        .map_err(|e| SdkError::Serialization(format!("{} is not a decimal value: {}", name, e)))
}

pub(crate) fn parse_hash_field(response: &Value, name: &str) -> Result<H256, SdkError> {
    let s = parse_str_field(response, name)?;
    H256::from_hex(s).map_err(|e| SdkError::Serialization(format!("{} is not a hash: {}", name, e)))
}

pub(crate) fn parse_address_field(response: &Value, name: &str) -> Result<Address, SdkError> {
    let s = parse_str_field(response, name)?;
    Address::from_hex(s)
        .map_err(|e| SdkError::Serialization(format!("{} is not an address: {}", name, e)))
}
