//! SDK result records

use agx_primitives::{Address, H256};
use agx_types::Receipt;
use serde_json::Value;

/// Result of deploying a contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDeployment {
    /// Address of the deployed contract
    pub contract_address: Address,
    /// Hash of the deploying transaction
    pub transaction_hash: H256,
    /// Block the deployment was included in
    pub block_number: u64,
}

/// Result of a read-only contract query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Method that was queried
    pub method: String,
    /// Node-returned data, structure owned by the contract
    pub data: Value,
}

/// Lifecycle of a submitted transaction as observed locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Accepted into the node's pool, outcome unknown
    Submitted,
    /// Receipt observed with success status
    Confirmed,
    /// Receipt observed with revert status
    Reverted,
    /// Local wait timed out; the transaction may still confirm
    Unknown,
}

/// Result of a transaction submission
///
/// The hash is assigned exactly once when the node accepts the transaction
/// and never changes; only `status` and `receipt` transition as
/// confirmation proceeds.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    hash: H256,
    /// Locally observed status
    pub status: SubmitStatus,
    /// Receipt, once observed
    pub receipt: Option<Receipt>,
}

impl TransactionResult {
    /// Create a freshly submitted result
    pub(crate) fn submitted(hash: H256) -> Self {
        Self {
            hash,
            status: SubmitStatus::Submitted,
            receipt: None,
        }
    }

    /// The transaction hash
    pub fn hash(&self) -> &H256 {
        &self.hash
    }

    /// Gas used, once a receipt has been observed
    pub fn gas_used(&self) -> Option<u64> {
        self.receipt.as_ref().map(|r| r.gas_used)
    }

    /// Inclusion block, once a receipt has been observed
    pub fn block_number(&self) -> Option<u64> {
        self.receipt.as_ref().map(|r| r.block_number)
    }

    /// Check if the transaction has been confirmed successfully
    pub fn is_confirmed(&self) -> bool {
        self.status == SubmitStatus::Confirmed
    }
}
