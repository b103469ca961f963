//! Transaction receipts as reported by the AgeFix node

use agx_primitives::{Address, H256};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Transaction execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Transaction executed successfully
    Success,
    /// Execution reverted
    Reverted,
}

impl TxStatus {
    /// Check if this is the success status
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

/// Log entry emitted during transaction execution
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Contract address that emitted the log
    pub address: Address,
    /// Log topics (indexed parameters)
    pub topics: Vec<H256>,
    /// Log data (non-indexed parameters), hex on the wire
    #[serde(with = "hex_bytes")]
    pub data: Bytes,
}

impl Log {
    /// Create a new log entry
    pub fn new(address: Address, topics: Vec<H256>, data: Bytes) -> Self {
        Self {
            address,
            topics,
            data,
        }
    }

    /// Get the first topic (usually the event signature)
    pub fn topic0(&self) -> Option<&H256> {
        self.topics.first()
    }
}

/// Transaction receipt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to
    pub tx_hash: H256,
    /// Execution status
    pub status: TxStatus,
    /// Block the transaction was included in
    pub block_number: u64,
    /// Gas consumed by the transaction
    pub gas_used: u64,
    /// Node-reported revert reason (set when status is reverted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revert_reason: Option<String>,
    /// Logs emitted during execution
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Check if the transaction succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get number of logs
    pub fn log_count(&self) -> usize {
        self.logs.len()
    }
}

/// Result of looking up a transaction by hash (`GET /tx/{hash}`)
///
/// The node tags the envelope with the transaction's pool state; the
/// receipt is only present once the transaction made it into a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TxLookup {
    /// Still in the pool, no receipt yet
    Pending,
    /// Executed; receipt available
    Confirmed {
        /// The execution receipt
        receipt: Receipt,
    },
    /// Evicted from the pool without execution
    Dropped,
}

mod hex_bytes {
    use bytes::Bytes;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(data)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s).map(Bytes::from).map_err(de::Error::custom)
    }
}
