//! SDK error types

use std::time::Duration;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Client configuration is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed address or arguments
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport failure on a single request
    #[error("transport error: {0}")]
    Transport(String),

    /// Transport failures exhausted the submission retry budget
    #[error("network error after {attempts} attempts: {message}")]
    Network {
        /// Attempts made before giving up
        attempts: u32,
        /// Last transport error observed
        message: String,
    },

    /// Local wait for a receipt exceeded the deadline
    ///
    /// The transaction may still confirm later; re-poll with the same hash.
    #[error("timed out after {waited:?} waiting for receipt")]
    Timeout {
        /// How long the caller waited
        waited: Duration,
    },

    /// Node reported the transaction reverted
    #[error("execution reverted: {reason}")]
    ExecutionReverted {
        /// Node-reported revert reason
        reason: String,
    },

    /// Node dropped the transaction from its pool without executing it
    #[error("transaction dropped by node")]
    TransactionDropped,

    /// Error reported by the node
    #[error("rpc error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Argument encoding error
    #[error("encoding error: {0}")]
    AbiEncode(String),

    /// Return data decoding error
    #[error("decoding error: {0}")]
    AbiDecode(String),

    /// Invalid private key
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signing failed
    #[error("signing failed: {0}")]
    Signing(String),

    /// Invalid hex string
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<agx_crypto::CryptoError> for SdkError {
    fn from(e: agx_crypto::CryptoError) -> Self {
        SdkError::Signing(e.to_string())
    }
}

impl From<agx_primitives::PrimitiveError> for SdkError {
    fn from(e: agx_primitives::PrimitiveError) -> Self {
        SdkError::InvalidArgument(e.to_string())
    }
}
