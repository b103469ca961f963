//! Crypto error types

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Signing operation failed
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Signature is malformed
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Recovery ID out of range
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed
    #[error("recovery failed: {0}")]
    RecoveryFailed(String),
}
