//! Wallet and account management

use agx_crypto::{public_key_to_address, sign, PrivateKey, PublicKey, Signature};
use agx_primitives::{Address, H256};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::SdkError;

/// Wallet holding the signing key for write operations
///
/// Note: Clone is intentionally not implemented to prevent accidental key
/// duplication. Use `from_private_key` to create a new wallet with the same
/// key if needed.
pub struct Wallet {
    private_key: PrivateKey,
    address: Address,
}

impl Wallet {
    /// Create a new random wallet
    pub fn new_random() -> Self {
        let private_key = SigningKey::random(&mut OsRng);
        let public_key = private_key.verifying_key();
        let address = public_key_to_address(public_key);

        Self {
            private_key,
            address,
        }
    }

    /// Create a wallet from a 32-byte private key
    pub fn from_private_key(key: &[u8; 32]) -> Result<Self, SdkError> {
        let private_key = SigningKey::from_slice(key)
            .map_err(|e| SdkError::InvalidPrivateKey(e.to_string()))?;
        let public_key = private_key.verifying_key();
        let address = public_key_to_address(public_key);

        Ok(Self {
            private_key,
            address,
        })
    }

    /// Create a wallet from a hex-encoded private key
    ///
    /// Accepts both with and without "0x" prefix.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, SdkError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            bytes.zeroize(); // clear sensitive data before returning
            return Err(SdkError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();

        let result = Self::from_private_key(&key);
        key.zeroize();
        result
    }

    /// Get the wallet's address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Get the wallet's public key
    pub fn public_key(&self) -> &PublicKey {
        self.private_key.verifying_key()
    }

    /// Sign a payload digest (32 bytes)
    pub fn sign_digest(&self, digest: &H256) -> Result<Signature, SdkError> {
        sign(digest, &self.private_key).map_err(|e| SdkError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agx_crypto::{recover_public_key, verify};

    #[test]
    fn test_wallet_random() {
        let wallet = Wallet::new_random();
        assert_ne!(wallet.address(), &Address::ZERO);
    }

    #[test]
    fn test_wallet_from_private_key() {
        let key = [0x42u8; 32];
        let wallet = Wallet::from_private_key(&key).unwrap();
        assert_ne!(wallet.address(), &Address::ZERO);
    }

    #[test]
    fn test_wallet_from_hex_with_and_without_prefix() {
        let with = Wallet::from_private_key_hex(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        let without = Wallet::from_private_key_hex(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();

        assert_eq!(with.address(), without.address());
        assert_eq!(
            with.address().to_hex(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_invalid_hex_length() {
        assert!(Wallet::from_private_key_hex("0x1234").is_err());
    }

    #[test]
    fn test_wallet_sign_digest() {
        let wallet = Wallet::new_random();
        let digest = H256::from_bytes([0x42; 32]);
        let signature = wallet.sign_digest(&digest).unwrap();

        assert!(verify(&digest, &signature, wallet.public_key()).unwrap());
    }

    #[test]
    fn test_signature_recovers_to_wallet_address() {
        let wallet = Wallet::new_random();
        let digest = H256::from_bytes([0x42; 32]);
        let signature = wallet.sign_digest(&digest).unwrap();

        let recovered = recover_public_key(&digest, &signature).unwrap();
        assert_eq!(&public_key_to_address(&recovered), wallet.address());
    }

    #[test]
    fn test_wallet_determinism() {
        let key = [0x42u8; 32];
        let wallet1 = Wallet::from_private_key(&key).unwrap();
        let wallet2 = Wallet::from_private_key(&key).unwrap();

        assert_eq!(wallet1.address(), wallet2.address());
    }

    #[test]
    fn test_wallet_debug_hides_key() {
        let wallet = Wallet::new_random();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains("Wallet"));
        assert!(debug.contains("address"));
        assert!(!debug.contains("private_key"));
    }
}
