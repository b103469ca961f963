//! Wallet integration tests

use agx_crypto::{public_key_to_address, recover_public_key, verify};
use agx_sdk::{SdkError, Wallet};
use agx_types::CallPayload;
use agx_primitives::{Address, U256};
use bytes::Bytes;

// Well-known test vector key
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

#[test]
fn test_known_key_derives_known_address() {
    let wallet = Wallet::from_private_key_hex(TEST_KEY).unwrap();
    assert_eq!(wallet.address().to_hex(), TEST_ADDRESS);
}

#[test]
fn test_random_wallets_are_distinct() {
    let a = Wallet::new_random();
    let b = Wallet::new_random();
    assert_ne!(a.address(), b.address());
}

#[test]
fn test_rejects_bad_key_material() {
    // wrong length
    assert!(matches!(
        Wallet::from_private_key_hex("0xabcd"),
        Err(SdkError::InvalidPrivateKey(_))
    ));
    // not hex at all
    assert!(Wallet::from_private_key_hex("0xzz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80").is_err());
    // all-zero key is not a valid scalar
    assert!(Wallet::from_private_key(&[0u8; 32]).is_err());
}

#[test]
fn test_payload_signature_verifies_and_recovers() {
    let wallet = Wallet::from_private_key_hex(TEST_KEY).unwrap();

    let payload = CallPayload {
        chain_id: "agefix-testnet-1".to_string(),
        contract: Address::from_bytes([0x42; 20]),
        data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]),
        value: U256::from(1000),
    };
    let digest = payload.digest();
    let signature = wallet.sign_digest(&digest).unwrap();

    assert!(verify(&digest, &signature, wallet.public_key()).unwrap());

    // The node authenticates the sender by recovering the address
    let recovered = recover_public_key(&digest, &signature).unwrap();
    assert_eq!(&public_key_to_address(&recovered), wallet.address());
}

#[test]
fn test_signing_is_deterministic_per_payload() {
    let wallet = Wallet::from_private_key_hex(TEST_KEY).unwrap();

    let payload = CallPayload {
        chain_id: "agefix-testnet-1".to_string(),
        contract: Address::from_bytes([0x42; 20]),
        data: Bytes::from(vec![0x01]),
        value: U256::zero(),
    };

    // RFC 6979 nonces make signatures reproducible
    let sig1 = wallet.sign_digest(&payload.digest()).unwrap();
    let sig2 = wallet.sign_digest(&payload.digest()).unwrap();
    assert_eq!(sig1, sig2);
}
