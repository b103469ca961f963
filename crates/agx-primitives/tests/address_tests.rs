//! Integration tests for the Address type

use agx_primitives::Address;

#[test]
fn test_parse_known_addresses() {
    let zero = Address::from_hex("0x0000000000000000000000000000000000000000").unwrap();
    assert!(zero.is_zero());
    assert_eq!(zero, Address::ZERO);

    let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
    assert!(!addr.is_zero());
    assert_eq!(addr.as_bytes().len(), 20);
}

#[test]
fn test_parse_rejects_malformed_input() {
    // truncated
    assert!(Address::from_hex("0x742d35").is_err());
    // non-hex characters
    assert!(Address::from_hex("0xnot-an-address-at-all-but-40-chars-long!").is_err());
    // empty
    assert!(Address::from_hex("").is_err());
}

#[test]
fn test_display_is_lowercase_hex() {
    let addr = Address::from_hex("0x742D35CC6634C0532925A3B844BC9E7595F0AB3D").unwrap();
    assert_eq!(
        addr.to_string(),
        "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d"
    );
}

#[test]
fn test_usable_as_map_key() {
    use std::collections::HashSet;

    let a = Address::from_bytes([0x11; 20]);
    let b = Address::from_bytes([0x11; 20]);
    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}
