//! Return data decoding

use agx_primitives::{Address, U256};

use super::types::{ParamType, Token};
use crate::SdkError;

/// Decode tokens from encoded return data
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let mut offset = 0;
    let mut tokens = Vec::with_capacity(types.len());

    for param_type in types {
        let token = decode_token(param_type, data, offset)?;
        tokens.push(token);
        offset += 32;
    }

    Ok(tokens)
}

/// Decode a single token whose head word sits at `offset`
fn decode_token(param_type: &ParamType, data: &[u8], offset: usize) -> Result<Token, SdkError> {
    check_length(data, offset + 32)?;

    match param_type {
        ParamType::Address => {
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&data[offset + 12..offset + 32]);
            Ok(Token::Address(Address::from_bytes(addr_bytes)))
        }
        ParamType::Uint(_) => {
            let value = U256::from_big_endian(&data[offset..offset + 32]);
            Ok(Token::Uint(value))
        }
        ParamType::Bool => Ok(Token::Bool(data[offset + 31] != 0)),
        ParamType::Bytes => {
            let data_offset = word_as_usize(&data[offset..offset + 32])?;
            let bytes = decode_bytes(data, data_offset)?;
            Ok(Token::Bytes(bytes))
        }
        ParamType::String => {
            let data_offset = word_as_usize(&data[offset..offset + 32])?;
            let bytes = decode_bytes(data, data_offset)?;
            let s = String::from_utf8(bytes)
                .map_err(|e| SdkError::AbiDecode(format!("invalid utf-8: {}", e)))?;
            Ok(Token::String(s))
        }
        ParamType::Array(inner) => {
            let data_offset = word_as_usize(&data[offset..offset + 32])?;
            check_length(data, data_offset + 32)?;
            let len = word_as_usize(&data[data_offset..data_offset + 32])?;

            let mut tokens = Vec::with_capacity(len);
            let mut inner_offset = data_offset + 32;

            for _ in 0..len {
                tokens.push(decode_token(inner, data, inner_offset)?);
                inner_offset += 32;
            }

            Ok(Token::Array(tokens))
        }
    }
}

/// Decode dynamic bytes from data at offset
fn decode_bytes(data: &[u8], offset: usize) -> Result<Vec<u8>, SdkError> {
    check_length(data, offset + 32)?;
    let len = word_as_usize(&data[offset..offset + 32])?;
    check_length(data, offset + 32 + len)?;
    Ok(data[offset + 32..offset + 32 + len].to_vec())
}

/// Read a length/offset word, rejecting values that cannot fit a usize
fn word_as_usize(word: &[u8]) -> Result<usize, SdkError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(u32::MAX) {
        return Err(SdkError::AbiDecode(format!(
            "offset or length out of range: {}",
            value
        )));
    }
    Ok(value.as_usize())
}

/// Check that data has at least `required` bytes
fn check_length(data: &[u8], required: usize) -> Result<(), SdkError> {
    if data.len() < required {
        return Err(SdkError::AbiDecode(format!(
            "insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode;

    #[test]
    fn test_decode_address() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let encoded = encode(&[Token::Address(addr)]);

        let tokens = decode(&[ParamType::Address], &encoded).unwrap();
        assert_eq!(tokens, vec![Token::Address(addr)]);
    }

    #[test]
    fn test_decode_uint() {
        let mut encoded = [0u8; 32];
        encoded[31] = 100;

        let tokens = decode(&[ParamType::Uint(256)], &encoded).unwrap();
        assert_eq!(tokens, vec![Token::Uint(U256::from(100))]);
    }

    #[test]
    fn test_decode_bool() {
        let mut encoded_true = [0u8; 32];
        encoded_true[31] = 1;
        let encoded_false = [0u8; 32];

        assert_eq!(
            decode(&[ParamType::Bool], &encoded_true).unwrap(),
            vec![Token::Bool(true)]
        );
        assert_eq!(
            decode(&[ParamType::Bool], &encoded_false).unwrap(),
            vec![Token::Bool(false)]
        );
    }

    #[test]
    fn test_decode_roundtrips_encode() {
        let original = vec![
            Token::Address(Address::from_bytes([0x11; 20])),
            Token::Uint(U256::from(123456789u64)),
            Token::string("agefix"),
            Token::Bytes(vec![0x01, 0x02, 0x03]),
        ];
        let encoded = encode(&original);

        let decoded = decode(
            &[
                ParamType::Address,
                ParamType::Uint(256),
                ParamType::String,
                ParamType::Bytes,
            ],
            &encoded,
        )
        .unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_array() {
        let original = vec![Token::Array(vec![Token::uint(7), Token::uint(8)])];
        let encoded = encode(&original);

        let decoded = decode(
            &[ParamType::Array(Box::new(ParamType::Uint(256)))],
            &encoded,
        )
        .unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_insufficient_data() {
        let data = [0u8; 16];
        assert!(decode(&[ParamType::Uint(256)], &data).is_err());
    }

    #[test]
    fn test_decode_rejects_huge_offset() {
        // offset word of all 0xff must not panic
        let data = [0xffu8; 32];
        assert!(decode(&[ParamType::String], &data).is_err());
    }
}
