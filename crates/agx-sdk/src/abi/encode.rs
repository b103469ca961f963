//! Argument encoding

use agx_primitives::U256;

use super::types::{ParamType, Token};
use crate::SdkError;

/// Encode tokens into the 32-byte word layout
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let types: Vec<ParamType> = tokens.iter().map(|t| t.type_of()).collect();
    encode_params(&types, tokens)
}

/// Encode a full call (selector + arguments)
pub fn encode_function_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut result = selector.to_vec();
    result.extend(encode(tokens));
    result
}

/// Encode parameters into head words plus a tail for dynamic values
fn encode_params(types: &[ParamType], tokens: &[Token]) -> Vec<u8> {
    // Every head slot is one 32-byte word for the supported types
    let head_size = types.len() * 32;

    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (param_type, token) in types.iter().zip(tokens.iter()) {
        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(encode_u256(&U256::from(offset)));
            tail.extend(encode_token(param_type, token));
        } else {
            head.extend(encode_token(param_type, token));
        }
    }

    head.extend(tail);
    head
}

/// Encode a single token
fn encode_token(param_type: &ParamType, token: &Token) -> Vec<u8> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.as_bytes());
            buf.to_vec()
        }
        (ParamType::Uint(_), Token::Uint(value)) => encode_u256(value),
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; 32];
            buf[31] = if *b { 1 } else { 0 };
            buf.to_vec()
        }
        (ParamType::Bytes, Token::Bytes(data)) => encode_bytes(data),
        (ParamType::String, Token::String(s)) => encode_bytes(s.as_bytes()),
        (ParamType::Array(inner), Token::Array(tokens)) => {
            let mut result = encode_u256(&U256::from(tokens.len()));
            let inner_types: Vec<ParamType> = tokens.iter().map(|_| (**inner).clone()).collect();
            result.extend(encode_params(&inner_types, tokens));
            result
        }
        _ => vec![0u8; 32], // mismatched type/token pair
    }
}

/// Encode a U256 as a 32-byte big-endian word
fn encode_u256(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes.to_vec()
}

/// Encode dynamic bytes: length word plus data padded to a word boundary
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len()));

    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}

/// Derive the canonical signature for a method from its argument tokens
///
/// `transfer` with an address and a uint argument yields
/// `transfer(address,uint256)`.
pub fn method_signature(method: &str, tokens: &[Token]) -> String {
    let types: Vec<String> = tokens.iter().map(|t| t.type_of().name()).collect();
    format!("{}({})", method, types.join(","))
}

/// Compute a method selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = agx_crypto::keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Parse a type string (e.g., "uint256", "address", "uint256[]")
pub fn parse_type(s: &str) -> Result<ParamType, SdkError> {
    let s = s.trim();

    if let Some(inner) = s.strip_suffix("[]") {
        return Ok(ParamType::Array(Box::new(parse_type(inner)?)));
    }

    if s == "address" {
        return Ok(ParamType::Address);
    }
    if s == "bool" {
        return Ok(ParamType::Bool);
    }
    if s == "string" {
        return Ok(ParamType::String);
    }
    if s == "bytes" {
        return Ok(ParamType::Bytes);
    }

    if let Some(rest) = s.strip_prefix("uint") {
        let bits: usize = if rest.is_empty() {
            256
        } else {
            rest.parse()
                .map_err(|_| SdkError::AbiEncode(format!("invalid uint size: {}", rest)))?
        };
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(SdkError::AbiEncode(format!("invalid uint size: {}", bits)));
        }
        return Ok(ParamType::Uint(bits));
    }

    Err(SdkError::AbiEncode(format!("unknown type: {}", s)))
}
