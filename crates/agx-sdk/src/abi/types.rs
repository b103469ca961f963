//! Argument type definitions

use agx_primitives::{Address, U256};
use serde_json::Value;

/// Argument value for an AGXCL method call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (up to 256 bits)
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array of a single element type
    Array(Vec<Token>),
}

/// AGXCL parameter types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            ParamType::Bytes | ParamType::String | ParamType::Array(_)
        )
    }

    /// Canonical name as it appears in method signatures
    pub fn name(&self) -> String {
        match self {
            ParamType::Address => "address".to_string(),
            ParamType::Uint(bits) => format!("uint{}", bits),
            ParamType::Bool => "bool".to_string(),
            ParamType::Bytes => "bytes".to_string(),
            ParamType::String => "string".to_string(),
            ParamType::Array(inner) => format!("{}[]", inner.name()),
        }
    }
}

impl Token {
    /// Create a uint256 token from a u128
    pub fn uint(value: u128) -> Self {
        Token::Uint(U256::from(value))
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Get the type of this token
    pub fn type_of(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint(256),
            Token::Bool(_) => ParamType::Bool,
            Token::Bytes(_) => ParamType::Bytes,
            Token::String(_) => ParamType::String,
            Token::Array(tokens) => {
                let inner = tokens
                    .first()
                    .map(|t| t.type_of())
                    .unwrap_or(ParamType::Uint(256));
                ParamType::Array(Box::new(inner))
            }
        }
    }

    /// Project the token into the JSON value the node's API expects
    ///
    /// Addresses and bytes become 0x-hex strings; integers become decimal
    /// strings (they can exceed JSON number precision).
    pub fn to_json(&self) -> Value {
        match self {
            Token::Address(addr) => Value::String(addr.to_hex()),
            Token::Uint(value) => Value::String(value.to_string()),
            Token::Bool(b) => Value::Bool(*b),
            Token::Bytes(data) => Value::String(format!("0x{}", hex::encode(data))),
            Token::String(s) => Value::String(s.clone()),
            Token::Array(tokens) => Value::Array(tokens.iter().map(Token::to_json).collect()),
        }
    }
}

impl From<Address> for Token {
    fn from(addr: Address) -> Self {
        Token::Address(addr)
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::Uint(value)
    }
}

impl From<bool> for Token {
    fn from(b: bool) -> Self {
        Token::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::Array(Box::new(ParamType::Uint(256))).is_dynamic());
    }

    #[test]
    fn test_token_type_of() {
        assert_eq!(Token::Address(Address::ZERO).type_of(), ParamType::Address);
        assert_eq!(Token::Uint(U256::zero()).type_of(), ParamType::Uint(256));
        assert_eq!(Token::Bool(true).type_of(), ParamType::Bool);
        assert_eq!(
            Token::Array(vec![Token::Bool(true)]).type_of(),
            ParamType::Array(Box::new(ParamType::Bool))
        );
    }

    #[test]
    fn test_token_to_json() {
        assert_eq!(
            Token::Address(Address::ZERO).to_json(),
            Value::String("0x0000000000000000000000000000000000000000".to_string())
        );
        assert_eq!(
            Token::uint(1_000_000_000_000_000_000_000u128).to_json(),
            Value::String("1000000000000000000000".to_string())
        );
        assert_eq!(Token::Bool(true).to_json(), Value::Bool(true));
        assert_eq!(
            Token::Bytes(vec![0xde, 0xad]).to_json(),
            Value::String("0xdead".to_string())
        );
        assert_eq!(
            Token::string("ipfs://metadata").to_json(),
            Value::String("ipfs://metadata".to_string())
        );
        assert_eq!(
            Token::Array(vec![Token::uint(1), Token::uint(2)]).to_json(),
            serde_json::json!(["1", "2"])
        );
    }
}
