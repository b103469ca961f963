//! Argument encoding and decoding for AGXCL contract calls
//!
//! AGXCL contracts expose Solidity-shaped method signatures, so call data
//! uses the familiar layout: a 4-byte selector (Keccak-256 of the canonical
//! signature) followed by arguments in 32-byte head words with dynamic
//! values in a tail. The node's JSON API additionally carries the arguments
//! as plain JSON values; [`Token::to_json`] produces that projection.
//!
//! # Example
//!
//! ```rust
//! use agx_sdk::abi::{encode, function_selector, Token};
//! use agx_primitives::{Address, U256};
//!
//! let to = Address::ZERO;
//! let amount = U256::from(1000);
//! let selector = function_selector("transfer(address,uint256)");
//! let data = encode(&[Token::Address(to), Token::Uint(amount)]);
//! assert_eq!(selector, [0xa9, 0x05, 0x9c, 0xbb]);
//! assert_eq!(data.len(), 64);
//! ```

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call, function_selector, method_signature, parse_type};
pub use types::{ParamType, Token};
