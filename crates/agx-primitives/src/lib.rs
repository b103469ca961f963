//! # agx-primitives
//!
//! Primitive types for the AgeFix blockchain.
//!
//! This crate provides the fundamental data types shared by the SDK crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::Address;
pub use error::PrimitiveError;
pub use hash::{H256, TxHash};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Block height type
pub type BlockHeight = u64;

/// Gas type
pub type Gas = u64;
