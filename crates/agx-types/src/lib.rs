//! # agx-types
//!
//! Wire-facing types for the AgeFix blockchain: transaction receipts as the
//! node reports them, and the call/deploy payloads the SDK signs and submits.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod payload;
mod receipt;

pub use payload::{CallPayload, DeployPayload};
pub use receipt::{Log, Receipt, TxLookup, TxStatus};
