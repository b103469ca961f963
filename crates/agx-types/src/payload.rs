//! Signable call and deploy payloads
//!
//! The AgeFix node authenticates write requests by the sender's signature
//! over a canonical payload encoding: a domain tag, then every field with
//! variable-length fields length-prefixed. The private key itself never
//! appears in a request.

use agx_crypto::keccak256;
use agx_primitives::{Address, H256, U256};
use bytes::Bytes;

const CALL_DOMAIN_TAG: &[u8] = b"AGX/CALL";
const DEPLOY_DOMAIN_TAG: &[u8] = b"AGX/DEPLOY";

/// Payload for a state-changing contract method call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallPayload {
    /// Chain identifier, e.g. `agefix-mainnet-1`
    pub chain_id: String,
    /// Target contract address
    pub contract: Address,
    /// Method selector followed by the encoded arguments
    pub data: Bytes,
    /// AGX value transferred with the call
    pub value: U256,
}

impl CallPayload {
    /// Canonical byte encoding used for signing
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            CALL_DOMAIN_TAG.len() + 4 + self.chain_id.len() + Address::LEN + 4 + self.data.len() + 32,
        );
        out.extend_from_slice(CALL_DOMAIN_TAG);
        append_prefixed(&mut out, self.chain_id.as_bytes());
        out.extend_from_slice(self.contract.as_bytes());
        append_prefixed(&mut out, &self.data);
        out.extend_from_slice(&u256_bytes(&self.value));
        out
    }

    /// Keccak-256 digest of the signing bytes
    pub fn digest(&self) -> H256 {
        keccak256(&self.signing_bytes())
    }
}

/// Payload for deploying a new AGXCL contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployPayload {
    /// Chain identifier
    pub chain_id: String,
    /// AGXCL contract source
    pub code: String,
    /// Encoded constructor arguments
    pub ctor_data: Bytes,
}

impl DeployPayload {
    /// Canonical byte encoding used for signing
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            DEPLOY_DOMAIN_TAG.len() + 4 + self.chain_id.len() + 4 + self.code.len() + 4 + self.ctor_data.len(),
        );
        out.extend_from_slice(DEPLOY_DOMAIN_TAG);
        append_prefixed(&mut out, self.chain_id.as_bytes());
        append_prefixed(&mut out, self.code.as_bytes());
        append_prefixed(&mut out, &self.ctor_data);
        out
    }

    /// Keccak-256 digest of the signing bytes
    pub fn digest(&self) -> H256 {
        keccak256(&self.signing_bytes())
    }
}

/// Append a big-endian u32 length prefix followed by the bytes
fn append_prefixed(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
}

fn u256_bytes(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}
