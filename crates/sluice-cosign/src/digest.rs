//! The digest a cosigner signs.

use alloy_primitives::{B256, U256, keccak256};
use sluice_core::eip712::encode_cosigner_data;
use sluice_core::types::CosignerData;

/// `keccak256(order_hash ‖ uint256(chain_id) ‖ abi.encode(data))`.
///
/// Binds a payload to exactly one base order on exactly one chain.
pub fn cosigner_digest(order_hash: B256, chain_id: u64, data: &CosignerData) -> B256 {
    let encoded = encode_cosigner_data(data);
    let mut buf = Vec::with_capacity(64 + encoded.len());
    buf.extend_from_slice(order_hash.as_slice());
    buf.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    buf.extend_from_slice(&encoded);
    keccak256(buf)
}
