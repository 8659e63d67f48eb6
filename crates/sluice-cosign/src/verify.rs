//! Cosignature verification.

use alloy_primitives::{Address, B256};
use sluice_core::error::CosignError;
use sluice_core::traits::SignerRecovery;
use sluice_core::types::CosignedOverrides;

use crate::digest::cosigner_digest;

/// Check that `signature` over `digest` was produced by `cosigner`.
///
/// A recovery failure, a recovered zero address, and a mismatch all map to
/// [`CosignError::InvalidCosignature`].
pub fn verify<R: SignerRecovery + ?Sized>(
    recovery: &R,
    cosigner: Address,
    digest: &B256,
    signature: &[u8],
) -> Result<(), CosignError> {
    match recovery.recover(digest, signature) {
        Ok(signer) if !signer.is_zero() && signer == cosigner => Ok(()),
        _ => Err(CosignError::InvalidCosignature),
    }
}

/// Verify `overrides` against the order's designated `cosigner`.
///
/// The signature must come from `cosigner` and cover `order_hash` on
/// `chain_id`; the `cosigner` field carried inside the overrides must agree.
pub fn verify_overrides<R: SignerRecovery + ?Sized>(
    recovery: &R,
    cosigner: Address,
    order_hash: B256,
    chain_id: u64,
    overrides: &CosignedOverrides,
) -> Result<(), CosignError> {
    if cosigner.is_zero() || overrides.cosigner != cosigner {
        return Err(CosignError::InvalidCosignature);
    }
    let digest = cosigner_digest(order_hash, chain_id, &overrides.data);
    verify(recovery, cosigner, &digest, &overrides.signature)
}
