//! secp256k1 signer recovery.

use alloy_primitives::{Address, B256, Signature};
use sluice_core::error::CryptoError;
use sluice_core::traits::SignerRecovery;

/// Recovers addresses from 65-byte `r ‖ s ‖ v` signatures.
///
/// `v` may be `0/1` or `27/28`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EcdsaRecovery;

impl SignerRecovery for EcdsaRecovery {
    fn recover(&self, digest: &B256, signature: &[u8]) -> Result<Address, CryptoError> {
        let signature =
            Signature::try_from(signature).map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
        signature
            .recover_address_from_prehash(digest)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))
    }
}
