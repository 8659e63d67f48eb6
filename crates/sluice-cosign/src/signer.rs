//! Producing cosignatures with a local secp256k1 key.

use std::str::FromStr;

use alloy_primitives::{Address, B256, Bytes};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use sluice_core::error::CryptoError;
use sluice_core::types::{CosignedOverrides, CosignerData};

use crate::digest::cosigner_digest;

/// A cosigning key.
#[derive(Clone, Debug)]
pub struct Cosigner {
    signer: PrivateKeySigner,
}

impl Cosigner {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Parse a hex-encoded private key, with or without `0x`.
    pub fn from_hex(key: &str) -> Result<Self, CryptoError> {
        let signer = PrivateKeySigner::from_str(key.trim()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::new(signer))
    }

    pub fn from_bytes(key: &B256) -> Result<Self, CryptoError> {
        let signer = PrivateKeySigner::from_bytes(key).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::new(signer))
    }

    pub fn random() -> Self {
        Self::new(PrivateKeySigner::random())
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// 65-byte `r ‖ s ‖ v` signature over `digest`, with `v` in `27/28`.
    pub fn sign_digest(&self, digest: &B256) -> Result<Bytes, CryptoError> {
        let signature = self
            .signer
            .sign_hash_sync(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    /// Sign `data` for `order_hash` on `chain_id`.
    pub fn cosign(&self, order_hash: B256, chain_id: u64, data: CosignerData) -> Result<CosignedOverrides, CryptoError> {
        let digest = cosigner_digest(order_hash, chain_id, &data);
        Ok(CosignedOverrides {
            cosigner: self.address(),
            signature: self.sign_digest(&digest)?,
            data,
        })
    }
}
