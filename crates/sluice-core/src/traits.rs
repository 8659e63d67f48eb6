//! Trait interfaces between the pricing crates and their environment:
//! - [`ExecutionContext`]: block, time, fee and chain readings
//! - [`SignerRecovery`]: ECDSA signer recovery (sluice-cosign implements)
//! - [`FillLedger`]: which order hashes have already been filled

use std::collections::HashSet;

use alloy_primitives::{Address, B256, U256};

use crate::error::CryptoError;
use crate::types::ExecutionSnapshot;

/// Source of the current execution environment.
///
/// Pricing code never reads this directly; it captures an
/// [`ExecutionSnapshot`] once per evaluation so every step sees the same
/// block, timestamp and fee.
pub trait ExecutionContext: Send + Sync {
    /// Current block number.
    fn block_number(&self) -> U256;

    /// Current block timestamp, in seconds.
    fn timestamp(&self) -> U256;

    /// Priority fee per gas of the filling transaction, in wei.
    fn priority_fee(&self) -> U256;

    /// Chain identifier the order is being evaluated on.
    fn chain_id(&self) -> u64;
}

/// Recovers the signer of a 32-byte prehash.
pub trait SignerRecovery: Send + Sync {
    /// Address that produced `signature` over `digest`.
    ///
    /// Fails with [`CryptoError`] on a malformed or unrecoverable signature.
    /// Callers must still treat the zero address as invalid.
    fn recover(&self, digest: &B256, signature: &[u8]) -> Result<Address, CryptoError>;
}

/// Replay protection: reports order hashes that can no longer be filled.
pub trait FillLedger: Send + Sync {
    fn is_filled(&self, order_hash: &B256) -> bool;
}

impl FillLedger for HashSet<B256> {
    fn is_filled(&self, order_hash: &B256) -> bool {
        self.contains(order_hash)
    }
}

impl ExecutionContext for ExecutionSnapshot {
    fn block_number(&self) -> U256 {
        self.block_number
    }

    fn timestamp(&self) -> U256 {
        self.timestamp
    }

    fn priority_fee(&self) -> U256 {
        self.priority_fee
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl ExecutionSnapshot {
    /// Read every field of `ctx` exactly once.
    pub fn capture(ctx: &impl ExecutionContext) -> Self {
        Self {
            block_number: ctx.block_number(),
            timestamp: ctx.timestamp(),
            priority_fee: ctx.priority_fee(),
            chain_id: ctx.chain_id(),
        }
    }
}
