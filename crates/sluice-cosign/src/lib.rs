//! # sluice-cosign
//! Cosigner authentication for Sluice orders.
//!
//! A cosigner is a trusted off-chain party named in the order. Close to
//! execution it signs a [`CosignerData`](sluice_core::types::CosignerData)
//! payload that narrows or replaces the order's auction parameters. This
//! crate builds the signed digest, verifies signatures, merges the payload
//! into the base order, and reads the legacy compact extra-data encoding.

pub mod digest;
pub mod extra_data;
pub mod merge;
pub mod recovery;
pub mod signer;
pub mod verify;

pub use digest::cosigner_digest;
pub use merge::ApplyOverrides;
pub use recovery::EcdsaRecovery;
pub use signer::Cosigner;
pub use verify::{verify, verify_overrides};
