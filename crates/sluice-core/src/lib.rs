//! # sluice-core
//! Foundation types, arithmetic and traits for Sluice Dutch-auction pricing.
//!
//! Nothing in this crate performs I/O or reads the environment; callers pass
//! an [`types::ExecutionSnapshot`] captured from an [`traits::ExecutionContext`].

pub mod constants;
pub mod eip712;
pub mod error;
pub mod math;
pub mod order;
pub mod traits;
pub mod types;

pub use error::SluiceError;
pub use math::Rounding;
pub use order::{Order, ResolvedOrder};
pub use types::{CosignedOverrides, CosignerData, DecayCurve, ExecutionSnapshot, Role};
