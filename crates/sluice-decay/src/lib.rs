//! # sluice-decay: pricing engines for Dutch-auction orders.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! - **Linear**: two-point interpolation over time or block distance.
//! - **Curve**: piecewise-linear interpolation over up to sixteen packed points,
//!   bounded so evaluation never fails on extreme inputs.
//! - **Exclusivity**: price premium for fillers without exclusive rights.
//! - **Priority fee**: linear price improvement per wei of priority fee.
//!
//! Every entry point is a pure function of its arguments.

pub mod curve;
pub mod exclusivity;
pub mod linear;
pub mod priority_fee;

pub use curve::{CurveSegment, locate_curve_position};
pub use exclusivity::{apply_override, has_filling_rights};
pub use linear::{decay_input, decay_output, decay_signed};
pub use priority_fee::{scale_input, scale_output};
