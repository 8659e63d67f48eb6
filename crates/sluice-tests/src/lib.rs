//! Cross-crate test suite for Sluice.
//!
//! Integration tests under `tests/` drive the public API of every crate
//! together: concrete pricing scenarios, property checks on the engines, and
//! adversarial inputs aimed at the cosigner and arithmetic layers.

pub mod helpers;
