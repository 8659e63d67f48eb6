//! # sluice-resolver: evaluates orders against an execution snapshot.
//!
//! Composes the Sluice subsystems into one pricing pipeline:
//! - [`resolver::Resolver`] verifies cosignatures, merges overrides, runs the
//!   decay or fee engines and applies exclusivity
//! - [`quoter::Quoter`] adds replay protection and snapshot capture
//! - [`config::ResolverConfig`] resolver configuration

pub mod config;
pub mod quoter;
pub mod resolver;

pub use config::{LogFormat, ResolverConfig};
pub use quoter::Quoter;
pub use resolver::Resolver;
