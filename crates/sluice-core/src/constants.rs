//! Protocol constants. Amounts are raw token units; rates are fixed-point integers.

/// Denominator for basis-point rates (1 bps = 0.01%).
///
/// # Examples
///
/// ```
/// use sluice_core::constants::BPS;
/// assert_eq!(BPS, 10_000);
/// ```
pub const BPS: u64 = 10_000;

/// Denominator for milli-basis-point rates used by priority-fee scaling.
///
/// 1 MPS = 0.001 bps, so `MPS` itself is 100%.
///
/// # Examples
///
/// ```
/// use sluice_core::constants::{BPS, MPS};
/// assert_eq!(MPS, BPS * 1_000);
/// ```
pub const MPS: u64 = 10_000_000;

/// Maximum number of points a decay curve may carry.
///
/// Sixteen 16-bit relative positions fill exactly one 256-bit word.
pub const MAX_CURVE_POINTS: usize = 16;

/// Width in bits of one packed relative curve position.
pub const CURVE_POSITION_BITS: usize = 16;

/// Largest relative position a curve can express. Elapsed distances beyond
/// this saturate here, which always resolves to the fully decayed amount.
pub const MAX_CURVE_POSITION: u16 = u16::MAX;

/// Legacy cosigner extra-data: exclusive filler address present.
pub const EXTRA_DATA_FILLER_FLAG: u8 = 0x80;
/// Legacy cosigner extra-data: input override present.
pub const EXTRA_DATA_INPUT_FLAG: u8 = 0x40;
/// Legacy cosigner extra-data: output overrides present.
pub const EXTRA_DATA_OUTPUTS_FLAG: u8 = 0x20;
/// Legacy cosigner extra-data: mask for the output override count.
pub const EXTRA_DATA_LENGTH_MASK: u8 = 0x1f;
/// Largest output override count the 5-bit length field can carry.
pub const MAX_EXTRA_DATA_OUTPUTS: usize = EXTRA_DATA_LENGTH_MASK as usize;

pub const ADDRESS_LEN: usize = 20;
pub const WORD_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 65;
pub const DEFAULT_CHAIN_ID: u64 = 1;
