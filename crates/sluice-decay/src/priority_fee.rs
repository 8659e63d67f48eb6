//! Priority-fee scaling.
//!
//! A filler bidding a higher priority fee gets a better price for the
//! owner: inputs shrink and outputs grow by `fee * rate` milli-basis-points.

use alloy_primitives::U256;
use sluice_core::constants::MPS;
use sluice_core::error::{MathError, PriorityFeeError};
use sluice_core::math::{mul_div_down, mul_div_up};
use sluice_core::types::{PriorityFeeSpec, Role};

/// `amount * (MPS - fee * rate) / MPS`, rounded down.
///
/// Reaches zero once `fee * rate >= MPS`, including when the product
/// overflows.
pub fn scale_input(amount: U256, priority_fee: U256, rate_per_wei: U256) -> Result<U256, PriorityFeeError> {
    let mps = U256::from(MPS);
    let discount = match priority_fee.checked_mul(rate_per_wei) {
        Some(d) if d < mps => d,
        _ => return Ok(U256::ZERO),
    };
    Ok(mul_div_down(amount, mps - discount, mps)?)
}

/// `amount * (MPS + fee * rate) / MPS`, rounded up.
///
/// Fails with [`MathError::Overflow`] if any step overflows, including the
/// 256-bit product `amount * factor` even when the quotient would fit.
pub fn scale_output(amount: U256, priority_fee: U256, rate_per_wei: U256) -> Result<U256, PriorityFeeError> {
    let mps = U256::from(MPS);
    let premium = priority_fee
        .checked_mul(rate_per_wei)
        .ok_or(MathError::Overflow)?;
    let factor = mps.checked_add(premium).ok_or(MathError::Overflow)?;
    amount.checked_mul(factor).ok_or(MathError::Overflow)?;
    Ok(mul_div_up(amount, factor, mps)?)
}

/// Scale `amount` in the direction `spec` names.
pub fn scale(spec: &PriorityFeeSpec, amount: U256, priority_fee: U256) -> Result<U256, PriorityFeeError> {
    match spec.direction {
        Role::Input => scale_input(amount, priority_fee, spec.rate_per_wei),
        Role::Output => scale_output(amount, priority_fee, spec.rate_per_wei),
    }
}

/// Priority fee above `baseline`, floored at zero.
pub fn effective_priority_fee(priority_fee: U256, baseline: U256) -> U256 {
    priority_fee.saturating_sub(baseline)
}

/// Fail with [`PriorityFeeError::AuctionNotStarted`] before `start_block`.
pub fn check_auction_started(start_block: U256, current_block: U256) -> Result<(), PriorityFeeError> {
    if current_block < start_block {
        return Err(PriorityFeeError::AuctionNotStarted {
            start: start_block.to_string(),
            current: current_block.to_string(),
        });
    }
    Ok(())
}
