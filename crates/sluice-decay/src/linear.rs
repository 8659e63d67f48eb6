//! Two-point linear interpolation over time or block distance.
//!
//! All amounts round in the order owner's favour: an input amount rounds
//! toward the smaller value, an output amount toward the larger one.

use alloy_primitives::{I256, U256};
use sluice_core::error::DecayError;
use sluice_core::math::{Rounding, mul_div};
use sluice_core::types::{LinearRange, Role};

/// Interpolate between `start_amount` at `start_position` and `end_amount`
/// at `end_position`, evaluated at `current`.
///
/// Either direction of amount movement is accepted; use [`decay_input`] or
/// [`decay_output`] to also enforce the direction for a role.
pub fn decay(
    role: Role,
    start_amount: U256,
    end_amount: U256,
    start_position: U256,
    end_position: U256,
    current: U256,
) -> Result<U256, DecayError> {
    if end_position < start_position {
        return Err(DecayError::EndTimeBeforeStartTime {
            start: start_position.to_string(),
            end: end_position.to_string(),
        });
    }
    if current <= start_position {
        return Ok(start_amount);
    }
    if current >= end_position {
        return Ok(end_amount);
    }
    if start_amount == end_amount {
        return Ok(start_amount);
    }

    let elapsed = current - start_position;
    let duration = end_position - start_position;
    let rounding = role.amount_rounding();

    if end_amount > start_amount {
        let step = mul_div(end_amount - start_amount, elapsed, duration, rounding)?;
        Ok(start_amount + step)
    } else {
        // Moving down: a larger step means a smaller amount.
        let step = mul_div(start_amount - end_amount, elapsed, duration, rounding.flip())?;
        Ok(start_amount - step)
    }
}

/// Decay an input amount. Inputs may only grow: `start_amount <= end_amount`.
pub fn decay_input(
    start_amount: U256,
    end_amount: U256,
    start_position: U256,
    end_position: U256,
    current: U256,
) -> Result<U256, DecayError> {
    if start_amount > end_amount {
        return Err(incorrect_amounts(start_amount, end_amount));
    }
    decay(Role::Input, start_amount, end_amount, start_position, end_position, current)
}

/// Decay an output amount. Outputs may only shrink: `start_amount >= end_amount`.
pub fn decay_output(
    start_amount: U256,
    end_amount: U256,
    start_position: U256,
    end_position: U256,
    current: U256,
) -> Result<U256, DecayError> {
    if start_amount < end_amount {
        return Err(incorrect_amounts(start_amount, end_amount));
    }
    decay(Role::Output, start_amount, end_amount, start_position, end_position, current)
}

/// Decay a [`LinearRange`] for `role`, enforcing the role's direction.
pub fn decay_range(role: Role, range: &LinearRange, current: U256) -> Result<U256, DecayError> {
    let LinearRange {
        start_amount,
        end_amount,
        start_position,
        end_position,
    } = *range;
    match role {
        Role::Input => decay_input(start_amount, end_amount, start_position, end_position, current),
        Role::Output => decay_output(start_amount, end_amount, start_position, end_position, current),
    }
}

/// Interpolate between two signed values.
///
/// `rounding` is applied to the result itself (`Down` toward negative
/// infinity). Works for any pair of `I256` endpoints: the raw two's-complement
/// distance always fits in `U256`, and the interpolated point lies between
/// the endpoints, so the wrapping add/sub below is exact.
pub fn decay_signed(
    start: I256,
    end: I256,
    start_position: U256,
    end_position: U256,
    current: U256,
    rounding: Rounding,
) -> Result<I256, DecayError> {
    if end_position < start_position {
        return Err(DecayError::EndTimeBeforeStartTime {
            start: start_position.to_string(),
            end: end_position.to_string(),
        });
    }
    if current <= start_position {
        return Ok(start);
    }
    if current >= end_position {
        return Ok(end);
    }
    if start == end {
        return Ok(start);
    }

    let elapsed = current - start_position;
    let duration = end_position - start_position;
    let (start_raw, end_raw) = (start.into_raw(), end.into_raw());

    let raw = if end > start {
        let distance = end_raw.wrapping_sub(start_raw);
        start_raw.wrapping_add(mul_div(distance, elapsed, duration, rounding)?)
    } else {
        let distance = start_raw.wrapping_sub(end_raw);
        start_raw.wrapping_sub(mul_div(distance, elapsed, duration, rounding.flip())?)
    };
    Ok(I256::from_raw(raw))
}

fn incorrect_amounts(start: U256, end: U256) -> DecayError {
    DecayError::IncorrectAmounts {
        start: start.to_string(),
        end: end.to_string(),
    }
}
