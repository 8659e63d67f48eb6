//! Piecewise-linear decay along a [`DecayCurve`].
//!
//! The curve stores cumulative deltas from the start amount; the decayed
//! amount is `start_amount - delta(position)`, clamped into `[min, max]`.
//! Clamping saturates, so evaluating a well-formed curve never fails.

use alloy_primitives::{I256, U256};
use sluice_core::error::DecayError;
use sluice_core::math::{bound, bounded_sub};
use sluice_core::types::{DecayCurve, Role};

use crate::linear::decay_signed;

/// The two curve points surrounding a relative position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveSegment {
    pub start_point: u16,
    pub end_point: u16,
    pub start_delta: I256,
    pub end_delta: I256,
}

/// Find the segment containing `delta`.
///
/// - At or before the first point: from the implicit origin `(0, 0)`.
/// - At or after the last point: a flat segment on the last point.
/// - Exactly on an interior point: a flat segment on that point.
/// - Otherwise the adjacent pair with `prev < delta < next`.
///
/// An empty curve yields the flat zero segment.
pub fn locate_curve_position(curve: &DecayCurve, delta: u16) -> CurveSegment {
    let len = curve.len();
    if len == 0 {
        return CurveSegment {
            start_point: 0,
            end_point: 0,
            start_delta: I256::ZERO,
            end_delta: I256::ZERO,
        };
    }

    let positions = &curve.relative_positions;
    let amounts = &curve.relative_amounts;

    let first = positions.get(0);
    if first >= delta {
        return CurveSegment {
            start_point: 0,
            end_point: first,
            start_delta: I256::ZERO,
            end_delta: amounts[0],
        };
    }

    let last = positions.get(len - 1);
    if last <= delta {
        return CurveSegment {
            start_point: last,
            end_point: last,
            start_delta: amounts[len - 1],
            end_delta: amounts[len - 1],
        };
    }

    // first < delta < last, so some later point reaches delta.
    let i = (1..len)
        .find(|&i| positions.get(i) >= delta)
        .unwrap_or(len - 1);
    if positions.get(i) == delta {
        return CurveSegment {
            start_point: delta,
            end_point: delta,
            start_delta: amounts[i],
            end_delta: amounts[i],
        };
    }
    CurveSegment {
        start_point: positions.get(i - 1),
        end_point: positions.get(i),
        start_delta: amounts[i - 1],
        end_delta: amounts[i],
    }
}

/// Curve delta at `delta` blocks past the decay start.
///
/// Rounds so that the amount derived from it favours the owner: an input
/// delta rounds up (smaller input), an output delta down (larger output).
pub fn curve_delta(role: Role, curve: &DecayCurve, delta: u16) -> Result<I256, DecayError> {
    let segment = locate_curve_position(curve, delta);
    if segment.start_point == segment.end_point {
        return Ok(segment.end_delta);
    }
    decay_signed(
        segment.start_delta,
        segment.end_delta,
        U256::from(segment.start_point),
        U256::from(segment.end_point),
        U256::from(delta),
        role.amount_rounding().flip(),
    )
}

/// Evaluate `start_amount` along `curve` at `current`, bounded to `[min, max]`.
///
/// Fails only with [`DecayError::InvalidDecayCurve`] for a curve longer than
/// sixteen points.
pub fn decay(
    role: Role,
    curve: &DecayCurve,
    start_amount: U256,
    decay_start: U256,
    current: U256,
    min: U256,
    max: U256,
) -> Result<U256, DecayError> {
    curve.check_len()?;
    if curve.is_empty() || decay_start >= current {
        return Ok(bound(start_amount, min, max));
    }

    let delta = (current - decay_start).saturating_to::<u16>();
    let offset = curve_delta(role, curve, delta)?;
    Ok(bounded_sub(start_amount, offset, min, max))
}
