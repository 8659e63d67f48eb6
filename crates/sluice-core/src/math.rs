//! Bounded and strict fixed-width arithmetic.
//!
//! Two families of helpers live here:
//! - **Strict**: [`sub_signed`], [`diff_signed`] and [`mul_div`] fail with a
//!   [`MathError`] when the exact result is not representable.
//! - **Saturating**: [`bounded_sub`] and [`bound`] never fail; out-of-range
//!   results clamp to the caller's `[min, max]`.
//!
//! Amounts are `U256`, curve deltas are `I256`, and every multiplication that
//! precedes a division goes through a 512-bit intermediate.

use alloy_primitives::{I256, Sign, U256, U512};
use serde::{Deserialize, Serialize};

use crate::error::MathError;

/// Rounding direction for a division that does not divide evenly.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Toward negative infinity.
    Down,
    /// Toward positive infinity.
    Up,
}

impl Rounding {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

/// Compute `a - b`, treating a negative `b` as an addition.
///
/// Fails with [`MathError::NegativeUint`] if the result would be negative and
/// [`MathError::Overflow`] if it would exceed `U256::MAX`.
pub fn sub_signed(a: U256, b: I256) -> Result<U256, MathError> {
    let magnitude = b.unsigned_abs();
    if b.is_negative() {
        a.checked_add(magnitude).ok_or(MathError::Overflow)
    } else {
        a.checked_sub(magnitude).ok_or(MathError::NegativeUint)
    }
}

/// Compute `a - b` and clamp the result into `[min, max]`.
///
/// Never fails: an unsigned underflow saturates to `min` and an overflow
/// saturates to `max`. If `min > max` the result is `max`.
pub fn bounded_sub(a: U256, b: I256, min: U256, max: U256) -> U256 {
    let magnitude = b.unsigned_abs();
    let raw = if b.is_negative() {
        a.saturating_add(magnitude)
    } else {
        a.saturating_sub(magnitude)
    };
    bound(raw, min, max)
}

/// Clamp `value` into `[min, max]`. If `min > max` the result is `max`.
pub fn bound(value: U256, min: U256, max: U256) -> U256 {
    value.max(min).min(max)
}

/// Signed difference `a - b`.
///
/// Fails with [`MathError::SignedOverflow`] only when the exact difference
/// lies outside `[I256::MIN, I256::MAX]`.
pub fn diff_signed(a: U256, b: U256) -> Result<I256, MathError> {
    if a >= b {
        I256::checked_from_sign_and_abs(Sign::Positive, a - b).ok_or(MathError::SignedOverflow)
    } else {
        I256::checked_from_sign_and_abs(Sign::Negative, b - a).ok_or(MathError::SignedOverflow)
    }
}

/// Full-precision `a * b / denominator` with explicit rounding.
///
/// The product is formed in 512 bits so it cannot overflow; only a quotient
/// above `U256::MAX` fails.
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let product: U512 = a.widening_mul(b);
    let (mut quotient, remainder) = product.div_rem(U512::from(denominator));
    if rounding == Rounding::Up && !remainder.is_zero() {
        quotient += U512::ONE;
    }

    U256::checked_from_limbs_slice(quotient.as_limbs()).ok_or(MathError::Overflow)
}

/// `a * b / denominator`, rounded down.
pub fn mul_div_down(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    mul_div(a, b, denominator, Rounding::Down)
}

/// `a * b / denominator`, rounded up.
pub fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    mul_div(a, b, denominator, Rounding::Up)
}
