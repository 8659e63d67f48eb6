//! Exclusivity windows: who may fill at the quoted price, and what everyone
//! else pays during the window.

use alloy_primitives::{Address, U256};
use sluice_core::constants::BPS;
use sluice_core::error::{ExclusivityError, MathError};
use sluice_core::math::mul_div_up;
use sluice_core::types::ExclusivityWindow;

/// Whether `caller` may fill at the unscaled price at `current`.
///
/// True when no party is set (or the party is the zero address), once
/// `current` is past `end_position`, or when the caller is the party.
pub fn has_filling_rights(caller: Address, party: Option<Address>, end_position: U256, current: U256) -> bool {
    match party.filter(|p| !p.is_zero()) {
        None => true,
        Some(party) => current > end_position || caller == party,
    }
}

/// Amounts `caller` owes under `window` at `current`.
///
/// With filling rights the amounts come back unchanged. Otherwise every
/// amount is scaled by `(BPS + override_bps) / BPS`, rounding up, or the fill
/// is refused when the window is strict (`override_bps == 0`).
pub fn apply_override(
    amounts: &[U256],
    caller: Address,
    window: &ExclusivityWindow,
    current: U256,
) -> Result<Vec<U256>, ExclusivityError> {
    if has_filling_rights(caller, window.exclusive_party, window.end_position, current) {
        return Ok(amounts.to_vec());
    }
    if window.override_bps.is_zero() {
        return Err(ExclusivityError::NoExclusiveOverride {
            end: window.end_position.to_string(),
        });
    }

    let bps = U256::from(BPS);
    let factor = bps.checked_add(window.override_bps).ok_or(MathError::Overflow)?;
    amounts
        .iter()
        .map(|&amount| Ok(mul_div_up(amount, factor, bps)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const E18: u64 = 1_000_000_000_000_000_000;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn party() -> Address {
        Address::repeat_byte(0xEE)
    }

    fn other() -> Address {
        Address::repeat_byte(0x11)
    }

    fn window(bps: u64) -> ExclusivityWindow {
        ExclusivityWindow {
            exclusive_party: Some(party()),
            end_position: u(100),
            override_bps: u(bps),
        }
    }

    // --- has_filling_rights ---

    #[test]
    fn rights_without_party() {
        assert!(has_filling_rights(other(), None, u(100), u(0)));
        assert!(has_filling_rights(other(), Some(Address::ZERO), u(100), u(0)));
    }

    #[test]
    fn rights_for_party_inside_window() {
        assert!(has_filling_rights(party(), Some(party()), u(100), u(50)));
        assert!(!has_filling_rights(other(), Some(party()), u(100), u(50)));
    }

    #[test]
    fn window_end_is_inclusive() {
        assert!(!has_filling_rights(other(), Some(party()), u(100), u(100)));
        assert!(has_filling_rights(other(), Some(party()), u(100), u(101)));
    }

    // --- apply_override ---

    #[test]
    fn override_scales_outputs() {
        let out = apply_override(&[u(E18)], other(), &window(3_000), u(50)).unwrap();
        assert_eq!(out, vec![u(1_300_000_000_000_000_000)]);
    }

    #[test]
    fn override_rounds_up() {
        let out = apply_override(&[u(1), u(10_001)], other(), &window(1), u(50)).unwrap();
        assert_eq!(out, vec![u(2), u(10_003)]);
    }

    #[test]
    fn strict_window_refuses() {
        assert!(matches!(
            apply_override(&[u(1)], other(), &window(0), u(50)),
            Err(ExclusivityError::NoExclusiveOverride { .. })
        ));
    }

    #[test]
    fn rights_leave_amounts_unchanged() {
        let amounts = [u(7), u(9)];
        assert_eq!(apply_override(&amounts, party(), &window(0), u(50)).unwrap(), amounts.to_vec());
        assert_eq!(apply_override(&amounts, other(), &window(0), u(101)).unwrap(), amounts.to_vec());
    }

    #[test]
    fn override_overflow_is_reported() {
        assert!(matches!(
            apply_override(&[U256::MAX], other(), &window(1), u(50)),
            Err(ExclusivityError::Math(_))
        ));
        let huge = ExclusivityWindow { override_bps: U256::MAX, ..window(0) };
        assert!(apply_override(&[u(1)], other(), &huge, u(50)).is_err());
    }

    proptest! {
        #[test]
        fn override_never_lowers_amounts(amount in any::<u128>(), bps in 1u64..100_000) {
            let out = apply_override(&[U256::from(amount)], other(), &window(bps), u(0)).unwrap();
            prop_assert!(out[0] >= U256::from(amount));
        }
    }
}
