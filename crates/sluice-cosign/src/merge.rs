//! Merging cosigner overrides into a base order.
//!
//! Present fields replace the base values; absent (or zero) fields leave
//! them alone. Amount overrides may only move in the owner's favour: an
//! input may shrink, an output may grow.

use alloy_primitives::U256;
use sluice_core::error::CosignError;
use sluice_core::order::{CurveOrder, LinearOrder, Order, PriorityOrder};
use sluice_core::types::CosignerData;

/// An order family that accepts cosigner overrides.
pub trait ApplyOverrides: Sized {
    /// A copy of `self` with `data` applied. `self` is not modified.
    fn apply_overrides(&self, data: &CosignerData) -> Result<Self, CosignError>;
}

/// Replace the input start amount, refusing increases.
pub fn merge_input(base: U256, data: &CosignerData) -> Result<U256, CosignError> {
    match data.input_override() {
        None => Ok(base),
        Some(amount) if amount > base => Err(CosignError::InvalidCosignerInput {
            override_amount: amount.to_string(),
            start: base.to_string(),
        }),
        Some(amount) => Ok(amount),
    }
}

/// Replace output start amounts, refusing decreases.
///
/// A non-empty override list must have one entry per output; a zero entry
/// keeps that output's base amount.
pub fn merge_outputs(bases: &[U256], data: &CosignerData) -> Result<Vec<U256>, CosignError> {
    let Some(overrides) = data.output_overrides() else {
        return Ok(bases.to_vec());
    };
    if overrides.len() != bases.len() {
        return Err(CosignError::OutputOverrideLength {
            got: overrides.len(),
            expected: bases.len(),
        });
    }
    bases
        .iter()
        .zip(overrides)
        .enumerate()
        .map(|(index, (&base, &amount))| {
            if amount.is_zero() {
                Ok(base)
            } else if amount < base {
                Err(CosignError::InvalidCosignerOutput { index })
            } else {
                Ok(amount)
            }
        })
        .collect()
}

impl ApplyOverrides for LinearOrder {
    fn apply_overrides(&self, data: &CosignerData) -> Result<Self, CosignError> {
        let mut order = self.clone();
        order.decay_start_time = data.decay_start().unwrap_or(order.decay_start_time);
        order.decay_end_time = data.decay_end().unwrap_or(order.decay_end_time);
        order.exclusive_filler = data.exclusive_filler().or(order.exclusive_filler);
        order.exclusivity_override_bps = data
            .exclusivity_override_bps()
            .unwrap_or(order.exclusivity_override_bps);

        order.input.start_amount = merge_input(order.input.start_amount, data)?;
        let starts: Vec<U256> = order.outputs.iter().map(|o| o.start_amount).collect();
        for (output, amount) in order.outputs.iter_mut().zip(merge_outputs(&starts, data)?) {
            output.start_amount = amount;
        }
        Ok(order)
    }
}

impl ApplyOverrides for CurveOrder {
    fn apply_overrides(&self, data: &CosignerData) -> Result<Self, CosignError> {
        let mut order = self.clone();
        order.decay_start_block = data.decay_start().unwrap_or(order.decay_start_block);
        order.exclusive_filler = data.exclusive_filler().or(order.exclusive_filler);
        order.exclusivity_override_bps = data
            .exclusivity_override_bps()
            .unwrap_or(order.exclusivity_override_bps);

        order.input.start_amount = merge_input(order.input.start_amount, data)?;
        let starts: Vec<U256> = order.outputs.iter().map(|o| o.start_amount).collect();
        for (output, amount) in order.outputs.iter_mut().zip(merge_outputs(&starts, data)?) {
            output.start_amount = amount;
        }
        Ok(order)
    }
}

impl ApplyOverrides for PriorityOrder {
    /// The decay-start override is an auction target block: it can only
    /// open the auction earlier, never delay it.
    fn apply_overrides(&self, data: &CosignerData) -> Result<Self, CosignError> {
        let mut order = self.clone();
        if let Some(target) = data.decay_start() {
            order.auction_start_block = order.auction_start_block.min(target);
        }

        order.input.amount = merge_input(order.input.amount, data)?;
        let amounts: Vec<U256> = order.outputs.iter().map(|o| o.amount).collect();
        for (output, amount) in order.outputs.iter_mut().zip(merge_outputs(&amounts, data)?) {
            output.amount = amount;
        }
        Ok(order)
    }
}

impl ApplyOverrides for Order {
    fn apply_overrides(&self, data: &CosignerData) -> Result<Self, CosignError> {
        Ok(match self {
            Self::Linear(o) => Self::Linear(o.apply_overrides(data)?),
            Self::Curve(o) => Self::Curve(o.apply_overrides(data)?),
            Self::Priority(o) => Self::Priority(o.apply_overrides(data)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use sluice_core::order::{
        CurveInput, CurveOutput, LinearInput, LinearOutput, OrderInfo, PriorityInput, PriorityOutput,
    };
    use sluice_core::types::DecayCurve;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn linear() -> LinearOrder {
        LinearOrder {
            info: OrderInfo::default(),
            cosigner: Some(Address::repeat_byte(0xcc)),
            decay_start_time: u(100),
            decay_end_time: u(200),
            exclusive_filler: None,
            exclusivity_override_bps: U256::ZERO,
            input: LinearInput {
                token: Address::repeat_byte(1),
                start_amount: u(1_000),
                end_amount: u(1_000),
            },
            outputs: vec![
                LinearOutput {
                    token: Address::repeat_byte(2),
                    start_amount: u(500),
                    end_amount: u(400),
                    recipient: Address::repeat_byte(3),
                },
                LinearOutput {
                    token: Address::repeat_byte(4),
                    start_amount: u(50),
                    end_amount: u(40),
                    recipient: Address::repeat_byte(3),
                },
            ],
        }
    }

    // --- merge_input / merge_outputs ---

    #[test]
    fn input_override_may_only_shrink() {
        let lower = CosignerData { input_override: Some(u(900)), ..Default::default() };
        let higher = CosignerData { input_override: Some(u(1_001)), ..Default::default() };
        assert_eq!(merge_input(u(1_000), &lower).unwrap(), u(900));
        assert!(matches!(
            merge_input(u(1_000), &higher),
            Err(CosignError::InvalidCosignerInput { .. })
        ));
        assert_eq!(merge_input(u(1_000), &CosignerData::default()).unwrap(), u(1_000));
    }

    #[test]
    fn zero_input_override_is_absent() {
        let zero = CosignerData { input_override: Some(U256::ZERO), ..Default::default() };
        assert_eq!(merge_input(u(1_000), &zero).unwrap(), u(1_000));
    }

    #[test]
    fn output_overrides_may_only_grow() {
        let data = CosignerData { output_overrides: Some(vec![u(600), U256::ZERO]), ..Default::default() };
        assert_eq!(merge_outputs(&[u(500), u(50)], &data).unwrap(), vec![u(600), u(50)]);

        let bad = CosignerData { output_overrides: Some(vec![u(600), u(49)]), ..Default::default() };
        assert_eq!(
            merge_outputs(&[u(500), u(50)], &bad),
            Err(CosignError::InvalidCosignerOutput { index: 1 })
        );
    }

    #[test]
    fn output_override_length_must_match() {
        let data = CosignerData { output_overrides: Some(vec![u(600)]), ..Default::default() };
        assert_eq!(
            merge_outputs(&[u(500), u(50)], &data),
            Err(CosignError::OutputOverrideLength { got: 1, expected: 2 })
        );
    }

    // --- families ---

    #[test]
    fn linear_overrides_replace_schedule_and_exclusivity() {
        let filler = Address::repeat_byte(0xee);
        let data = CosignerData {
            decay_start: Some(u(150)),
            decay_end: Some(u(250)),
            exclusive_filler: Some(filler),
            exclusivity_override_bps: Some(u(100)),
            input_override: None,
            output_overrides: Some(vec![u(550), u(55)]),
        };
        let base = linear();
        let merged = base.apply_overrides(&data).unwrap();
        assert_eq!(merged.decay_start_time, u(150));
        assert_eq!(merged.decay_end_time, u(250));
        assert_eq!(merged.exclusive_filler, Some(filler));
        assert_eq!(merged.exclusivity_override_bps, u(100));
        assert_eq!(merged.outputs[0].start_amount, u(550));
        assert_eq!(merged.outputs[1].start_amount, u(55));
        // End amounts and the base order are untouched.
        assert_eq!(merged.outputs[0].end_amount, u(400));
        assert_eq!(base, linear());
    }

    #[test]
    fn empty_overrides_are_identity() {
        let base = linear();
        assert_eq!(base.apply_overrides(&CosignerData::default()).unwrap(), base);
    }

    #[test]
    fn curve_overrides() {
        let order = CurveOrder {
            info: OrderInfo::default(),
            cosigner: Some(Address::repeat_byte(0xcc)),
            decay_start_block: u(10),
            exclusive_filler: Some(Address::repeat_byte(0xaa)),
            exclusivity_override_bps: u(5),
            input: CurveInput {
                token: Address::repeat_byte(1),
                start_amount: u(100),
                curve: DecayCurve::empty(),
                max_amount: u(100),
            },
            outputs: vec![CurveOutput {
                token: Address::repeat_byte(2),
                start_amount: u(200),
                curve: DecayCurve::empty(),
                recipient: Address::repeat_byte(3),
                min_amount: u(150),
            }],
        };
        let data = CosignerData {
            decay_start: Some(u(20)),
            decay_end: Some(u(99)),
            input_override: Some(u(90)),
            ..Default::default()
        };
        let merged = order.apply_overrides(&data).unwrap();
        assert_eq!(merged.decay_start_block, u(20));
        assert_eq!(merged.input.start_amount, u(90));
        assert_eq!(merged.exclusive_filler, Some(Address::repeat_byte(0xaa)));
        assert_eq!(merged.exclusivity_override_bps, u(5));
    }

    #[test]
    fn priority_target_block_only_moves_earlier() {
        let order = PriorityOrder {
            info: OrderInfo::default(),
            cosigner: Some(Address::repeat_byte(0xcc)),
            auction_start_block: u(100),
            baseline_priority_fee_wei: U256::ZERO,
            input: PriorityInput {
                token: Address::repeat_byte(1),
                amount: u(10),
                mps_per_priority_fee_wei: U256::ZERO,
            },
            outputs: vec![PriorityOutput {
                token: Address::repeat_byte(2),
                amount: u(20),
                mps_per_priority_fee_wei: u(1),
                recipient: Address::repeat_byte(3),
            }],
        };
        let earlier = CosignerData { decay_start: Some(u(90)), ..Default::default() };
        let later = CosignerData { decay_start: Some(u(110)), ..Default::default() };
        assert_eq!(order.apply_overrides(&earlier).unwrap().auction_start_block, u(90));
        assert_eq!(order.apply_overrides(&later).unwrap().auction_start_block, u(100));
    }

    #[test]
    fn order_enum_dispatches() {
        let data = CosignerData { input_override: Some(u(2_000)), ..Default::default() };
        assert!(matches!(
            Order::Linear(linear()).apply_overrides(&data),
            Err(CosignError::InvalidCosignerInput { .. })
        ));
    }
}
