//! Shared builders for scenario and adversarial tests.

use alloy_primitives::{Address, I256, U256};
use sluice_core::order::{
    CurveInput, CurveOrder, CurveOutput, LinearInput, LinearOrder, LinearOutput, OrderInfo, PriorityInput,
    PriorityOrder, PriorityOutput,
};
use sluice_core::types::{DecayCurve, ExecutionSnapshot};
use sluice_cosign::EcdsaRecovery;
use sluice_resolver::{Resolver, ResolverConfig};

/// One whole token with 18 decimals.
pub const E18: u64 = 1_000_000_000_000_000_000;

pub const INPUT_TOKEN: Address = Address::repeat_byte(0x01);
pub const OUTPUT_TOKEN: Address = Address::repeat_byte(0x02);
pub const SWAPPER: Address = Address::repeat_byte(0xBB);
pub const EXCLUSIVE_FILLER: Address = Address::repeat_byte(0xEE);
pub const OTHER_FILLER: Address = Address::repeat_byte(0x11);

pub fn u(v: u64) -> U256 {
    U256::from(v)
}

pub fn i(v: i64) -> I256 {
    I256::try_from(v).expect("i64 fits in I256")
}

/// Curve from `(position, delta)` pairs.
pub fn curve(points: &[(u16, i64)]) -> DecayCurve {
    let points: Vec<(u16, I256)> = points.iter().map(|&(p, d)| (p, i(d))).collect();
    DecayCurve::from_points(&points).expect("valid test curve")
}

pub fn info(nonce: u64) -> OrderInfo {
    OrderInfo {
        reactor: Address::repeat_byte(0xAA),
        swapper: SWAPPER,
        nonce: u(nonce),
        deadline: U256::from(u64::MAX),
        ..Default::default()
    }
}

/// Snapshot on mainnet with no priority fee.
pub fn snapshot(block: u64, timestamp: u64) -> ExecutionSnapshot {
    ExecutionSnapshot {
        block_number: u(block),
        timestamp: u(timestamp),
        priority_fee: U256::ZERO,
        chain_id: 1,
    }
}

pub fn resolver() -> Resolver<EcdsaRecovery> {
    Resolver::new(EcdsaRecovery, ResolverConfig::default())
}

/// Linear order with a constant input and one decaying output.
pub fn linear_order(
    cosigner: Option<Address>,
    output: (u64, u64),
    decay: (u64, u64),
) -> LinearOrder {
    LinearOrder {
        info: info(1),
        cosigner,
        decay_start_time: u(decay.0),
        decay_end_time: u(decay.1),
        exclusive_filler: None,
        exclusivity_override_bps: U256::ZERO,
        input: LinearInput {
            token: INPUT_TOKEN,
            start_amount: u(E18),
            end_amount: u(E18),
        },
        outputs: vec![LinearOutput {
            token: OUTPUT_TOKEN,
            start_amount: u(output.0),
            end_amount: u(output.1),
            recipient: SWAPPER,
        }],
    }
}

/// Curve order with a constant input and one output following `output_curve`.
pub fn curve_order(cosigner: Option<Address>, output_start: u64, output_curve: DecayCurve) -> CurveOrder {
    CurveOrder {
        info: info(2),
        cosigner,
        decay_start_block: u(100),
        exclusive_filler: None,
        exclusivity_override_bps: U256::ZERO,
        input: CurveInput {
            token: INPUT_TOKEN,
            start_amount: u(E18),
            curve: DecayCurve::empty(),
            max_amount: u(E18),
        },
        outputs: vec![CurveOutput {
            token: OUTPUT_TOKEN,
            start_amount: u(output_start),
            curve: output_curve,
            recipient: SWAPPER,
            min_amount: U256::ZERO,
        }],
    }
}

pub fn priority_order(cosigner: Option<Address>, output_mps: u64) -> PriorityOrder {
    PriorityOrder {
        info: info(3),
        cosigner,
        auction_start_block: u(100),
        baseline_priority_fee_wei: U256::ZERO,
        input: PriorityInput {
            token: INPUT_TOKEN,
            amount: u(E18),
            mps_per_priority_fee_wei: U256::ZERO,
        },
        outputs: vec![PriorityOutput {
            token: OUTPUT_TOKEN,
            amount: u(E18),
            mps_per_priority_fee_wei: u(output_mps),
            recipient: SWAPPER,
        }],
    }
}
