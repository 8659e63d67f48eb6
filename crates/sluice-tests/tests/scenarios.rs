//! Concrete pricing scenarios, end to end through the public API.
//!
//! 1. Linear midpoint
//! 2. Linear past the end
//! 3. Single-point curve past its last point
//! 4. Exclusivity premium
//! 5. Cosignature over another digest
//! 6. Seventeen-point curve

use alloy_primitives::{Address, B256, I256, U256};

use sluice_core::error::{CosignError, DecayError, SluiceError};
use sluice_core::order::Order;
use sluice_core::types::{CosignerData, DecayCurve, ExclusivityWindow, PackedPositions, Role};
use sluice_cosign::{Cosigner, EcdsaRecovery, cosigner_digest, verify};
use sluice_decay::{curve, exclusivity, linear};
use sluice_tests::helpers::*;

#[test]
fn scenario_linear_midpoint() {
    let out = linear::decay(Role::Input, u(E18), u(2 * E18), u(100), u(200), u(150)).unwrap();
    assert_eq!(out, u(1_500_000_000_000_000_000));
}

#[test]
fn scenario_linear_past_end() {
    let out = linear::decay(Role::Input, u(E18), u(2 * E18), u(100), u(200), u(250)).unwrap();
    assert_eq!(out, u(2 * E18));
}

#[test]
fn scenario_curve_past_last_point() {
    let c = curve(&[(100, -(E18 as i64))]);
    let out = curve::decay(Role::Input, &c, u(E18), u(100), u(250), U256::ZERO, U256::MAX).unwrap();
    assert_eq!(out, u(2 * E18));
}

#[test]
fn scenario_exclusivity_premium() {
    let window = ExclusivityWindow {
        exclusive_party: Some(EXCLUSIVE_FILLER),
        end_position: u(100),
        override_bps: u(3_000),
    };
    let out = exclusivity::apply_override(&[u(E18)], OTHER_FILLER, &window, u(50)).unwrap();
    assert_eq!(out, vec![u(1_300_000_000_000_000_000)]);
}

#[test]
fn scenario_cosignature_over_other_digest() {
    let cosigner = Cosigner::random();
    let data = CosignerData::default();
    let signed = cosigner_digest(B256::repeat_byte(1), 1, &data);
    let checked = cosigner_digest(B256::repeat_byte(2), 1, &data);
    let signature = cosigner.sign_digest(&signed).unwrap();

    assert!(verify(&EcdsaRecovery, cosigner.address(), &signed, &signature).is_ok());
    assert_eq!(
        verify(&EcdsaRecovery, cosigner.address(), &checked, &signature),
        Err(CosignError::InvalidCosignature)
    );
}

#[test]
fn scenario_seventeen_point_curve() {
    let points: Vec<(u16, I256)> = (1..=17u16).map(|p| (p, i(p as i64))).collect();
    assert!(matches!(
        DecayCurve::from_points(&points),
        Err(DecayError::InvalidDecayCurve(_))
    ));

    // A deserialized curve can carry 17 amounts; evaluation still refuses it.
    let oversized = DecayCurve {
        relative_positions: PackedPositions(U256::ZERO),
        relative_amounts: vec![I256::ZERO; 17],
    };
    let order = Order::Curve(curve_order(None, E18, oversized));
    let err = resolver().resolve(&order, None, &snapshot(150, 0), Address::ZERO).unwrap_err();
    assert!(matches!(err, SluiceError::Decay(DecayError::InvalidDecayCurve(_))));
}

// ---------------------------------------------------------------------------
// Full flows
// ---------------------------------------------------------------------------

#[test]
fn cosigned_linear_order_lifecycle() {
    let cosigner = Cosigner::random();
    let mut order = linear_order(Some(cosigner.address()), (2 * E18, E18), (100, 200));
    order.exclusivity_override_bps = u(1_000);
    let order = Order::Linear(order);

    let data = CosignerData {
        decay_start: Some(u(120)),
        decay_end: Some(u(220)),
        exclusive_filler: Some(EXCLUSIVE_FILLER),
        output_overrides: Some(vec![u(3 * E18)]),
        ..Default::default()
    };
    let overrides = cosigner.cosign(order.order_hash(), 1, data).unwrap();
    let resolver = resolver();

    // Inside the window the exclusive filler pays the overridden start amount.
    let party = resolver
        .resolve(&order, Some(&overrides), &snapshot(0, 110), EXCLUSIVE_FILLER)
        .unwrap();
    assert_eq!(party.outputs[0].amount, u(3 * E18));

    // Anyone else pays a 10% premium on top.
    let other = resolver
        .resolve(&order, Some(&overrides), &snapshot(0, 110), OTHER_FILLER)
        .unwrap();
    assert_eq!(other.outputs[0].amount, u(3_300_000_000_000_000_000));

    // Halfway through the overridden schedule: 3e18 -> 1e18 at 170.
    let mid = resolver
        .resolve(&order, Some(&overrides), &snapshot(0, 170), OTHER_FILLER)
        .unwrap();
    assert_eq!(mid.outputs[0].amount, u(2 * E18));
    assert_eq!(mid.input.amount, u(E18));
    assert_eq!(mid.input.max_amount, u(E18));
}

#[test]
fn curve_order_walks_its_points() {
    let c = curve(&[(10, 1_000), (20, 3_000), (40, 3_500)]);
    let order = Order::Curve(curve_order(None, 10_000, c));
    let resolver = resolver();
    let at = |block: u64| {
        resolver
            .resolve(&order, None, &snapshot(block, 0), Address::ZERO)
            .unwrap()
            .outputs[0]
            .amount
    };
    assert_eq!(at(100), u(10_000));
    assert_eq!(at(105), u(9_500));
    assert_eq!(at(110), u(9_000));
    assert_eq!(at(115), u(8_000));
    assert_eq!(at(130), u(6_750));
    assert_eq!(at(140), u(6_500));
    assert_eq!(at(1_000_000), u(6_500));
}

#[test]
fn priority_order_rewards_higher_fees() {
    let order = Order::Priority(priority_order(None, 1_000));
    let resolver = resolver();
    let mut snap = snapshot(100, 0);

    snap.priority_fee = u(0);
    let base = resolver.resolve(&order, None, &snap, Address::ZERO).unwrap();
    snap.priority_fee = u(100);
    let bid = resolver.resolve(&order, None, &snap, Address::ZERO).unwrap();

    assert_eq!(base.outputs[0].amount, u(E18));
    // 100 wei * 1_000 mps = 100_000 mps = 1%
    assert_eq!(bid.outputs[0].amount, u(1_010_000_000_000_000_000));
}

#[test]
fn resolved_order_serializes_to_json() {
    let order = Order::Linear(linear_order(None, (2 * E18, E18), (100, 200)));
    let out = resolver().resolve(&order, None, &snapshot(0, 150), Address::ZERO).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["order_hash"], serde_json::json!(out.order_hash.to_string()));
    assert_eq!(json["outputs"].as_array().map(Vec::len), Some(1));
}
