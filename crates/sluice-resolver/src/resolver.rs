//! Order resolution: cosigner checks, decay, exclusivity and priority-fee
//! scaling composed into one evaluation.
//!
//! The [`Resolver`] runs the pipeline against a single
//! [`ExecutionSnapshot`]; nothing is re-read from the environment midway.

use std::borrow::Cow;

use alloy_primitives::{Address, B256, U256};
use tracing::{debug, warn};

use sluice_core::error::{CosignError, OrderError, SluiceError};
use sluice_core::order::{
    CurveOrder, InputToken, LinearOrder, Order, OutputToken, PriorityOrder, ResolvedOrder,
};
use sluice_core::traits::SignerRecovery;
use sluice_core::types::{CosignedOverrides, ExclusivityWindow, ExecutionSnapshot, Role};
use sluice_cosign::{ApplyOverrides, verify_overrides};
use sluice_decay::{curve, exclusivity, linear, priority_fee};

use crate::config::ResolverConfig;

/// Resolves orders to concrete amounts.
///
/// Holds no mutable state: `resolve` takes `&self`, so one resolver can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Resolver<R: SignerRecovery> {
    recovery: R,
    config: ResolverConfig,
}

impl<R: SignerRecovery> Resolver<R> {
    pub fn new(recovery: R, config: ResolverConfig) -> Self {
        Self { recovery, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `order` for `filler` at `snapshot`.
    ///
    /// Steps, each of which aborts the whole evaluation on error:
    /// 1. chain check against the configured chain id, then the deadline
    ///    check (if enabled)
    /// 2. cosignature verification and override merge
    /// 3. family-specific decay or fee scaling
    /// 4. exclusivity premium for fillers without rights
    pub fn resolve(
        &self,
        order: &Order,
        overrides: Option<&CosignedOverrides>,
        snapshot: &ExecutionSnapshot,
        filler: Address,
    ) -> Result<ResolvedOrder, SluiceError> {
        let order_hash = order.order_hash();
        if snapshot.chain_id != self.config.chain_id {
            warn!(%order_hash, expected = self.config.chain_id, got = snapshot.chain_id, "snapshot from another chain");
            return Err(OrderError::ChainMismatch {
                expected: self.config.chain_id,
                got: snapshot.chain_id,
            }
            .into());
        }
        if self.config.enforce_deadline {
            order.info().check_deadline(snapshot)?;
        }

        let effective = self.merge_overrides(order, order_hash, overrides, self.config.chain_id)?;
        let resolved = match effective.as_ref() {
            Order::Linear(o) => resolve_linear(o, order_hash, snapshot, filler)?,
            Order::Curve(o) => resolve_curve(o, order_hash, snapshot, filler)?,
            Order::Priority(o) => resolve_priority(o, order_hash, snapshot)?,
        };

        debug!(
            %order_hash,
            kind = order.kind(),
            %filler,
            input = %resolved.input.amount,
            outputs = resolved.outputs.len(),
            "resolved order"
        );
        Ok(resolved)
    }

    /// Authenticate `overrides` and fold them into `order`.
    fn merge_overrides<'a>(
        &self,
        order: &'a Order,
        order_hash: B256,
        overrides: Option<&CosignedOverrides>,
        chain_id: u64,
    ) -> Result<Cow<'a, Order>, SluiceError> {
        match (order.cosigner(), overrides) {
            (None, None) => Ok(Cow::Borrowed(order)),
            (Some(cosigner), Some(overrides)) => {
                if let Err(e) = verify_overrides(&self.recovery, cosigner, order_hash, chain_id, overrides) {
                    warn!(%order_hash, %cosigner, "rejected cosignature");
                    return Err(e.into());
                }
                Ok(Cow::Owned(order.apply_overrides(&overrides.data)?))
            }
            (Some(cosigner), None) => {
                warn!(%order_hash, %cosigner, "missing cosignature");
                Err(CosignError::InvalidCosignature.into())
            }
            (None, Some(_)) => {
                warn!(%order_hash, "cosignature supplied for order without cosigner");
                Err(CosignError::InvalidCosignature.into())
            }
        }
    }
}

fn resolve_linear(
    order: &LinearOrder,
    order_hash: B256,
    snapshot: &ExecutionSnapshot,
    filler: Address,
) -> Result<ResolvedOrder, SluiceError> {
    order.validate()?;
    let now = snapshot.timestamp;

    let input = linear::decay_range(Role::Input, &order.input_range(), now)?;
    let decayed = order
        .outputs
        .iter()
        .map(|o| linear::decay_range(Role::Output, &order.output_range(o), now))
        .collect::<Result<Vec<_>, _>>()?;

    let window = ExclusivityWindow {
        exclusive_party: order.exclusive_filler,
        end_position: order.decay_start_time,
        override_bps: order.exclusivity_override_bps,
    };
    let amounts = exclusivity::apply_override(&decayed, filler, &window, now)?;

    Ok(ResolvedOrder {
        order_hash,
        info: order.info.clone(),
        input: InputToken {
            token: order.input.token,
            amount: input,
            max_amount: order.input.end_amount,
        },
        outputs: order
            .outputs
            .iter()
            .zip(amounts)
            .map(|(o, amount)| OutputToken {
                token: o.token,
                amount,
                recipient: o.recipient,
            })
            .collect(),
    })
}

fn resolve_curve(
    order: &CurveOrder,
    order_hash: B256,
    snapshot: &ExecutionSnapshot,
    filler: Address,
) -> Result<ResolvedOrder, SluiceError> {
    order.validate()?;
    let block = snapshot.block_number;
    let start = order.decay_start_block;

    let input = curve::decay(
        Role::Input,
        &order.input.curve,
        order.input.start_amount,
        start,
        block,
        U256::ZERO,
        order.input.max_amount,
    )?;
    let decayed = order
        .outputs
        .iter()
        .map(|o| curve::decay(Role::Output, &o.curve, o.start_amount, start, block, o.min_amount, U256::MAX))
        .collect::<Result<Vec<_>, _>>()?;

    let window = ExclusivityWindow {
        exclusive_party: order.exclusive_filler,
        end_position: start,
        override_bps: order.exclusivity_override_bps,
    };
    let amounts = exclusivity::apply_override(&decayed, filler, &window, block)?;

    Ok(ResolvedOrder {
        order_hash,
        info: order.info.clone(),
        input: InputToken {
            token: order.input.token,
            amount: input,
            max_amount: order.input.max_amount,
        },
        outputs: order
            .outputs
            .iter()
            .zip(amounts)
            .map(|(o, amount)| OutputToken {
                token: o.token,
                amount,
                recipient: o.recipient,
            })
            .collect(),
    })
}

fn resolve_priority(
    order: &PriorityOrder,
    order_hash: B256,
    snapshot: &ExecutionSnapshot,
) -> Result<ResolvedOrder, SluiceError> {
    order.validate()?;
    priority_fee::check_auction_started(order.auction_start_block, snapshot.block_number)?;
    let fee = priority_fee::effective_priority_fee(snapshot.priority_fee, order.baseline_priority_fee_wei);

    let input = priority_fee::scale_input(order.input.amount, fee, order.input.mps_per_priority_fee_wei)?;
    let outputs = order
        .outputs
        .iter()
        .map(|o| {
            Ok(OutputToken {
                token: o.token,
                amount: priority_fee::scale_output(o.amount, fee, o.mps_per_priority_fee_wei)?,
                recipient: o.recipient,
            })
        })
        .collect::<Result<Vec<_>, SluiceError>>()?;

    Ok(ResolvedOrder {
        order_hash,
        info: order.info.clone(),
        input: InputToken {
            token: order.input.token,
            amount: input,
            max_amount: order.input.amount,
        },
        outputs,
    })
}
