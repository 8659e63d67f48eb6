//! Order families and the resolved order they evaluate to.
//!
//! Three families share [`OrderInfo`]:
//! - [`LinearOrder`]: two-point decay over timestamps
//! - [`CurveOrder`]: piecewise-linear decay over block numbers
//! - [`PriorityOrder`]: fixed amounts scaled by the priority fee

use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::types::{DecayCurve, ExecutionSnapshot, LinearRange};

/// Fields common to every order family.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct OrderInfo {
    /// Settlement contract the order is bound to.
    pub reactor: Address,
    /// Order owner.
    pub swapper: Address,
    pub nonce: U256,
    /// Last timestamp at which the order may be filled.
    pub deadline: U256,
    #[serde(default)]
    pub additional_validation_contract: Address,
    #[serde(default)]
    pub additional_validation_data: Bytes,
}

impl OrderInfo {
    /// Fail with [`OrderError::DeadlinePassed`] once `timestamp > deadline`.
    pub fn check_deadline(&self, snapshot: &ExecutionSnapshot) -> Result<(), OrderError> {
        if snapshot.timestamp > self.deadline {
            return Err(OrderError::DeadlinePassed {
                deadline: self.deadline.to_string(),
                current: snapshot.timestamp.to_string(),
            });
        }
        Ok(())
    }
}

// --- Linear (time-based) ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearInput {
    pub token: Address,
    pub start_amount: U256,
    pub end_amount: U256,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearOutput {
    pub token: Address,
    pub start_amount: U256,
    pub end_amount: U256,
    pub recipient: Address,
}

impl LinearOutput {
    pub fn decays(&self) -> bool {
        self.start_amount != self.end_amount
    }
}

/// Two-point Dutch order decaying between `decay_start_time` and `decay_end_time`.
///
/// Exclusivity lasts until the decay start time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearOrder {
    pub info: OrderInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosigner: Option<Address>,
    pub decay_start_time: U256,
    pub decay_end_time: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_filler: Option<Address>,
    #[serde(default)]
    pub exclusivity_override_bps: U256,
    pub input: LinearInput,
    pub outputs: Vec<LinearOutput>,
}

impl LinearOrder {
    /// Structural checks on an order whose overrides have already been merged.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.outputs.is_empty() {
            return Err(OrderError::NoOutputs);
        }
        if self.info.deadline < self.decay_end_time {
            return Err(OrderError::DeadlineBeforeEndTime {
                deadline: self.info.deadline.to_string(),
                end: self.decay_end_time.to_string(),
            });
        }
        let input_decays = self.input.start_amount != self.input.end_amount;
        if input_decays && self.outputs.iter().any(LinearOutput::decays) {
            return Err(OrderError::InputAndOutputDecay);
        }
        Ok(())
    }

    pub fn input_range(&self) -> LinearRange {
        LinearRange {
            start_amount: self.input.start_amount,
            end_amount: self.input.end_amount,
            start_position: self.decay_start_time,
            end_position: self.decay_end_time,
        }
    }

    pub fn output_range(&self, output: &LinearOutput) -> LinearRange {
        LinearRange {
            start_amount: output.start_amount,
            end_amount: output.end_amount,
            start_position: self.decay_start_time,
            end_position: self.decay_end_time,
        }
    }
}

// --- Curve (block-based) ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurveInput {
    pub token: Address,
    pub start_amount: U256,
    pub curve: DecayCurve,
    /// Ceiling the decayed input may never exceed.
    pub max_amount: U256,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurveOutput {
    pub token: Address,
    pub start_amount: U256,
    pub curve: DecayCurve,
    pub recipient: Address,
    /// Floor the decayed output may never drop below.
    pub min_amount: U256,
}

/// Dutch order decaying along per-token curves, measured in blocks from
/// `decay_start_block`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurveOrder {
    pub info: OrderInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosigner: Option<Address>,
    pub decay_start_block: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_filler: Option<Address>,
    #[serde(default)]
    pub exclusivity_override_bps: U256,
    pub input: CurveInput,
    pub outputs: Vec<CurveOutput>,
}

impl CurveOrder {
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.outputs.is_empty() {
            return Err(OrderError::NoOutputs);
        }
        Ok(())
    }
}

// --- Priority fee ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PriorityInput {
    pub token: Address,
    pub amount: U256,
    /// Scaling rate in MPS per wei of priority fee above the baseline.
    pub mps_per_priority_fee_wei: U256,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PriorityOutput {
    pub token: Address,
    pub amount: U256,
    pub mps_per_priority_fee_wei: U256,
    pub recipient: Address,
}

/// Order whose amounts scale with the priority fee paid by the filler.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PriorityOrder {
    pub info: OrderInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosigner: Option<Address>,
    /// First block at which the auction is open.
    pub auction_start_block: U256,
    /// Priority fee that is free of scaling.
    #[serde(default)]
    pub baseline_priority_fee_wei: U256,
    pub input: PriorityInput,
    pub outputs: Vec<PriorityOutput>,
}

impl PriorityOrder {
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.outputs.is_empty() {
            return Err(OrderError::NoOutputs);
        }
        Ok(())
    }
}

/// Any order family.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Order {
    Linear(LinearOrder),
    Curve(CurveOrder),
    Priority(PriorityOrder),
}

impl Order {
    pub fn info(&self) -> &OrderInfo {
        match self {
            Self::Linear(o) => &o.info,
            Self::Curve(o) => &o.info,
            Self::Priority(o) => &o.info,
        }
    }

    /// Cosigner the order delegates last-mile parameters to, if any.
    pub fn cosigner(&self) -> Option<Address> {
        let cosigner = match self {
            Self::Linear(o) => o.cosigner,
            Self::Curve(o) => o.cosigner,
            Self::Priority(o) => o.cosigner,
        };
        cosigner.filter(|a| !a.is_zero())
    }

    /// Short family name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Curve(_) => "curve",
            Self::Priority(_) => "priority",
        }
    }
}

// --- Resolved ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InputToken {
    pub token: Address,
    /// Amount the swapper pays at this evaluation.
    pub amount: U256,
    /// Largest amount the swapper could ever pay for this order.
    pub max_amount: U256,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutputToken {
    pub token: Address,
    pub amount: U256,
    pub recipient: Address,
}

/// Concrete amounts owed for one fill at one execution snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedOrder {
    pub order_hash: B256,
    pub info: OrderInfo,
    pub input: InputToken,
    pub outputs: Vec<OutputToken>,
}
