//! EIP-712 struct hashes and ABI encodings.
//!
//! The Solidity shapes live in [`abi`]; the rest of the crate works with the
//! serde-friendly Rust types and converts on demand. An absent address or
//! override encodes as zero.

use alloy_primitives::{B256, U256};
use alloy_sol_types::{SolStruct, SolValue};

use crate::order::{
    CurveInput, CurveOrder, CurveOutput, LinearOrder, LinearOutput, Order, OrderInfo, PriorityInput,
    PriorityOrder, PriorityOutput,
};
use crate::types::{CosignerData, DecayCurve};

pub mod abi {
    use alloy_sol_types::sol;

    sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct OrderInfo {
            address reactor;
            address swapper;
            uint256 nonce;
            uint256 deadline;
            address additionalValidationContract;
            bytes additionalValidationData;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct DutchOutput {
            address token;
            uint256 startAmount;
            uint256 endAmount;
            address recipient;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct LinearDutchOrder {
            OrderInfo info;
            address cosigner;
            uint256 decayStartTime;
            uint256 decayEndTime;
            address exclusiveFiller;
            uint256 exclusivityOverrideBps;
            address inputToken;
            uint256 inputStartAmount;
            uint256 inputEndAmount;
            DutchOutput[] outputs;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct NonlinearDutchDecay {
            uint256 relativeBlocks;
            int256[] relativeAmounts;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CurveInput {
            address token;
            uint256 startAmount;
            NonlinearDutchDecay curve;
            uint256 maxAmount;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CurveOutput {
            address token;
            uint256 startAmount;
            NonlinearDutchDecay curve;
            address recipient;
            uint256 minAmount;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CurveDutchOrder {
            OrderInfo info;
            address cosigner;
            uint256 decayStartBlock;
            address exclusiveFiller;
            uint256 exclusivityOverrideBps;
            CurveInput input;
            CurveOutput[] outputs;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct PriorityInput {
            address token;
            uint256 amount;
            uint256 mpsPerPriorityFeeWei;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct PriorityOutput {
            address token;
            uint256 amount;
            uint256 mpsPerPriorityFeeWei;
            address recipient;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct PriorityOrder {
            OrderInfo info;
            address cosigner;
            uint256 auctionStartBlock;
            uint256 baselinePriorityFeeWei;
            PriorityInput input;
            PriorityOutput[] outputs;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CosignerData {
            uint256 decayStart;
            uint256 decayEnd;
            address exclusiveFiller;
            uint256 exclusivityOverrideBps;
            uint256 inputOverride;
            uint256[] outputOverrides;
        }
    }
}

impl From<&OrderInfo> for abi::OrderInfo {
    fn from(info: &OrderInfo) -> Self {
        Self {
            reactor: info.reactor,
            swapper: info.swapper,
            nonce: info.nonce,
            deadline: info.deadline,
            additionalValidationContract: info.additional_validation_contract,
            additionalValidationData: info.additional_validation_data.clone(),
        }
    }
}

impl From<&LinearOutput> for abi::DutchOutput {
    fn from(output: &LinearOutput) -> Self {
        Self {
            token: output.token,
            startAmount: output.start_amount,
            endAmount: output.end_amount,
            recipient: output.recipient,
        }
    }
}

impl From<&LinearOrder> for abi::LinearDutchOrder {
    fn from(order: &LinearOrder) -> Self {
        Self {
            info: (&order.info).into(),
            cosigner: order.cosigner.unwrap_or_default(),
            decayStartTime: order.decay_start_time,
            decayEndTime: order.decay_end_time,
            exclusiveFiller: order.exclusive_filler.unwrap_or_default(),
            exclusivityOverrideBps: order.exclusivity_override_bps,
            inputToken: order.input.token,
            inputStartAmount: order.input.start_amount,
            inputEndAmount: order.input.end_amount,
            outputs: order.outputs.iter().map(Into::into).collect(),
        }
    }
}

impl From<&DecayCurve> for abi::NonlinearDutchDecay {
    fn from(curve: &DecayCurve) -> Self {
        Self {
            relativeBlocks: curve.relative_positions.0,
            relativeAmounts: curve.relative_amounts.clone(),
        }
    }
}

impl From<&CurveInput> for abi::CurveInput {
    fn from(input: &CurveInput) -> Self {
        Self {
            token: input.token,
            startAmount: input.start_amount,
            curve: (&input.curve).into(),
            maxAmount: input.max_amount,
        }
    }
}

impl From<&CurveOutput> for abi::CurveOutput {
    fn from(output: &CurveOutput) -> Self {
        Self {
            token: output.token,
            startAmount: output.start_amount,
            curve: (&output.curve).into(),
            recipient: output.recipient,
            minAmount: output.min_amount,
        }
    }
}

impl From<&CurveOrder> for abi::CurveDutchOrder {
    fn from(order: &CurveOrder) -> Self {
        Self {
            info: (&order.info).into(),
            cosigner: order.cosigner.unwrap_or_default(),
            decayStartBlock: order.decay_start_block,
            exclusiveFiller: order.exclusive_filler.unwrap_or_default(),
            exclusivityOverrideBps: order.exclusivity_override_bps,
            input: (&order.input).into(),
            outputs: order.outputs.iter().map(Into::into).collect(),
        }
    }
}

impl From<&PriorityInput> for abi::PriorityInput {
    fn from(input: &PriorityInput) -> Self {
        Self {
            token: input.token,
            amount: input.amount,
            mpsPerPriorityFeeWei: input.mps_per_priority_fee_wei,
        }
    }
}

impl From<&PriorityOutput> for abi::PriorityOutput {
    fn from(output: &PriorityOutput) -> Self {
        Self {
            token: output.token,
            amount: output.amount,
            mpsPerPriorityFeeWei: output.mps_per_priority_fee_wei,
            recipient: output.recipient,
        }
    }
}

impl From<&PriorityOrder> for abi::PriorityOrder {
    fn from(order: &PriorityOrder) -> Self {
        Self {
            info: (&order.info).into(),
            cosigner: order.cosigner.unwrap_or_default(),
            auctionStartBlock: order.auction_start_block,
            baselinePriorityFeeWei: order.baseline_priority_fee_wei,
            input: (&order.input).into(),
            outputs: order.outputs.iter().map(Into::into).collect(),
        }
    }
}

impl From<&CosignerData> for abi::CosignerData {
    fn from(data: &CosignerData) -> Self {
        Self {
            decayStart: data.decay_start.unwrap_or_default(),
            decayEnd: data.decay_end.unwrap_or_default(),
            exclusiveFiller: data.exclusive_filler.unwrap_or_default(),
            exclusivityOverrideBps: data.exclusivity_override_bps.unwrap_or_default(),
            inputOverride: data.input_override.unwrap_or_default(),
            outputOverrides: data.output_overrides.clone().unwrap_or_default(),
        }
    }
}

impl From<abi::CosignerData> for CosignerData {
    fn from(data: abi::CosignerData) -> Self {
        let nonzero = |v: U256| (!v.is_zero()).then_some(v);
        Self {
            decay_start: nonzero(data.decayStart),
            decay_end: nonzero(data.decayEnd),
            exclusive_filler: (!data.exclusiveFiller.is_zero()).then_some(data.exclusiveFiller),
            exclusivity_override_bps: nonzero(data.exclusivityOverrideBps),
            input_override: nonzero(data.inputOverride),
            output_overrides: (!data.outputOverrides.is_empty()).then_some(data.outputOverrides),
        }
    }
}

impl LinearOrder {
    pub fn order_hash(&self) -> B256 {
        abi::LinearDutchOrder::from(self).eip712_hash_struct()
    }
}

impl CurveOrder {
    pub fn order_hash(&self) -> B256 {
        abi::CurveDutchOrder::from(self).eip712_hash_struct()
    }
}

impl PriorityOrder {
    pub fn order_hash(&self) -> B256 {
        abi::PriorityOrder::from(self).eip712_hash_struct()
    }
}

impl Order {
    /// EIP-712 struct hash of the base order. Cosigner overrides are not part of it.
    pub fn order_hash(&self) -> B256 {
        match self {
            Self::Linear(o) => o.order_hash(),
            Self::Curve(o) => o.order_hash(),
            Self::Priority(o) => o.order_hash(),
        }
    }
}

/// `abi.encode(CosignerData)` with absent fields encoded as zero.
pub fn encode_cosigner_data(data: &CosignerData) -> Vec<u8> {
    SolValue::abi_encode(&abi::CosignerData::from(data))
}
