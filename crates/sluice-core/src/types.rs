//! Core pricing types: curves, linear ranges, exclusivity windows,
//! priority-fee specs, cosigner overrides and the execution snapshot.
//!
//! All amounts are `U256` token units. Curve deltas are `I256` and are
//! cumulative offsets from the base start amount, not per-segment steps.

use alloy_primitives::{Address, Bytes, I256, U256};
use serde::{Deserialize, Serialize};

use crate::constants::{CURVE_POSITION_BITS, MAX_CURVE_POINTS};
use crate::error::DecayError;
use crate::math::Rounding;

/// Which side of the trade an amount belongs to.
///
/// The role fixes the rounding direction: whatever is left over after
/// interpolation or scaling always goes to the order owner.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Paid by the order owner. Rounds toward the smaller amount.
    Input,
    /// Paid to the order owner. Rounds toward the larger amount.
    Output,
}

impl Role {
    /// Rounding applied to a computed amount for this role.
    pub fn amount_rounding(self) -> Rounding {
        match self {
            Self::Input => Rounding::Down,
            Self::Output => Rounding::Up,
        }
    }
}

/// Sixteen 16-bit relative positions packed into one 256-bit word.
///
/// Index 0 occupies the least significant 16 bits.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct PackedPositions(pub U256);

impl PackedPositions {
    /// Pack up to [`MAX_CURVE_POINTS`] positions.
    pub fn pack(positions: &[u16]) -> Result<Self, DecayError> {
        if positions.len() > MAX_CURVE_POINTS {
            return Err(DecayError::InvalidDecayCurve(format!(
                "{} positions exceed {MAX_CURVE_POINTS}",
                positions.len()
            )));
        }
        let word = positions
            .iter()
            .enumerate()
            .fold(U256::ZERO, |acc, (i, &p)| {
                acc | (U256::from(p) << (i * CURVE_POSITION_BITS))
            });
        Ok(Self(word))
    }

    /// Read the position at `index`. Indices past the word read as zero.
    pub fn get(&self, index: usize) -> u16 {
        if index >= MAX_CURVE_POINTS {
            return 0;
        }
        let shifted = self.0 >> (index * CURVE_POSITION_BITS);
        (shifted.as_limbs()[0] & 0xffff) as u16
    }

    /// The first `len` positions, clamped to the word width.
    pub fn unpack(&self, len: usize) -> Vec<u16> {
        (0..len.min(MAX_CURVE_POINTS)).map(|i| self.get(i)).collect()
    }
}

impl From<U256> for PackedPositions {
    fn from(word: U256) -> Self {
        Self(word)
    }
}

/// One point of a [`DecayCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    /// Offset from the decay start, in blocks or seconds.
    pub position: u16,
    /// Cumulative change from the start amount at this offset.
    pub delta: I256,
}

/// Piecewise-linear decay schedule in its on-chain shape.
///
/// The length of the curve is the length of `relative_amounts`; positions
/// are read from the packed word by index. A curve longer than
/// [`MAX_CURVE_POINTS`] can be deserialized but is rejected by every
/// operation that evaluates it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DecayCurve {
    pub relative_positions: PackedPositions,
    pub relative_amounts: Vec<I256>,
}

impl DecayCurve {
    /// A curve with no points: the amount never decays.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a curve from `(position, delta)` points.
    ///
    /// Rejects more than [`MAX_CURVE_POINTS`] points and positions that are
    /// not strictly increasing.
    pub fn from_points(points: &[(u16, I256)]) -> Result<Self, DecayError> {
        if points.len() > MAX_CURVE_POINTS {
            return Err(DecayError::InvalidDecayCurve(format!(
                "{} points exceed {MAX_CURVE_POINTS}",
                points.len()
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(DecayError::InvalidDecayCurve(format!(
                "position {} does not increase past {}",
                w[1].0, w[0].0
            )));
        }

        let positions: Vec<u16> = points.iter().map(|(p, _)| *p).collect();
        Ok(Self {
            relative_positions: PackedPositions::pack(&positions)?,
            relative_amounts: points.iter().map(|(_, d)| *d).collect(),
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.relative_amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative_amounts.is_empty()
    }

    /// Fail with [`DecayError::InvalidDecayCurve`] if the curve has too many points.
    pub fn check_len(&self) -> Result<(), DecayError> {
        if self.len() > MAX_CURVE_POINTS {
            return Err(DecayError::InvalidDecayCurve(format!(
                "{} points exceed {MAX_CURVE_POINTS}",
                self.len()
            )));
        }
        Ok(())
    }

    /// The point at `index`, if present.
    pub fn point(&self, index: usize) -> Option<CurvePoint> {
        self.relative_amounts.get(index).map(|&delta| CurvePoint {
            position: self.relative_positions.get(index),
            delta,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }
}

/// Two-point schedule: `start_amount` at `start_position` moving linearly to
/// `end_amount` at `end_position`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinearRange {
    pub start_amount: U256,
    pub end_amount: U256,
    pub start_position: U256,
    pub end_position: U256,
}

impl LinearRange {
    /// True when `start_amount == end_amount`.
    pub fn is_constant(&self) -> bool {
        self.start_amount == self.end_amount
    }
}

/// A period during which only `exclusive_party` fills at the unscaled price.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ExclusivityWindow {
    /// `None` means the order is open to everyone.
    pub exclusive_party: Option<Address>,
    /// Last position (inclusive) of the window.
    pub end_position: U256,
    /// Premium charged to non-exclusive fillers. Zero means strict exclusivity.
    pub override_bps: U256,
}

/// Linear price adjustment per wei of priority fee.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PriorityFeeSpec {
    /// Milli-basis-points of adjustment per wei of priority fee.
    pub rate_per_wei: U256,
    pub direction: Role,
}

/// Auction parameters a cosigner may override.
///
/// Absent fields fall back to the base order. A zero value is treated the
/// same as absent, matching the zero sentinel of the signed encoding.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CosignerData {
    /// Decay start position (auction target block for priority orders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_start: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_end: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_filler: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusivity_override_bps: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_override: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_overrides: Option<Vec<U256>>,
}

impl CosignerData {
    /// Decay start override, ignoring the zero sentinel.
    pub fn decay_start(&self) -> Option<U256> {
        self.decay_start.filter(|v| !v.is_zero())
    }

    pub fn decay_end(&self) -> Option<U256> {
        self.decay_end.filter(|v| !v.is_zero())
    }

    pub fn exclusive_filler(&self) -> Option<Address> {
        self.exclusive_filler.filter(|a| !a.is_zero())
    }

    pub fn exclusivity_override_bps(&self) -> Option<U256> {
        self.exclusivity_override_bps.filter(|v| !v.is_zero())
    }

    pub fn input_override(&self) -> Option<U256> {
        self.input_override.filter(|v| !v.is_zero())
    }

    /// Output overrides, ignoring an empty list.
    pub fn output_overrides(&self) -> Option<&[U256]> {
        self.output_overrides
            .as_deref()
            .filter(|overrides| !overrides.is_empty())
    }
}

/// A cosigner's payload plus its signature, bound to one order hash and chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CosignedOverrides {
    pub cosigner: Address,
    pub data: CosignerData,
    /// 65-byte `r ‖ s ‖ v` ECDSA signature over the cosigner digest.
    pub signature: Bytes,
}

/// Read-once view of the execution environment for a single evaluation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ExecutionSnapshot {
    pub block_number: U256,
    pub timestamp: U256,
    /// Priority fee per gas of the filling transaction, in wei.
    pub priority_fee: U256,
    pub chain_id: u64,
}
