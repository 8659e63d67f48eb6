//! Error types for the Sluice pricing core.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("negative result for unsigned value")] NegativeUint,
    #[error("arithmetic overflow")] Overflow,
    #[error("division by zero")] DivisionByZero,
    #[error("signed value out of range")] SignedOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecayError {
    #[error("invalid decay curve: {0}")] InvalidDecayCurve(String),
    #[error("incorrect amounts: start {start}, end {end}")] IncorrectAmounts { start: String, end: String },
    #[error("end position {end} before start position {start}")] EndTimeBeforeStartTime { start: String, end: String },
    #[error(transparent)] Math(#[from] MathError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExclusivityError {
    #[error("no exclusive override: strict exclusivity until {end}")] NoExclusiveOverride { end: String },
    #[error(transparent)] Math(#[from] MathError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriorityFeeError {
    #[error("auction not started: starts at {start}, current {current}")] AuctionNotStarted { start: String, current: String },
    #[error(transparent)] Math(#[from] MathError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("malformed signature: {0}")] MalformedSignature(String),
    #[error("signer recovery failed: {0}")] RecoveryFailed(String),
    #[error("invalid private key")] InvalidPrivateKey,
    #[error("signing failed: {0}")] SigningFailed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CosignError {
    #[error("invalid cosignature")] InvalidCosignature,
    #[error("invalid cosigner input override: {override_amount} > start {start}")] InvalidCosignerInput { override_amount: String, start: String },
    #[error("invalid cosigner output override at index {index}")] InvalidCosignerOutput { index: usize },
    #[error("output override count {got} does not match {expected} outputs")] OutputOverrideLength { got: usize, expected: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtraDataError {
    #[error("empty extra data")] Empty,
    #[error("truncated extra data: need {need} bytes, have {have}")] Truncated { need: usize, have: usize },
    #[error("trailing bytes after extra data: {0}")] TrailingBytes(usize),
    #[error("too many output overrides: {0}")] TooManyOutputs(usize),
    #[error("output length {0} set without outputs flag")] LengthWithoutOutputs(u8),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("deadline {deadline} before decay end {end}")] DeadlineBeforeEndTime { deadline: String, end: String },
    #[error("input and outputs both decay")] InputAndOutputDecay,
    #[error("deadline {deadline} passed at {current}")] DeadlinePassed { deadline: String, current: String },
    #[error("order already filled: {0}")] AlreadyFilled(String),
    #[error("order has no outputs")] NoOutputs,
    #[error("snapshot is for chain {got}, resolver quotes for chain {expected}")] ChainMismatch { expected: u64, got: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SluiceError {
    #[error(transparent)] Math(#[from] MathError),
    #[error(transparent)] Decay(#[from] DecayError),
    #[error(transparent)] Exclusivity(#[from] ExclusivityError),
    #[error(transparent)] PriorityFee(#[from] PriorityFeeError),
    #[error(transparent)] Crypto(#[from] CryptoError),
    #[error(transparent)] Cosign(#[from] CosignError),
    #[error(transparent)] ExtraData(#[from] ExtraDataError),
    #[error(transparent)] Order(#[from] OrderError),
}
