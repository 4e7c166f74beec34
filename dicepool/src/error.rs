use thiserror::Error;

/// Why a [`crate::DiceSpec`] was rejected. Only the first violated rule is
/// reported, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("number of dice is too low: {0}")]
    InvalidCount(i64),
    #[error("number of sides is too low: {0}")]
    InvalidSides(i64),
    #[error("number of low dice to drop must not be negative: {0}")]
    InvalidDropLow(i64),
    #[error("number of high dice to drop must not be negative: {0}")]
    InvalidDropHigh(i64),
    #[error("too many dice dropped: {drop_low} + {drop_high} >= {count}")]
    TooManyDropped {
        drop_low: i64,
        drop_high: i64,
        count: i64,
    },
}

/// Failure to read dice notation such as `4d6L1`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSpecError {
    #[error("malformed dice notation '{0}'")]
    Syntax(String),
    #[error(transparent)]
    Invalid(#[from] DiceError),
}
