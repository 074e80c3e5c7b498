use belugavault_math::MathError;

/// Range selection and validation failures
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RangeError {
    /// Boundary not a multiple of tick spacing
    TickMisaligned,
    /// Boundary outside the AMM tick bounds
    TickOutOfRange,
    /// `lower >= upper`
    InvalidRange,
    /// Threshold not a positive multiple of tick spacing
    InvalidThreshold,
    /// Tick spacing must be positive
    InvalidTickSpacing,
    /// Twap window must be positive
    InvalidTwapWindow,
    /// Current tick too close to the global bounds
    PriceNearBounds,
    /// Current tick too far from the time-weighted average
    TwapDeviationExceeded,
    Math(MathError),
}

impl From<MathError> for RangeError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::TickOutOfRange => RangeError::TickOutOfRange,
            MathError::InvalidTickSpacing => RangeError::InvalidTickSpacing,
            other => RangeError::Math(other),
        }
    }
}
