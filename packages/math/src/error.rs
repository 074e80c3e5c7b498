// SPDX-License-Identifier: MIT

/// Failures of the pure math layer.
///
/// Every conversion that could leave the fixed-width domain reports an
/// error instead of wrapping or saturating.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    /// Tick outside `[MIN_TICK, MAX_TICK]`
    TickOutOfRange,
    /// Tick spacing must be positive
    InvalidTickSpacing,
    /// Lower and upper sqrt prices coincide
    InvalidRange,
    /// Result does not fit the target integer width
    Overflow,
    /// Zero denominator
    DivisionByZero,
}
