// Range Validation
//
// Every boundary is checked before it is sent to the AMM. Nothing here
// clamps: an invalid range is an error.

use belugavault_math::{MAX_TICK, MIN_TICK};

use crate::error::RangeError;
use crate::types::TickRange;

/// Check alignment, ordering and global bounds of a range
pub fn validate_range(range: &TickRange, tick_spacing: i32) -> Result<(), RangeError> {
    if tick_spacing <= 0 {
        return Err(RangeError::InvalidTickSpacing);
    }

    if range.lower >= range.upper {
        return Err(RangeError::InvalidRange);
    }

    if range.lower < MIN_TICK || range.upper > MAX_TICK {
        return Err(RangeError::TickOutOfRange);
    }

    if range.lower.rem_euclid(tick_spacing) != 0 || range.upper.rem_euclid(tick_spacing) != 0 {
        return Err(RangeError::TickMisaligned);
    }

    Ok(())
}

/// Threshold must be a positive multiple of tick spacing
pub fn validate_threshold(threshold: i32, tick_spacing: i32) -> Result<(), RangeError> {
    if tick_spacing <= 0 {
        return Err(RangeError::InvalidTickSpacing);
    }

    if threshold <= 0 || threshold > MAX_TICK || threshold % tick_spacing != 0 {
        return Err(RangeError::InvalidThreshold);
    }

    Ok(())
}

/// Reject prices within `threshold + tick_spacing` of the global tick bounds
pub fn check_price_bounds(tick: i32, threshold: i32, tick_spacing: i32) -> Result<(), RangeError> {
    let margin = i64::from(threshold) + i64::from(tick_spacing);
    let tick = i64::from(tick);

    if tick <= i64::from(MIN_TICK) + margin || tick >= i64::from(MAX_TICK) - margin {
        return Err(RangeError::PriceNearBounds);
    }

    Ok(())
}
