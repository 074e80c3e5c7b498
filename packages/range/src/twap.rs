// Time-weighted average tick from AMM cumulatives

use belugavault_math::MathError;

use crate::error::RangeError;

/// Average tick over `window` seconds, truncated toward zero
pub fn twap_from_cumulatives(
    cumulative_old: i64,
    cumulative_new: i64,
    window: u32,
) -> Result<i32, RangeError> {
    if window == 0 {
        return Err(RangeError::InvalidTwapWindow);
    }

    let delta = cumulative_new
        .checked_sub(cumulative_old)
        .ok_or(RangeError::Math(MathError::Overflow))?;
    let average = delta / i64::from(window);

    i32::try_from(average).map_err(|_| RangeError::TickOutOfRange)
}

/// `|tick - twap| <= max_deviation`
pub fn check_twap_deviation(tick: i32, twap: i32, max_deviation: u32) -> Result<(), RangeError> {
    let deviation = (i64::from(tick) - i64::from(twap)).unsigned_abs();
    if deviation > u64::from(max_deviation) {
        return Err(RangeError::TwapDeviationExceeded);
    }
    Ok(())
}
