// Range Selection
//
// Base order: symmetric bracket around the current tick.
// Limit order: single-sided order on whichever side absorbs more liquidity.

use belugavault_math::{floor_tick, get_liquidity_for_amounts, get_sqrt_ratio_at_tick, U256};

use crate::error::RangeError;
use crate::types::{LimitSide, TickRange};
use crate::validate::validate_range;

fn checked(value: Option<i32>) -> Result<i32, RangeError> {
    value.ok_or(RangeError::TickOutOfRange)
}

/// `[floor - threshold, floor + spacing + threshold]`
pub fn base_range(tick: i32, tick_spacing: i32, base_threshold: i32) -> Result<TickRange, RangeError> {
    let floor = floor_tick(tick, tick_spacing)?;
    let ceil = checked(floor.checked_add(tick_spacing))?;

    let range = TickRange::new(
        checked(floor.checked_sub(base_threshold))?,
        checked(ceil.checked_add(base_threshold))?,
    );
    validate_range(&range, tick_spacing)?;
    Ok(range)
}

/// `[floor - threshold, floor]`, entirely below the current price
pub fn bid_range(tick: i32, tick_spacing: i32, limit_threshold: i32) -> Result<TickRange, RangeError> {
    let floor = floor_tick(tick, tick_spacing)?;

    let range = TickRange::new(checked(floor.checked_sub(limit_threshold))?, floor);
    validate_range(&range, tick_spacing)?;
    Ok(range)
}

/// `[floor + spacing, floor + spacing + threshold]`, entirely above the current price
pub fn ask_range(tick: i32, tick_spacing: i32, limit_threshold: i32) -> Result<TickRange, RangeError> {
    let floor = floor_tick(tick, tick_spacing)?;
    let ceil = checked(floor.checked_add(tick_spacing))?;

    let range = TickRange::new(ceil, checked(ceil.checked_add(limit_threshold))?);
    validate_range(&range, tick_spacing)?;
    Ok(range)
}

fn liquidity_in(
    range: &TickRange,
    sqrt_price: U256,
    balance0: u128,
    balance1: u128,
) -> Result<u128, RangeError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(range.lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(range.upper)?;
    Ok(get_liquidity_for_amounts(sqrt_price, sqrt_lower, sqrt_upper, balance0, balance1)?)
}

/// Pick the limit range that absorbs more liquidity from the given balances.
///
/// The bid side wins only when strictly larger; ties go to the ask side.
pub fn select_limit_range(
    sqrt_price: U256,
    tick: i32,
    tick_spacing: i32,
    limit_threshold: i32,
    balance0: u128,
    balance1: u128,
) -> Result<(TickRange, LimitSide), RangeError> {
    let bid = bid_range(tick, tick_spacing, limit_threshold)?;
    let ask = ask_range(tick, tick_spacing, limit_threshold)?;

    let bid_liquidity = liquidity_in(&bid, sqrt_price, balance0, balance1)?;
    let ask_liquidity = liquidity_in(&ask, sqrt_price, balance0, balance1)?;

    if bid_liquidity > ask_liquidity {
        Ok((bid, LimitSide::Bid))
    } else {
        Ok((ask, LimitSide::Ask))
    }
}
