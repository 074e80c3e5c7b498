// SPDX-License-Identifier: MIT
// Liquidity Calculations

use primitive_types::U256;

use crate::constants::{q96, RESOLUTION};
use crate::error::MathError;
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up, to_u128};

/// Rounding direction for liquidity -> amount conversions.
///
/// `Down` when the vault pays out, `Up` when a contributor is charged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rounding {
    Down,
    Up,
}

#[inline]
fn sorted(sqrt_price_a: U256, sqrt_price_b: U256) -> (U256, U256) {
    if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    }
}

/// Token0 covered by `liquidity` between two prices
pub fn get_amount0_delta(
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a, sqrt_price_b);
    if sqrt_lower.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_upper - sqrt_lower;

    let amount = if round_up {
        div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_upper)?,
            sqrt_lower,
        )?
    } else {
        mul_div(numerator1, numerator2, sqrt_upper)? / sqrt_lower
    };

    to_u128(amount)
}

/// Token1 covered by `liquidity` between two prices
pub fn get_amount1_delta(
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a, sqrt_price_b);
    let delta = sqrt_upper - sqrt_lower;

    let amount = if round_up {
        mul_div_rounding_up(U256::from(liquidity), delta, q96())?
    } else {
        mul_div(U256::from(liquidity), delta, q96())?
    };

    to_u128(amount)
}

fn liquidity0_wide(sqrt_lower: U256, sqrt_upper: U256, amount0: u128) -> Result<U256, MathError> {
    if sqrt_lower == sqrt_upper {
        return Err(MathError::InvalidRange);
    }
    let intermediate = mul_div(sqrt_lower, sqrt_upper, q96())?;
    mul_div(U256::from(amount0), intermediate, sqrt_upper - sqrt_lower)
}

fn liquidity1_wide(sqrt_lower: U256, sqrt_upper: U256, amount1: u128) -> Result<U256, MathError> {
    if sqrt_lower == sqrt_upper {
        return Err(MathError::InvalidRange);
    }
    mul_div(U256::from(amount1), q96(), sqrt_upper - sqrt_lower)
}

/// Liquidity supported by `amount0` across a range, rounded down
pub fn get_liquidity_for_amount0(
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    amount0: u128,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a, sqrt_price_b);
    to_u128(liquidity0_wide(sqrt_lower, sqrt_upper, amount0)?)
}

/// Liquidity supported by `amount1` across a range, rounded down
pub fn get_liquidity_for_amount1(
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    amount1: u128,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a, sqrt_price_b);
    to_u128(liquidity1_wide(sqrt_lower, sqrt_upper, amount1)?)
}

/// Maximum liquidity that both amounts can back at the current price
pub fn get_liquidity_for_amounts(
    sqrt_price: U256,
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    amount0: u128,
    amount1: u128,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a, sqrt_price_b);

    let liquidity = if sqrt_price <= sqrt_lower {
        liquidity0_wide(sqrt_lower, sqrt_upper, amount0)?
    } else if sqrt_price < sqrt_upper {
        let liquidity0 = liquidity0_wide(sqrt_price, sqrt_upper, amount0)?;
        let liquidity1 = liquidity1_wide(sqrt_lower, sqrt_price, amount1)?;
        liquidity0.min(liquidity1)
    } else {
        liquidity1_wide(sqrt_lower, sqrt_upper, amount1)?
    };

    to_u128(liquidity)
}

/// Token amounts occupied by `liquidity` at the current price
pub fn get_amounts_for_liquidity(
    sqrt_price: U256,
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<(u128, u128), MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a, sqrt_price_b);
    let round_up = rounding == Rounding::Up;

    if liquidity == 0 {
        return Ok((0, 0));
    }

    if sqrt_price <= sqrt_lower {
        let amount0 = get_amount0_delta(sqrt_lower, sqrt_upper, liquidity, round_up)?;
        Ok((amount0, 0))
    } else if sqrt_price < sqrt_upper {
        let amount0 = get_amount0_delta(sqrt_price, sqrt_upper, liquidity, round_up)?;
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_price, liquidity, round_up)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_upper, liquidity, round_up)?;
        Ok((0, amount1))
    }
}
