// BelugaVault Math Package

#![no_std]

pub mod constants;
pub mod error;
pub mod full_math;
pub mod sqrt_price;
pub mod liquidity;

pub use primitive_types::U256;

pub use constants::*;
pub use error::MathError;

pub use full_math::{
    div_rounding_up,
    from_host_u256,
    mul_div,
    mul_div_rounding_up,
    mul_div_u128,
    mul_div_u128_rounding_up,
    to_host_u256,
    to_u128,
};

pub use sqrt_price::get_sqrt_ratio_at_tick;

pub use liquidity::{
    get_amount0_delta,
    get_amount1_delta,
    get_amounts_for_liquidity,
    get_liquidity_for_amount0,
    get_liquidity_for_amount1,
    get_liquidity_for_amounts,
    Rounding,
};

/// Round a tick toward negative infinity to a multiple of `spacing`.
pub fn floor_tick(tick: i32, spacing: i32) -> Result<i32, MathError> {
    if spacing <= 0 {
        return Err(MathError::InvalidTickSpacing);
    }
    Ok(tick - tick.rem_euclid(spacing))
}
