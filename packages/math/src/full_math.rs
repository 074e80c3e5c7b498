// SPDX-License-Identifier: MIT
// Full-precision multiply/divide over a 512-bit intermediate

use primitive_types::{U256, U512};
use soroban_sdk::{Bytes, Env};

use crate::error::MathError;

#[inline]
fn narrow(value: U512) -> Result<U256, MathError> {
    let limbs = value.0;
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(MathError::Overflow);
    }
    Ok(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// floor(a * b / denominator) without intermediate overflow
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    narrow(a.full_mul(b) / U512::from(denominator))
}

/// ceil(a * b / denominator) without intermediate overflow
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.full_mul(b).div_mod(U512::from(denominator));
    let quotient = narrow(quotient)?;
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        quotient.checked_add(U256::one()).ok_or(MathError::Overflow)
    }
}

/// ceil(numerator / denominator)
pub fn div_rounding_up(numerator: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        // quotient < U256::MAX whenever denominator > 1
        Ok(quotient + U256::one())
    }
}

/// Checked narrowing to u128
#[inline]
pub fn to_u128(value: U256) -> Result<u128, MathError> {
    if value > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(value.low_u128())
}

/// floor(a * b / denominator) for u128 operands
pub fn mul_div_u128(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    to_u128(mul_div(U256::from(a), U256::from(b), U256::from(denominator))?)
}

/// ceil(a * b / denominator) for u128 operands
pub fn mul_div_u128_rounding_up(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    to_u128(mul_div_rounding_up(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
    )?)
}

// ============================================================
// HOST VALUE CONVERSION
// ============================================================

/// Convert a host `soroban_sdk::U256` into a local 256-bit integer
pub fn from_host_u256(value: &soroban_sdk::U256) -> U256 {
    let mut buf = [0u8; 32];
    value.to_be_bytes().copy_into_slice(&mut buf);
    U256::from_big_endian(&buf)
}

/// Convert a local 256-bit integer into a host `soroban_sdk::U256`
pub fn to_host_u256(env: &Env, value: U256) -> soroban_sdk::U256 {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    soroban_sdk::U256::from_be_bytes(env, &Bytes::from_array(env, &buf))
}
