// Constants for Q64.96 concentrated-liquidity math
//
// Grouped by functionality:
// - Tick bounds shared with the AMM
// - Square-root price bounds (Q64.96)
// - Fixed-point scaling factors

use primitive_types::U256;

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum tick supported by the AMM
/// Price at MIN_TICK ≈ 2.94e-39
pub const MIN_TICK: i32 = -887272;

/// Maximum tick supported by the AMM
/// Price at MAX_TICK ≈ 3.40e+38
pub const MAX_TICK: i32 = 887272;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.96 format)
// ============================================================

/// sqrt(1.0001^MIN_TICK) * 2^96
pub const MIN_SQRT_RATIO: u128 = 4295128739;

/// sqrt(1.0001^MAX_TICK) * 2^96, as little-endian 64-bit limbs
/// Value: 1461446703485210103287273052203988822378723970342
const MAX_SQRT_RATIO_LIMBS: [u64; 4] = [
    0x5d95_1d52_6398_8d26,
    0xefd1_fc6a_5064_8849,
    0x0000_0000_fffd_8963,
    0x0000_0000_0000_0000,
];

/// Upper sqrt price bound (exclusive for valid prices)
#[inline]
pub fn max_sqrt_ratio() -> U256 {
    U256(MAX_SQRT_RATIO_LIMBS)
}

/// Lower sqrt price bound (inclusive)
#[inline]
pub fn min_sqrt_ratio() -> U256 {
    U256::from(MIN_SQRT_RATIO)
}

// ============================================================
// FIXED-POINT CONSTANTS
// ============================================================

/// Number of fractional bits in a Q64.96 value
pub const RESOLUTION: u32 = 96;

/// 2^96 as U256, price = 1.0 in Q64.96
#[inline]
pub fn q96() -> U256 {
    U256::one() << RESOLUTION
}
