// Property-Based Testing with Proptest
// Run with: cargo test -p belugavault-math --test test_proptest

use belugavault_math::*;
use proptest::prelude::*;

fn sqrt(tick: i32) -> U256 {
    get_sqrt_ratio_at_tick(tick).unwrap()
}

// ============================================================
// SQRT PRICE PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: sqrt price is strictly increasing in tick
    #[test]
    fn prop_sqrt_ratio_monotonic(tick in MIN_TICK..MAX_TICK) {
        prop_assert!(sqrt(tick) < sqrt(tick + 1));
    }

    /// Property: every valid tick maps inside the sqrt price bounds
    #[test]
    fn prop_sqrt_ratio_within_bounds(tick in MIN_TICK..=MAX_TICK) {
        let price = sqrt(tick);
        prop_assert!(price >= min_sqrt_ratio());
        prop_assert!(price <= max_sqrt_ratio());
    }

    /// Property: floor_tick is aligned, not above the tick, within one spacing
    #[test]
    fn prop_floor_tick_aligned(tick in MIN_TICK..=MAX_TICK, spacing in 1i32..=200) {
        let floor = floor_tick(tick, spacing).unwrap();
        prop_assert_eq!(floor.rem_euclid(spacing), 0);
        prop_assert!(floor <= tick);
        prop_assert!(tick - floor < spacing);
    }
}

// ============================================================
// LIQUIDITY PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: liquidity credited for amounts never costs more than those amounts
    #[test]
    fn prop_liquidity_round_trip_never_exceeds_amounts(
        current in -2_000i32..2_000,
        lower in -3_000i32..0,
        width in 1i32..3_000,
        amount0 in 0u128..1_000_000_000_000,
        amount1 in 0u128..1_000_000_000_000,
    ) {
        let upper = lower + width;
        let (price, sa, sb) = (sqrt(current), sqrt(lower), sqrt(upper));

        let liquidity = get_liquidity_for_amounts(price, sa, sb, amount0, amount1).unwrap();
        let (used0, used1) = get_amounts_for_liquidity(price, sa, sb, liquidity, Rounding::Down).unwrap();

        prop_assert!(used0 <= amount0);
        prop_assert!(used1 <= amount1);
    }

    /// Property: rounding up charges at most one unit more than rounding down
    #[test]
    fn prop_rounding_up_brackets_down(
        current in -2_000i32..2_000,
        lower in -3_000i32..0,
        width in 1i32..3_000,
        liquidity in 0u128..1_000_000_000_000_000,
    ) {
        let upper = lower + width;
        let (price, sa, sb) = (sqrt(current), sqrt(lower), sqrt(upper));

        let down = get_amounts_for_liquidity(price, sa, sb, liquidity, Rounding::Down).unwrap();
        let up = get_amounts_for_liquidity(price, sa, sb, liquidity, Rounding::Up).unwrap();

        prop_assert!(up.0 >= down.0 && up.0 - down.0 <= 1);
        prop_assert!(up.1 >= down.1 && up.1 - down.1 <= 1);
    }

    /// Property: amounts are monotonic in liquidity
    #[test]
    fn prop_amounts_monotonic_in_liquidity(
        current in -2_000i32..2_000,
        liquidity in 0u128..1_000_000_000_000_000,
        extra in 0u128..1_000_000_000,
    ) {
        let (price, sa, sb) = (sqrt(current), sqrt(-2_400), sqrt(2_400));

        let small = get_amounts_for_liquidity(price, sa, sb, liquidity, Rounding::Down).unwrap();
        let large = get_amounts_for_liquidity(price, sa, sb, liquidity + extra, Rounding::Down).unwrap();

        prop_assert!(large.0 >= small.0);
        prop_assert!(large.1 >= small.1);
    }
}
