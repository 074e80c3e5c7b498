use belugavault_math::*;

// ============================================================
// TICK TO SQRT PRICE TESTS
// ============================================================

#[test]
fn test_get_sqrt_ratio_at_tick_zero() {
    // Tick 0 is price 1.0, exactly 2^96
    let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
    assert_eq!(sqrt_price, q96());
}

#[test]
fn test_get_sqrt_ratio_at_tick_bounds() {
    assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK).unwrap(), min_sqrt_ratio());
    assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK).unwrap(), max_sqrt_ratio());
}

#[test]
fn test_get_sqrt_ratio_at_tick_known_values() {
    let cases: [(i32, &str); 6] = [
        (1, "79232123823359799118286999568"),
        (-1, "79224201403219477170569942574"),
        (60, "79466191966197645195421774833"),
        (-60, "78990846045029531151608375686"),
        (660, "81886174986422313813322306689"),
        (-600, "76886731765546235930195592750"),
    ];

    for (tick, expected) in cases {
        let expected = U256::from_dec_str(expected).unwrap();
        assert_eq!(get_sqrt_ratio_at_tick(tick).unwrap(), expected, "tick {}", tick);
    }
}

#[test]
fn test_get_sqrt_ratio_at_tick_out_of_range() {
    assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK - 1), Err(MathError::TickOutOfRange));
    assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK + 1), Err(MathError::TickOutOfRange));
}

#[test]
fn test_get_sqrt_ratio_at_tick_ordering() {
    let neg = get_sqrt_ratio_at_tick(-1000).unwrap();
    let zero = get_sqrt_ratio_at_tick(0).unwrap();
    let pos = get_sqrt_ratio_at_tick(1000).unwrap();

    assert!(neg < zero);
    assert!(zero < pos);
}

// ============================================================
// TICK FLOOR TESTS
// ============================================================

#[test]
fn test_floor_tick_positive_and_negative() {
    assert_eq!(floor_tick(0, 60).unwrap(), 0);
    assert_eq!(floor_tick(59, 60).unwrap(), 0);
    assert_eq!(floor_tick(60, 60).unwrap(), 60);
    // Negative ticks round toward negative infinity
    assert_eq!(floor_tick(-1, 60).unwrap(), -60);
    assert_eq!(floor_tick(-60, 60).unwrap(), -60);
    assert_eq!(floor_tick(-61, 60).unwrap(), -120);
}

#[test]
fn test_floor_tick_rejects_bad_spacing() {
    assert_eq!(floor_tick(10, 0), Err(MathError::InvalidTickSpacing));
    assert_eq!(floor_tick(10, -60), Err(MathError::InvalidTickSpacing));
}
