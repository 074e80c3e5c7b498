use belugavault_math::{get_sqrt_ratio_at_tick, Rounding};
use belugavault_position::*;
use belugavault_range::TickRange;

fn holdings(total_shares: u128, base_liquidity: u128, idle0: u128, idle1: u128) -> Holdings {
    Holdings {
        sqrt_price_x96: get_sqrt_ratio_at_tick(0).unwrap(),
        total_shares,
        base: VaultPosition::new(TickRange::new(-600, 660), base_liquidity),
        limit: VaultPosition::new(TickRange::new(60, 660), 0),
        idle0,
        idle1,
    }
}

// ============================================================
// BOOTSTRAP DEPOSIT TESTS
// ============================================================

#[test]
fn test_bootstrap_shares_equal_liquidity() {
    let quote = quote_deposit(&holdings(0, 0, 0, 0), 1_000_000, 1_000_000, 0).unwrap();

    assert_eq!(quote.base_liquidity, 30_807_233);
    assert_eq!(quote.shares + quote.locked_shares, quote.base_liquidity);
    assert_eq!(quote.locked_shares, MIN_LOCKED_SHARES);
    assert_eq!(quote.limit_liquidity, 0);
    assert_eq!((quote.amount0, quote.amount1), (999_998, 910_447));
}

#[test]
fn test_bootstrap_too_small_fails() {
    let result = quote_deposit(&holdings(0, 0, 0, 0), 10, 10, 0);
    assert_eq!(result, Err(AccountingError::BootstrapTooSmall));
}

// ============================================================
// PROPORTIONAL DEPOSIT TESTS
// ============================================================

#[test]
fn test_deposit_matches_existing_liquidity_ratio() {
    let quote = quote_deposit(&holdings(30_807_233, 30_807_233, 0, 0), 500_000, 500_000, 0).unwrap();

    assert_eq!(quote.shares, 15_403_554);
    assert_eq!(quote.base_liquidity, 15_403_556);
    assert_eq!((quote.amount0, quote.amount1), (499_998, 455_222));
    assert_eq!(quote.locked_shares, 0);
}

#[test]
fn test_deposit_buys_slice_of_idle() {
    let quote = quote_deposit(&holdings(30_807_233, 30_807_233, 1_000, 2_000), 500_000, 500_000, 0).unwrap();

    assert_eq!(quote.shares, 15_388_135);
    assert_eq!((quote.idle0, quote.idle1), (500, 999));
    assert_eq!((quote.amount0, quote.amount1), (499_997, 455_765));
}

#[test]
fn test_deposit_skips_idle_dust() {
    let quote = quote_deposit(&holdings(30_807_233, 30_807_233, 1_000, 2_000), 500_000, 500_000, 600).unwrap();

    assert_eq!(quote.idle0, 0);
    assert_eq!(quote.idle1, 999);
}

#[test]
fn test_deposit_covers_both_ranges() {
    let mut state = holdings(30_807_233, 30_807_233, 1_000, 2_000);
    state.limit = VaultPosition::new(TickRange::new(60, 660), 1_000_000);

    let quote = quote_deposit(&state, 500_000, 500_000, 0).unwrap();

    assert_eq!(quote.shares, 14_948_038);
    assert_eq!(quote.base_liquidity, 14_948_040);
    assert_eq!(quote.limit_liquidity, 485_213);
    assert_eq!((quote.amount0, quote.amount1), (499_995, 442_731));
}

#[test]
fn test_deposit_too_small_for_one_share() {
    let result = quote_deposit(&holdings(30_807_233, 30_807_233, 0, 0), 1, 1, 0);
    assert_eq!(result, Err(AccountingError::ZeroShares));
}

#[test]
fn test_deposit_into_unbacked_shares_fails() {
    let result = quote_deposit(&holdings(1_000, 0, 0, 0), 1_000, 1_000, 0);
    assert_eq!(result, Err(AccountingError::EmptyVault));
}

// ============================================================
// WITHDRAW TESTS
// ============================================================

#[test]
fn test_withdraw_releases_pro_rata_liquidity() {
    let quote = quote_withdraw(&holdings(1_000, 500, 0, 0), 100).unwrap();

    assert_eq!(quote.base_liquidity, 50);
    assert_eq!(quote.limit_liquidity, 0);
}

#[test]
fn test_withdraw_rounds_idle_down() {
    let quote = quote_withdraw(&holdings(3, 0, 10, 11), 1).unwrap();
    assert_eq!((quote.idle0, quote.idle1), (3, 3));
}

#[test]
fn test_withdraw_rejects_bad_share_counts() {
    assert_eq!(quote_withdraw(&holdings(1_000, 500, 0, 0), 0), Err(AccountingError::ZeroShares));
    assert_eq!(
        quote_withdraw(&holdings(1_000, 500, 0, 0), 1_001),
        Err(AccountingError::InsufficientShares)
    );
}

#[test]
fn test_balance_withdraw() {
    assert_eq!(quote_balance_withdraw(1_000, 333, 250, 1_000).unwrap(), (250, 83));
    assert_eq!(
        quote_balance_withdraw(1_000, 333, 2_000, 1_000),
        Err(AccountingError::InsufficientShares)
    );
}

// ============================================================
// TOTAL AMOUNTS TESTS
// ============================================================

#[test]
fn test_total_amounts_adds_idle() {
    let (total0, total1) = total_amounts(&holdings(30_807_233, 30_807_233, 7, 9), Rounding::Down).unwrap();

    // Bootstrap cost rounded down is one unit below the rounded-up charge
    assert_eq!((total0, total1), (999_997 + 7, 910_446 + 9));
}
