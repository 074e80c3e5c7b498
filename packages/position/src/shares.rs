// Share Accounting
//
// Shares track liquidity, not token value. A deposit buys the same slice of
// every range and of the idle balances that existing shares already own, so
// liquidity per share never decreases for existing holders.

use belugavault_math::{
    get_amounts_for_liquidity, get_liquidity_for_amounts, get_sqrt_ratio_at_tick, mul_div_u128,
    mul_div_u128_rounding_up, MathError, Rounding, U256,
};

use belugavault_range::TickRange;

use crate::error::AccountingError;
use crate::types::{DepositQuote, Holdings, VaultPosition, WithdrawQuote};

/// Shares minted to the vault itself on the first deposit
pub const MIN_LOCKED_SHARES: u128 = 1_000;

/// Extra liquidity charged to a depositor per active range
pub const LIQUIDITY_ROUNDING_EPSILON: u128 = 2;

/// Maximum over-charge of a rounded-up amount relative to the exact amount
const AMOUNT_ROUNDING_SLACK: u128 = 2;

// ============================================================
// HELPERS
// ============================================================

/// floor(amount * shares / total)
pub fn pro_rata(amount: u128, shares: u128, total: u128) -> Result<u128, AccountingError> {
    Ok(mul_div_u128(amount, shares, total)?)
}

fn amounts_of(
    position: &VaultPosition,
    sqrt_price: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<(u128, u128), AccountingError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(position.range.lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(position.range.upper)?;
    Ok(get_amounts_for_liquidity(
        sqrt_price, sqrt_lower, sqrt_upper, liquidity, rounding,
    )?)
}

fn add(a: u128, b: u128) -> Result<u128, AccountingError> {
    a.checked_add(b).ok_or(AccountingError::Math(MathError::Overflow))
}

/// Token amounts backing all shares: both ranges plus idle
pub fn total_amounts(holdings: &Holdings, rounding: Rounding) -> Result<(u128, u128), AccountingError> {
    let mut total0 = holdings.idle0;
    let mut total1 = holdings.idle1;

    for position in [&holdings.base, &holdings.limit] {
        if position.is_active() {
            let (a0, a1) = amounts_of(position, holdings.sqrt_price_x96, position.liquidity, rounding)?;
            total0 = add(total0, a0)?;
            total1 = add(total1, a1)?;
        }
    }

    Ok((total0, total1))
}

// ============================================================
// DEPOSIT
// ============================================================

/// Price a deposit of up to `desired0`/`desired1`.
///
/// Idle contributions below `idle_dust_threshold` are skipped.
pub fn quote_deposit(
    holdings: &Holdings,
    desired0: u128,
    desired1: u128,
    idle_dust_threshold: u128,
) -> Result<DepositQuote, AccountingError> {
    let quote = if holdings.total_shares == 0 {
        quote_bootstrap(holdings, desired0, desired1)?
    } else {
        quote_proportional(holdings, desired0, desired1, idle_dust_threshold)?
    };

    if quote.amount0 > desired0 || quote.amount1 > desired1 {
        return Err(AccountingError::ExceedsDesired);
    }

    Ok(quote)
}

/// Largest liquidity whose rounded-up cost fits within the budgets
pub fn deployable_liquidity(
    sqrt_price: U256,
    range: &TickRange,
    budget0: u128,
    budget1: u128,
) -> Result<(u128, (u128, u128)), AccountingError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(range.lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(range.upper)?;

    // Leave room for rounding the cost up
    let liquidity = get_liquidity_for_amounts(
        sqrt_price,
        sqrt_lower,
        sqrt_upper,
        budget0.saturating_sub(AMOUNT_ROUNDING_SLACK),
        budget1.saturating_sub(AMOUNT_ROUNDING_SLACK),
    )?;
    let cost = get_amounts_for_liquidity(sqrt_price, sqrt_lower, sqrt_upper, liquidity, Rounding::Up)?;

    if cost.0 > budget0 || cost.1 > budget1 {
        return Err(AccountingError::ExceedsDesired);
    }
    Ok((liquidity, cost))
}

fn quote_bootstrap(
    holdings: &Holdings,
    desired0: u128,
    desired1: u128,
) -> Result<DepositQuote, AccountingError> {
    let (liquidity, cost) =
        deployable_liquidity(holdings.sqrt_price_x96, &holdings.base.range, desired0, desired1)?;

    if liquidity <= MIN_LOCKED_SHARES {
        return Err(AccountingError::BootstrapTooSmall);
    }

    Ok(DepositQuote {
        shares: liquidity - MIN_LOCKED_SHARES,
        locked_shares: MIN_LOCKED_SHARES,
        base_liquidity: liquidity,
        base_cost: cost,
        amount0: cost.0,
        amount1: cost.1,
        ..DepositQuote::default()
    })
}

/// Shares affordable from one token's budget, `None` if the token backs nothing
fn shares_for_budget(
    desired: u128,
    slack: u128,
    holding: u128,
    total_shares: u128,
) -> Result<Option<u128>, AccountingError> {
    if holding == 0 {
        return Ok(None);
    }
    let budget = desired.saturating_sub(slack);
    Ok(Some(mul_div_u128(budget, total_shares, holding)?))
}

fn quote_proportional(
    holdings: &Holdings,
    desired0: u128,
    desired1: u128,
    idle_dust_threshold: u128,
) -> Result<DepositQuote, AccountingError> {
    let total_shares = holdings.total_shares;
    let sqrt_price = holdings.sqrt_price_x96;

    // Composite holding per token and the rounding allowance it needs
    let mut holding0 = holdings.idle0;
    let mut holding1 = holdings.idle1;
    let mut slack0 = u128::from(holdings.idle0 > 0);
    let mut slack1 = u128::from(holdings.idle1 > 0);

    for position in [&holdings.base, &holdings.limit] {
        if !position.is_active() {
            continue;
        }
        let (a0, a1) = amounts_of(position, sqrt_price, position.liquidity, Rounding::Up)?;
        let (e0, e1) = amounts_of(position, sqrt_price, LIQUIDITY_ROUNDING_EPSILON, Rounding::Up)?;
        if a0 > 0 {
            holding0 = add(holding0, a0)?;
            slack0 = add(slack0, add(e0, AMOUNT_ROUNDING_SLACK)?)?;
        }
        if a1 > 0 {
            holding1 = add(holding1, a1)?;
            slack1 = add(slack1, add(e1, AMOUNT_ROUNDING_SLACK)?)?;
        }
    }

    let shares = match (
        shares_for_budget(desired0, slack0, holding0, total_shares)?,
        shares_for_budget(desired1, slack1, holding1, total_shares)?,
    ) {
        (Some(s0), Some(s1)) => s0.min(s1),
        (Some(s0), None) => s0,
        (None, Some(s1)) => s1,
        (None, None) => return Err(AccountingError::EmptyVault),
    };

    if shares == 0 {
        return Err(AccountingError::ZeroShares);
    }

    let mut quote = DepositQuote {
        shares,
        ..DepositQuote::default()
    };

    if holdings.base.is_active() {
        let liquidity = add(
            mul_div_u128(holdings.base.liquidity, shares, total_shares)?,
            LIQUIDITY_ROUNDING_EPSILON,
        )?;
        quote.base_liquidity = liquidity;
        quote.base_cost = amounts_of(&holdings.base, sqrt_price, liquidity, Rounding::Up)?;
    }

    if holdings.limit.is_active() {
        let liquidity = add(
            mul_div_u128(holdings.limit.liquidity, shares, total_shares)?,
            LIQUIDITY_ROUNDING_EPSILON,
        )?;
        quote.limit_liquidity = liquidity;
        quote.limit_cost = amounts_of(&holdings.limit, sqrt_price, liquidity, Rounding::Up)?;
    }

    let idle0 = mul_div_u128_rounding_up(holdings.idle0, shares, total_shares)?;
    let idle1 = mul_div_u128_rounding_up(holdings.idle1, shares, total_shares)?;
    quote.idle0 = if idle0 < idle_dust_threshold { 0 } else { idle0 };
    quote.idle1 = if idle1 < idle_dust_threshold { 0 } else { idle1 };

    quote.amount0 = add(add(quote.base_cost.0, quote.limit_cost.0)?, quote.idle0)?;
    quote.amount1 = add(add(quote.base_cost.1, quote.limit_cost.1)?, quote.idle1)?;

    Ok(quote)
}

// ============================================================
// WITHDRAW
// ============================================================

/// Liquidity and idle balances released by burning `shares`, rounded down
pub fn quote_withdraw(holdings: &Holdings, shares: u128) -> Result<WithdrawQuote, AccountingError> {
    let total_shares = holdings.total_shares;
    if shares == 0 {
        return Err(AccountingError::ZeroShares);
    }
    if shares > total_shares {
        return Err(AccountingError::InsufficientShares);
    }

    Ok(WithdrawQuote {
        base_liquidity: pro_rata(holdings.base.liquidity, shares, total_shares)?,
        limit_liquidity: pro_rata(holdings.limit.liquidity, shares, total_shares)?,
        idle0: pro_rata(holdings.idle0, shares, total_shares)?,
        idle1: pro_rata(holdings.idle1, shares, total_shares)?,
    })
}

/// Pro-rata slice of the free token balances, ignoring AMM positions
pub fn quote_balance_withdraw(
    free0: u128,
    free1: u128,
    shares: u128,
    total_shares: u128,
) -> Result<(u128, u128), AccountingError> {
    if shares == 0 {
        return Err(AccountingError::ZeroShares);
    }
    if shares > total_shares {
        return Err(AccountingError::InsufficientShares);
    }

    Ok((
        pro_rata(free0, shares, total_shares)?,
        pro_rata(free1, shares, total_shares)?,
    ))
}
