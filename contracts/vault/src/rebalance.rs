// Rebalance pipeline
//
// Validating -> Withdrawing -> Swapping -> Selecting -> Depositing.
// Any failure aborts the whole invocation, so a rejected rebalance leaves
// positions, balances and the cooldown clock untouched.

use belugavault_position::deployable_liquidity;
use belugavault_range::{
    base_range, check_price_bounds, check_twap_deviation, select_limit_range, twap_from_cumulatives,
};
use soroban_sdk::{log, vec, Env, U256 as HostU256};

use crate::error::VaultError;
use crate::events::emit_rebalance;
use crate::positions::{
    accrue_fees, burn_and_collect, free_balances, mint_liquidity, pay_out, pool_client, read_price,
    to_u128,
};
use crate::storage::{read_position, read_status, write_position, write_status};
use crate::types::{Market, PositionKind, RebalanceResult, VaultConfig, VaultPosition};

// ============================================================
// VALIDATING
// ============================================================

/// Time-weighted average tick over the configured window
pub fn observe_twap(env: &Env, market: &Market, window: u32) -> Result<i32, VaultError> {
    let cumulatives = pool_client(env, market).observe(&vec![env, window, 0u32]);

    let (Some(old), Some(new)) = (cumulatives.get(0), cumulatives.get(1)) else {
        log!(env, "rebalance: pool returned too few observations", cumulatives.len());
        return Err(VaultError::TwapDeviationExceeded);
    };
    Ok(twap_from_cumulatives(old, new, window)?)
}

fn validate(env: &Env, market: &Market, config: &VaultConfig, now: u64) -> Result<(), VaultError> {
    let status = read_status(env);
    if now < status.last_rebalance.saturating_add(config.rebalance_cooldown) {
        log!(env, "rebalance: cooldown active", status.last_rebalance, now);
        return Err(VaultError::CooldownActive);
    }

    let (_, tick) = read_price(env, market);
    let widest = config.base_threshold.max(config.limit_threshold);
    check_price_bounds(tick, widest, market.tick_spacing)?;

    let twap = observe_twap(env, market, config.twap_window)?;
    if let Err(err) = check_twap_deviation(tick, twap, config.max_twap_deviation) {
        log!(env, "rebalance: price deviates from twap", tick, twap);
        return Err(err.into());
    }
    Ok(())
}

// ============================================================
// SWAPPING
// ============================================================

/// Positive `swap_amount` sells token0, negative sells token1
fn swap(
    env: &Env,
    market: &Market,
    swap_amount: i128,
    sqrt_price_limit_x96: &HostU256,
) -> Result<(), VaultError> {
    let zero_for_one = swap_amount > 0;
    let amount_specified = swap_amount.checked_abs().ok_or(VaultError::Overflow)?;

    let vault = env.current_contract_address();
    let client = pool_client(env, market);
    let (delta0, delta1) = client.swap(&vault, &zero_for_one, &amount_specified, sqrt_price_limit_x96);

    let owed0 = to_u128(delta0.max(0))?;
    let owed1 = to_u128(delta1.max(0))?;

    // Protocol accruals are never spent on a swap
    let (free0, free1) = free_balances(env, market)?;
    if owed0 > free0 || owed1 > free1 {
        log!(env, "rebalance: swap exceeds free balances", owed0, owed1);
        return Err(VaultError::AboveMaximum);
    }

    pay_out(env, market, &market.pool, owed0, owed1)?;
    client.settle(&vault);

    log!(env, "rebalance: swapped", delta0, delta1);
    Ok(())
}

// ============================================================
// PIPELINE
// ============================================================

/// Run a full rebalance. Caller holds the execution guard and has
/// checked the keeper role and the finalized flag.
pub fn rebalance(
    env: &Env,
    market: &Market,
    config: &VaultConfig,
    swap_amount: i128,
    sqrt_price_limit_x96: &HostU256,
) -> Result<RebalanceResult, VaultError> {
    let now = env.ledger().timestamp();

    validate(env, market, config, now)?;
    log!(env, "rebalance: validated");

    // Withdrawing
    let old_base = read_position(env, PositionKind::Base)?;
    let old_limit = read_position(env, PositionKind::Limit)?;
    let base_out = burn_and_collect(env, market, PositionKind::Base, old_base.liquidity)?;
    let limit_out = burn_and_collect(env, market, PositionKind::Limit, old_limit.liquidity)?;

    let fees0 = base_out.fees0.checked_add(limit_out.fees0).ok_or(VaultError::Overflow)?;
    let fees1 = base_out.fees1.checked_add(limit_out.fees1).ok_or(VaultError::Overflow)?;
    accrue_fees(env, config, fees0, fees1)?;
    log!(env, "rebalance: withdrawn", fees0, fees1);

    if swap_amount != 0 {
        swap(env, market, swap_amount, sqrt_price_limit_x96)?;
    }

    // Selecting
    let (sqrt_price, tick) = read_price(env, market);
    let (free0, free1) = free_balances(env, market)?;

    let base = base_range(tick, market.tick_spacing, config.base_threshold)?;
    let (base_liquidity, base_cost) = deployable_liquidity(sqrt_price, &base, free0, free1)?;

    let rest0 = free0.checked_sub(base_cost.0).ok_or(VaultError::Overflow)?;
    let rest1 = free1.checked_sub(base_cost.1).ok_or(VaultError::Overflow)?;
    let (limit, limit_side) =
        select_limit_range(sqrt_price, tick, market.tick_spacing, config.limit_threshold, rest0, rest1)?;
    let (limit_liquidity, _) = deployable_liquidity(sqrt_price, &limit, rest0, rest1)?;

    if base == limit {
        return Err(VaultError::DuplicateRanges);
    }
    log!(env, "rebalance: selected", tick, base_liquidity, limit_liquidity);

    // Depositing
    write_position(env, PositionKind::Base, &VaultPosition::new(base, 0));
    write_position(env, PositionKind::Limit, &VaultPosition::new(limit, 0));
    mint_liquidity(env, market, PositionKind::Base, base_liquidity)?;
    mint_liquidity(env, market, PositionKind::Limit, limit_liquidity)?;

    let mut status = read_status(env);
    status.last_rebalance = now;
    write_status(env, &status);

    emit_rebalance(env, tick, &base, base_liquidity, &limit, limit_liquidity);

    Ok(RebalanceResult {
        base: VaultPosition::new(base, base_liquidity),
        limit: VaultPosition::new(limit, limit_liquidity),
        limit_side,
        fees0,
        fees1,
    })
}
