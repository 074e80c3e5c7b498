// Position ledger and AMM orchestration
//
// Every liquidity change goes through here so the stored per-range
// liquidity always mirrors what the vault holds on the pool.

use belugavault_math::{from_host_u256, U256};
use belugavault_position::{fee_from_collect, split_fees, FeeSplit, Holdings};
use belugavault_range::validate_range;
use soroban_sdk::{log, token, Address, Env};

use crate::error::VaultError;
use crate::events::emit_fees_split;
use crate::pool::PoolClient;
use crate::storage::{read_accruals, read_position, read_total_shares, write_accruals, write_position};
use crate::types::{Market, PositionKind, VaultConfig};

/// Tokens released from one range
#[derive(Clone, Copy, Debug, Default)]
pub struct Released {
    pub burned0: u128,
    pub burned1: u128,
    pub fees0: u128,
    pub fees1: u128,
}

// ============================================================
// CONVERSIONS
// ============================================================

pub fn to_i128(amount: u128) -> Result<i128, VaultError> {
    i128::try_from(amount).map_err(|_| VaultError::Overflow)
}

pub fn to_u128(amount: i128) -> Result<u128, VaultError> {
    u128::try_from(amount).map_err(|_| VaultError::NegativeAmount)
}

// ============================================================
// BALANCES & PRICE
// ============================================================

pub fn pool_client<'a>(env: &'a Env, market: &Market) -> PoolClient<'a> {
    PoolClient::new(env, &market.pool)
}

fn token_balance(env: &Env, token: &Address) -> Result<u128, VaultError> {
    let balance = token::Client::new(env, token).balance(&env.current_contract_address());
    to_u128(balance)
}

/// Vault token balances minus unswept protocol and team fees
pub fn free_balances(env: &Env, market: &Market) -> Result<(u128, u128), VaultError> {
    let accruals = read_accruals(env);
    let balance0 = token_balance(env, &market.token0)?;
    let balance1 = token_balance(env, &market.token1)?;

    let reserved0 = accruals.owner0.checked_add(accruals.team0).ok_or(VaultError::Overflow)?;
    let reserved1 = accruals.owner1.checked_add(accruals.team1).ok_or(VaultError::Overflow)?;

    let free0 = balance0.checked_sub(reserved0).ok_or(VaultError::Overflow)?;
    let free1 = balance1.checked_sub(reserved1).ok_or(VaultError::Overflow)?;
    Ok((free0, free1))
}

/// Current sqrt price and tick
pub fn read_price(env: &Env, market: &Market) -> (U256, i32) {
    let slot0 = pool_client(env, market).slot0();
    (from_host_u256(&slot0.sqrt_price_x96), slot0.tick)
}

/// Snapshot of everything backing the outstanding shares
pub fn snapshot(env: &Env, market: &Market, sqrt_price_x96: U256) -> Result<Holdings, VaultError> {
    let (idle0, idle1) = free_balances(env, market)?;
    Ok(Holdings {
        sqrt_price_x96,
        total_shares: read_total_shares(env),
        base: read_position(env, PositionKind::Base)?,
        limit: read_position(env, PositionKind::Limit)?,
        idle0,
        idle1,
    })
}

// ============================================================
// TOKEN MOVEMENT
// ============================================================

pub fn pay_out(env: &Env, market: &Market, to: &Address, amount0: u128, amount1: u128) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    if amount0 > 0 {
        token::Client::new(env, &market.token0).transfer(&vault, to, &to_i128(amount0)?);
    }
    if amount1 > 0 {
        token::Client::new(env, &market.token1).transfer(&vault, to, &to_i128(amount1)?);
    }
    Ok(())
}

pub fn pull_in(env: &Env, market: &Market, from: &Address, amount0: u128, amount1: u128) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    if amount0 > 0 {
        token::Client::new(env, &market.token0).transfer(from, &vault, &to_i128(amount0)?);
    }
    if amount1 > 0 {
        token::Client::new(env, &market.token1).transfer(from, &vault, &to_i128(amount1)?);
    }
    Ok(())
}

// ============================================================
// FEES
// ============================================================

/// Skim the protocol cut of freshly collected fees into the accrual buckets
pub fn accrue_fees(
    env: &Env,
    config: &VaultConfig,
    fees0: u128,
    fees1: u128,
) -> Result<(FeeSplit, FeeSplit), VaultError> {
    let split0 = split_fees(fees0, config.protocol_fee)?;
    let split1 = split_fees(fees1, config.protocol_fee)?;

    if split0.protocol() > 0 || split1.protocol() > 0 {
        let mut accruals = read_accruals(env);
        accruals.owner0 = accruals.owner0.checked_add(split0.owner).ok_or(VaultError::Overflow)?;
        accruals.team0 = accruals.team0.checked_add(split0.team).ok_or(VaultError::Overflow)?;
        accruals.owner1 = accruals.owner1.checked_add(split1.owner).ok_or(VaultError::Overflow)?;
        accruals.team1 = accruals.team1.checked_add(split1.team).ok_or(VaultError::Overflow)?;
        write_accruals(env, &accruals);
    }

    if fees0 > 0 || fees1 > 0 {
        log!(env, "fees split", fees0, fees1);
        emit_fees_split(env, &split0, &split1);
    }

    Ok((split0, split1))
}

// ============================================================
// LIQUIDITY
// ============================================================

/// Add liquidity to a range and settle the owed tokens
pub fn mint_liquidity(
    env: &Env,
    market: &Market,
    kind: PositionKind,
    liquidity: u128,
) -> Result<(u128, u128), VaultError> {
    let mut position = read_position(env, kind)?;
    if liquidity == 0 {
        return Ok((0, 0));
    }
    validate_range(&position.range, market.tick_spacing)?;

    let vault = env.current_contract_address();
    let client = pool_client(env, market);

    let (owed0, owed1) = client.mint(&vault, &position.range.lower, &position.range.upper, &liquidity);
    pay_out(env, market, &market.pool, owed0, owed1)?;
    client.settle(&vault);

    position.liquidity = position
        .liquidity
        .checked_add(liquidity)
        .ok_or(VaultError::Overflow)?;
    write_position(env, kind, &position);

    log!(env, "liquidity minted", liquidity, owed0, owed1);
    Ok((owed0, owed1))
}

/// Burn `liquidity` from a range and collect everything owed to the vault.
///
/// Anything collected beyond the burned principal is fee income.
/// Zero liquidity only collects fees.
pub fn burn_and_collect(
    env: &Env,
    market: &Market,
    kind: PositionKind,
    liquidity: u128,
) -> Result<Released, VaultError> {
    let mut position = read_position(env, kind)?;
    if !position.is_active() {
        return Ok(Released::default());
    }
    if liquidity > position.liquidity {
        return Err(VaultError::AboveMaximum);
    }

    let vault = env.current_contract_address();
    let client = pool_client(env, market);
    let (lower, upper) = (position.range.lower, position.range.upper);

    let (burned0, burned1) = client.burn(&vault, &lower, &upper, &liquidity);
    let (collected0, collected1) =
        client.collect(&vault, &vault, &lower, &upper, &u128::MAX, &u128::MAX);

    if liquidity > 0 {
        position.liquidity -= liquidity;
        write_position(env, kind, &position);
    }

    Ok(Released {
        burned0,
        burned1,
        fees0: fee_from_collect(collected0, burned0)?,
        fees1: fee_from_collect(collected1, burned1)?,
    })
}

/// Collect pending fees from both ranges and skim the protocol cut
pub fn harvest(env: &Env, market: &Market, config: &VaultConfig) -> Result<(u128, u128), VaultError> {
    let base = burn_and_collect(env, market, PositionKind::Base, 0)?;
    let limit = burn_and_collect(env, market, PositionKind::Limit, 0)?;

    let fees0 = base.fees0.checked_add(limit.fees0).ok_or(VaultError::Overflow)?;
    let fees1 = base.fees1.checked_add(limit.fees1).ok_or(VaultError::Overflow)?;
    accrue_fees(env, config, fees0, fees1)?;

    Ok((fees0, fees1))
}
