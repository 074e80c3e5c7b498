#![no_std]

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, U256};

// External packages
use belugavault_math::{get_amounts_for_liquidity, get_sqrt_ratio_at_tick, Rounding};
use belugavault_position::{
    quote_balance_withdraw, quote_deposit, quote_withdraw, split_fees, total_amounts, DepositQuote,
};
use belugavault_range::{base_range, select_limit_range};

// Local modules
mod config;
mod events;
mod ledger;
mod positions;
mod rebalance;
mod storage;
pub mod error;
pub mod guard;
pub mod pool;
pub mod types;

pub use error::{ErrorKind, VaultError};

use config::{update_config, validate_config};
use events::*;
use guard::{
    check_supply_cap, require_external, require_finalized, require_governance, require_keeper,
    require_not_finalized, require_positions_empty, require_team, ExecutionGuard,
};
use pool::PoolClient;
use ledger::{balance_of, burn_shares, mint_shares, total_shares, transfer_shares};
use positions::{
    accrue_fees, burn_and_collect, free_balances, harvest, mint_liquidity, pay_out, pool_client,
    pull_in, read_price, snapshot, to_i128, to_u128,
};
use storage::*;
use types::{
    DepositResult, FeeAccruals, Market, PositionKind, RebalanceResult, Roles, VaultConfig,
    VaultParams, VaultPosition, VaultStatus, WithdrawResult, WithdrawalBasis,
};

#[contract]
pub struct BelugaVault;

#[contractimpl]
impl BelugaVault {
    // ========================================================
    // INITIALIZATION
    // ========================================================

    /// Initialize the vault over `pool`
    ///
    /// # Arguments
    /// * `governance` - Address allowed to change configuration and roles
    /// * `pool` - Concentrated-liquidity pool the vault manages
    /// * `params` - Initial thresholds, TWAP guard, cooldown, caps and fees
    pub fn initialize(
        env: Env,
        governance: Address,
        pool: Address,
        params: VaultParams,
    ) -> Result<(), VaultError> {
        governance.require_auth();

        if is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }

        let client = PoolClient::new(&env, &pool);
        let tick_spacing = client.tick_spacing();
        if tick_spacing <= 0 {
            return Err(VaultError::InvalidTickSpacing);
        }

        let market = Market {
            pool: pool.clone(),
            token0: client.token0(),
            token1: client.token1(),
            tick_spacing,
        };

        let config = VaultConfig::from_params(params);
        validate_config(&config, tick_spacing)?;

        let (sqrt_price, tick) = read_price(&env, &market);
        let base = base_range(tick, tick_spacing, config.base_threshold)?;
        let (limit, _) = select_limit_range(sqrt_price, tick, tick_spacing, config.limit_threshold, 0, 0)?;

        write_market(&env, &market);
        write_config(&env, &config);
        write_roles(
            &env,
            &Roles {
                governance: governance.clone(),
                pending_governance: None,
                keeper: None,
                team: None,
            },
        );
        write_status(&env, &VaultStatus::default());
        write_position(&env, PositionKind::Base, &VaultPosition::new(base, 0));
        write_position(&env, PositionKind::Limit, &VaultPosition::new(limit, 0));
        set_initialized(&env);
        bump_instance(&env);

        log!(&env, "vault initialized", pool.clone(), tick);
        emit_initialized(&env, &governance, &pool, &base, &limit);
        Ok(())
    }

    // ========================================================
    // DEPOSIT / WITHDRAW
    // ========================================================

    /// Deposit up to `desired0`/`desired1` for shares credited to `recipient`
    pub fn deposit(
        env: Env,
        sender: Address,
        desired0: i128,
        desired1: i128,
        min0: i128,
        min1: i128,
        recipient: Address,
    ) -> Result<DepositResult, VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        sender.require_auth();
        require_not_finalized(&env)?;

        let desired0 = to_u128(desired0)?;
        let desired1 = to_u128(desired1)?;
        let min0 = to_u128(min0)?;
        let min1 = to_u128(min1)?;
        if desired0 == 0 && desired1 == 0 {
            return Err(VaultError::ZeroAmount);
        }
        require_external(&env, &recipient)?;

        let config = read_config(&env)?;
        let market = read_market(&env)?;

        if total_shares(&env) > 0 {
            harvest(&env, &market, &config)?;
        }

        let quote = price_deposit(&env, &market, &config, desired0, desired1)?;
        if quote.amount0 < min0 || quote.amount1 < min1 {
            log!(&env, "deposit: below minimum", quote.amount0, quote.amount1);
            return Err(VaultError::BelowMinimum);
        }

        let total_after = total_shares(&env)
            .checked_add(quote.shares)
            .and_then(|total| total.checked_add(quote.locked_shares))
            .ok_or(VaultError::Overflow)?;
        check_supply_cap(&config, total_after)?;

        pull_in(&env, &market, &sender, quote.amount0, quote.amount1)?;
        mint_within(&env, &market, PositionKind::Base, quote.base_liquidity, quote.base_cost)?;
        mint_within(&env, &market, PositionKind::Limit, quote.limit_liquidity, quote.limit_cost)?;

        if quote.locked_shares > 0 {
            mint_shares(&env, &env.current_contract_address(), quote.locked_shares)?;
        }
        mint_shares(&env, &recipient, quote.shares)?;
        bump_instance(&env);

        let amount0 = to_i128(quote.amount0)?;
        let amount1 = to_i128(quote.amount1)?;
        log!(&env, "deposit", quote.shares, amount0, amount1);
        emit_deposit(&env, &sender, &recipient, quote.shares, amount0, amount1);

        Ok(DepositResult {
            shares: quote.shares,
            amount0,
            amount1,
        })
    }

    /// Burn `shares` from `sender` and pay the released tokens to `recipient`
    pub fn withdraw(
        env: Env,
        sender: Address,
        shares: u128,
        min0: i128,
        min1: i128,
        recipient: Address,
    ) -> Result<WithdrawResult, VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        sender.require_auth();

        if shares == 0 {
            return Err(VaultError::ZeroShares);
        }
        let min0 = to_u128(min0)?;
        let min1 = to_u128(min1)?;
        require_external(&env, &sender)?;
        require_external(&env, &recipient)?;
        if shares > balance_of(&env, &sender) {
            return Err(VaultError::InsufficientShares);
        }

        let config = read_config(&env)?;
        let market = read_market(&env)?;

        harvest(&env, &market, &config)?;
        let total = total_shares(&env);

        let (amount0, amount1) = match config.withdrawal_basis {
            WithdrawalBasis::Position => {
                let (sqrt_price, _) = read_price(&env, &market);
                let quote = quote_withdraw(&snapshot(&env, &market, sqrt_price)?, shares)?;
                burn_shares(&env, &sender, shares)?;

                let base = burn_and_collect(&env, &market, PositionKind::Base, quote.base_liquidity)?;
                let limit = burn_and_collect(&env, &market, PositionKind::Limit, quote.limit_liquidity)?;
                accrue_fees(&env, &config, sum(&[base.fees0, limit.fees0])?, sum(&[base.fees1, limit.fees1])?)?;

                (
                    sum(&[quote.idle0, base.burned0, limit.burned0])?,
                    sum(&[quote.idle1, base.burned1, limit.burned1])?,
                )
            }
            WithdrawalBasis::Balance => {
                let (free0, free1) = free_balances(&env, &market)?;
                let amounts = quote_balance_withdraw(free0, free1, shares, total)?;
                burn_shares(&env, &sender, shares)?;
                amounts
            }
        };

        if amount0 < min0 || amount1 < min1 {
            log!(&env, "withdraw: below minimum", amount0, amount1);
            return Err(VaultError::BelowMinimum);
        }

        pay_out(&env, &market, &recipient, amount0, amount1)?;
        bump_instance(&env);

        let amount0 = to_i128(amount0)?;
        let amount1 = to_i128(amount1)?;
        log!(&env, "withdraw", shares, amount0, amount1);
        emit_withdraw(&env, &sender, &recipient, shares, amount0, amount1);

        Ok(WithdrawResult { amount0, amount1 })
    }

    // ========================================================
    // REBALANCE
    // ========================================================

    /// Withdraw everything, optionally swap, and redeploy into fresh base and limit ranges
    ///
    /// # Arguments
    /// * `caller` - Keeper, or any authorized address when no keeper is set
    /// * `swap_amount` - Exact input; positive sells token0, negative sells token1, 0 skips
    /// * `sqrt_price_limit_x96` - Price limit passed through to the swap
    pub fn rebalance(
        env: Env,
        caller: Address,
        swap_amount: i128,
        sqrt_price_limit_x96: U256,
    ) -> Result<RebalanceResult, VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        require_keeper(&env, &caller)?;
        require_not_finalized(&env)?;

        let config = read_config(&env)?;
        let market = read_market(&env)?;

        let result = rebalance::rebalance(&env, &market, &config, swap_amount, &sqrt_price_limit_x96)?;
        bump_instance(&env);
        Ok(result)
    }

    // ========================================================
    // FEE SWEEPS
    // ========================================================

    /// Pay the owner fee bucket to `to` (governance only)
    pub fn collect_owner_fees(env: Env, caller: Address, to: Address) -> Result<(u128, u128), VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        require_governance(&env, &caller)?;
        require_external(&env, &to)?;

        let market = read_market(&env)?;
        let mut accruals = read_accruals(&env);
        let (amount0, amount1) = (accruals.owner0, accruals.owner1);
        accruals.owner0 = 0;
        accruals.owner1 = 0;
        write_accruals(&env, &accruals);

        pay_out(&env, &market, &to, amount0, amount1)?;
        emit_fees_swept(&env, "owner", &to, amount0, amount1);
        Ok((amount0, amount1))
    }

    /// Pay the team fee bucket to `to` (team role only)
    pub fn collect_team_fees(env: Env, caller: Address, to: Address) -> Result<(u128, u128), VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        require_team(&env, &caller)?;
        require_external(&env, &to)?;

        let market = read_market(&env)?;
        let mut accruals = read_accruals(&env);
        let (amount0, amount1) = (accruals.team0, accruals.team1);
        accruals.team0 = 0;
        accruals.team1 = 0;
        write_accruals(&env, &accruals);

        pay_out(&env, &market, &to, amount0, amount1)?;
        emit_fees_swept(&env, "team", &to, amount0, amount1);
        Ok((amount0, amount1))
    }

    // ========================================================
    // CONFIGURATION (governance)
    // ========================================================

    pub fn set_base_threshold(env: Env, caller: Address, threshold: i32) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.base_threshold = threshold)?;
        Ok(())
    }

    pub fn set_limit_threshold(env: Env, caller: Address, threshold: i32) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.limit_threshold = threshold)?;
        Ok(())
    }

    pub fn set_max_twap_deviation(env: Env, caller: Address, deviation: u32) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.max_twap_deviation = deviation)?;
        Ok(())
    }

    pub fn set_twap_window(env: Env, caller: Address, window: u32) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.twap_window = window)?;
        Ok(())
    }

    pub fn set_rebalance_cooldown(env: Env, caller: Address, cooldown: u64) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.rebalance_cooldown = cooldown)?;
        Ok(())
    }

    /// 0 removes the cap
    pub fn set_max_total_supply(env: Env, caller: Address, max_total_supply: u128) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.max_total_supply = max_total_supply)?;
        Ok(())
    }

    /// Parts per 1_000_000 of collected fees
    pub fn set_protocol_fee(env: Env, caller: Address, protocol_fee: u32) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.protocol_fee = protocol_fee)?;
        Ok(())
    }

    pub fn set_idle_dust_threshold(env: Env, caller: Address, threshold: u128) -> Result<(), VaultError> {
        update_config(&env, &caller, |config| config.idle_dust_threshold = threshold)?;
        Ok(())
    }

    /// `Balance` is only available once the vault is finalized and both
    /// ranges have been emergency-burned
    pub fn set_withdrawal_basis(env: Env, caller: Address, basis: WithdrawalBasis) -> Result<(), VaultError> {
        if basis == WithdrawalBasis::Balance {
            require_finalized(&env)?;
            require_positions_empty(&env)?;
        }
        update_config(&env, &caller, |config| config.withdrawal_basis = basis)?;
        emit_withdrawal_basis(&env, basis);
        Ok(())
    }

    // ========================================================
    // ROLES
    // ========================================================

    /// `None` opens rebalancing to any authorized caller
    pub fn set_keeper(env: Env, caller: Address, keeper: Option<Address>) -> Result<(), VaultError> {
        let mut roles = require_governance(&env, &caller)?;
        roles.keeper = keeper;
        write_roles(&env, &roles);
        emit_role_updated(&env, "keeper", &roles.keeper);
        Ok(())
    }

    pub fn set_team(env: Env, caller: Address, team: Option<Address>) -> Result<(), VaultError> {
        let mut roles = require_governance(&env, &caller)?;
        roles.team = team;
        write_roles(&env, &roles);
        emit_role_updated(&env, "team", &roles.team);
        Ok(())
    }

    /// First half of the governance handoff
    pub fn set_pending_governance(env: Env, caller: Address, pending: Address) -> Result<(), VaultError> {
        let mut roles = require_governance(&env, &caller)?;
        roles.pending_governance = Some(pending.clone());
        write_roles(&env, &roles);
        emit_governance_proposed(&env, &pending);
        Ok(())
    }

    /// Second half: the pending address takes over
    pub fn accept_governance(env: Env, caller: Address) -> Result<(), VaultError> {
        caller.require_auth();
        let mut roles = read_roles(&env)?;

        match &roles.pending_governance {
            None => return Err(VaultError::NoPendingGovernance),
            Some(pending) if *pending != caller => {
                log!(&env, "guard: caller is not pending governance", caller.clone());
                return Err(VaultError::Unauthorized);
            }
            Some(_) => {}
        }

        roles.governance = caller.clone();
        roles.pending_governance = None;
        write_roles(&env, &roles);
        emit_governance_accepted(&env, &caller);
        Ok(())
    }

    // ========================================================
    // EMERGENCY
    // ========================================================

    /// Permanently stop deposits and rebalances. Withdrawals keep working.
    pub fn finalize(env: Env, caller: Address) -> Result<(), VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        require_governance(&env, &caller)?;
        require_not_finalized(&env)?;

        let mut status = read_status(&env);
        status.finalized = true;
        write_status(&env, &status);

        log!(&env, "vault finalized");
        emit_finalized(&env);
        Ok(())
    }

    /// Burn liquidity from one range into the vault's idle balances
    pub fn emergency_burn(
        env: Env,
        caller: Address,
        kind: PositionKind,
        liquidity: u128,
    ) -> Result<(u128, u128), VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        require_governance(&env, &caller)?;
        require_finalized(&env)?;

        let config = read_config(&env)?;
        let market = read_market(&env)?;

        let released = burn_and_collect(&env, &market, kind, liquidity)?;
        accrue_fees(&env, &config, released.fees0, released.fees1)?;

        log!(&env, "emergency burn", liquidity, released.burned0, released.burned1);
        emit_emergency_burn(&env, kind, liquidity, released.burned0, released.burned1);
        Ok((released.burned0, released.burned1))
    }

    /// Recover a token the vault does not manage
    pub fn sweep(env: Env, caller: Address, token: Address, amount: i128, to: Address) -> Result<(), VaultError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        require_governance(&env, &caller)?;

        let market = read_market(&env)?;
        if token == market.token0 || token == market.token1 {
            return Err(VaultError::InvalidToken);
        }
        if to_u128(amount)? == 0 {
            return Err(VaultError::ZeroAmount);
        }

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);
        emit_sweep(&env, &token, &to, amount);
        Ok(())
    }

    // ========================================================
    // SHARES
    // ========================================================

    pub fn transfer(env: Env, from: Address, to: Address, amount: u128) -> Result<(), VaultError> {
        from.require_auth();
        // Locked bootstrap shares never move
        if from == env.current_contract_address() {
            return Err(VaultError::InvalidRecipient);
        }
        transfer_shares(&env, &from, &to, amount)
    }

    pub fn balance(env: Env, holder: Address) -> u128 {
        balance_of(&env, &holder)
    }

    pub fn total_shares(env: Env) -> u128 {
        total_shares(&env)
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        read_config(&env)
    }

    pub fn get_roles(env: Env) -> Result<Roles, VaultError> {
        read_roles(&env)
    }

    pub fn get_status(env: Env) -> VaultStatus {
        read_status(&env)
    }

    pub fn get_market(env: Env) -> Result<Market, VaultError> {
        read_market(&env)
    }

    pub fn get_position(env: Env, kind: PositionKind) -> Result<VaultPosition, VaultError> {
        read_position(&env, kind)
    }

    /// Unswept owner and team fees
    pub fn get_accrued_fees(env: Env) -> FeeAccruals {
        read_accruals(&env)
    }

    /// Token amounts backing all shares, including uncollected fees net of the protocol cut
    pub fn get_total_amounts(env: Env) -> Result<(u128, u128), VaultError> {
        let market = read_market(&env)?;
        let config = read_config(&env)?;
        let (sqrt_price, _) = read_price(&env, &market);

        let holdings = snapshot(&env, &market, sqrt_price)?;
        let (mut total0, mut total1) = total_amounts(&holdings, Rounding::Down)?;

        let vault = env.current_contract_address();
        let client = pool_client(&env, &market);
        for position in [holdings.base, holdings.limit] {
            if !position.is_active() {
                continue;
            }
            let owed = client.position(&vault, &position.range.lower, &position.range.upper);
            total0 = sum(&[total0, split_fees(owed.tokens_owed_0, config.protocol_fee)?.depositors])?;
            total1 = sum(&[total1, split_fees(owed.tokens_owed_1, config.protocol_fee)?.depositors])?;
        }

        Ok((total0, total1))
    }

    /// Shares and cost of a deposit at the current state, before fee collection
    pub fn preview_deposit(env: Env, desired0: i128, desired1: i128) -> Result<DepositResult, VaultError> {
        let market = read_market(&env)?;
        let config = read_config(&env)?;

        let quote = price_deposit(&env, &market, &config, to_u128(desired0)?, to_u128(desired1)?)?;
        Ok(DepositResult {
            shares: quote.shares,
            amount0: to_i128(quote.amount0)?,
            amount1: to_i128(quote.amount1)?,
        })
    }

    /// Tokens released by burning `shares` at the current state, before fee collection
    pub fn preview_withdraw(env: Env, shares: u128) -> Result<WithdrawResult, VaultError> {
        let market = read_market(&env)?;
        let config = read_config(&env)?;
        let total = total_shares(&env);

        let (amount0, amount1) = match config.withdrawal_basis {
            WithdrawalBasis::Position => {
                let (sqrt_price, _) = read_price(&env, &market);
                let holdings = snapshot(&env, &market, sqrt_price)?;
                let quote = quote_withdraw(&holdings, shares)?;

                let base = liquidity_amounts(&holdings.base, sqrt_price, quote.base_liquidity)?;
                let limit = liquidity_amounts(&holdings.limit, sqrt_price, quote.limit_liquidity)?;
                (
                    sum(&[quote.idle0, base.0, limit.0])?,
                    sum(&[quote.idle1, base.1, limit.1])?,
                )
            }
            WithdrawalBasis::Balance => {
                let (free0, free1) = free_balances(&env, &market)?;
                quote_balance_withdraw(free0, free1, shares, total)?
            }
        };

        Ok(WithdrawResult {
            amount0: to_i128(amount0)?,
            amount1: to_i128(amount1)?,
        })
    }
}

// ============================================================
// INTERNAL HELPERS
// ============================================================

fn sum(amounts: &[u128]) -> Result<u128, VaultError> {
    amounts
        .iter()
        .try_fold(0u128, |total, amount| total.checked_add(*amount))
        .ok_or(VaultError::Overflow)
}

fn price_deposit(
    env: &Env,
    market: &Market,
    config: &VaultConfig,
    desired0: u128,
    desired1: u128,
) -> Result<DepositQuote, VaultError> {
    let (sqrt_price, _) = read_price(env, market);
    let holdings = snapshot(env, market, sqrt_price)?;
    Ok(quote_deposit(&holdings, desired0, desired1, config.idle_dust_threshold)?)
}

/// Mint and check the pool charged no more than the quoted cost
fn mint_within(
    env: &Env,
    market: &Market,
    kind: PositionKind,
    liquidity: u128,
    cost: (u128, u128),
) -> Result<(), VaultError> {
    let (owed0, owed1) = mint_liquidity(env, market, kind, liquidity)?;
    if owed0 > cost.0 || owed1 > cost.1 {
        log!(env, "deposit: pool charged above quote", owed0, owed1);
        return Err(VaultError::AboveMaximum);
    }
    Ok(())
}

/// Amounts released by burning `liquidity` from `position`, rounded down
fn liquidity_amounts(
    position: &VaultPosition,
    sqrt_price: belugavault_math::U256,
    liquidity: u128,
) -> Result<(u128, u128), VaultError> {
    if liquidity == 0 {
        return Ok((0, 0));
    }
    let sqrt_lower = get_sqrt_ratio_at_tick(position.range.lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(position.range.upper)?;
    Ok(get_amounts_for_liquidity(
        sqrt_price,
        sqrt_lower,
        sqrt_upper,
        liquidity,
        Rounding::Down,
    )?)
}
