// Vault events module
// All events use compact names to reduce storage costs

use belugavault_position::FeeSplit;
use soroban_sdk::{Address, Env, Symbol};

use crate::types::{PositionKind, TickRange, WithdrawalBasis};

/// Topics: ("VaultInit",)
/// Data: (governance, pool, base_range, limit_range)
pub fn emit_initialized(
    env: &Env,
    governance: &Address,
    pool: &Address,
    base: &TickRange,
    limit: &TickRange,
) {
    env.events().publish(
        (Symbol::new(env, "VaultInit"),),
        (governance.clone(), pool.clone(), *base, *limit),
    );
}

/// Topics: ("Deposit", sender)
/// Data: (recipient, shares, amount0, amount1)
pub fn emit_deposit(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    shares: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Deposit"), sender.clone()),
        (recipient.clone(), shares, amount0, amount1),
    );
}

/// Topics: ("Withdraw", sender)
/// Data: (recipient, shares, amount0, amount1)
pub fn emit_withdraw(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    shares: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Withdraw"), sender.clone()),
        (recipient.clone(), shares, amount0, amount1),
    );
}

/// Topics: ("Rebalance",)
/// Data: (tick, base_range, base_liquidity, limit_range, limit_liquidity)
pub fn emit_rebalance(
    env: &Env,
    tick: i32,
    base: &TickRange,
    base_liquidity: u128,
    limit: &TickRange,
    limit_liquidity: u128,
) {
    env.events().publish(
        (Symbol::new(env, "Rebalance"),),
        (tick, *base, base_liquidity, *limit, limit_liquidity),
    );
}

/// Topics: ("FeesSplit",)
/// Data: (token0 split, token1 split) as (depositors, owner, team)
pub fn emit_fees_split(env: &Env, split0: &FeeSplit, split1: &FeeSplit) {
    env.events().publish(
        (Symbol::new(env, "FeesSplit"),),
        (
            (split0.depositors, split0.owner, split0.team),
            (split1.depositors, split1.owner, split1.team),
        ),
    );
}

/// Topics: ("FeesSwept", bucket)
/// Data: (to, amount0, amount1)
pub fn emit_fees_swept(env: &Env, bucket: &str, to: &Address, amount0: u128, amount1: u128) {
    env.events().publish(
        (Symbol::new(env, "FeesSwept"), Symbol::new(env, bucket)),
        (to.clone(), amount0, amount1),
    );
}

/// Topics: ("ConfigUpdated",)
/// Data: version
pub fn emit_config_updated(env: &Env, version: u32) {
    env.events()
        .publish((Symbol::new(env, "ConfigUpdated"),), version);
}

/// Topics: ("BasisChanged",)
/// Data: basis
pub fn emit_withdrawal_basis(env: &Env, basis: WithdrawalBasis) {
    env.events()
        .publish((Symbol::new(env, "BasisChanged"),), basis);
}

/// Topics: ("GovProposed",)
/// Data: pending governance
pub fn emit_governance_proposed(env: &Env, pending: &Address) {
    env.events()
        .publish((Symbol::new(env, "GovProposed"),), pending.clone());
}

/// Topics: ("GovAccepted",)
/// Data: new governance
pub fn emit_governance_accepted(env: &Env, governance: &Address) {
    env.events()
        .publish((Symbol::new(env, "GovAccepted"),), governance.clone());
}

/// Topics: ("RoleUpdated", role)
/// Data: optional address
pub fn emit_role_updated(env: &Env, role: &str, address: &Option<Address>) {
    env.events().publish(
        (Symbol::new(env, "RoleUpdated"), Symbol::new(env, role)),
        address.clone(),
    );
}

/// Topics: ("Finalized",)
/// Data: timestamp
pub fn emit_finalized(env: &Env) {
    env.events().publish(
        (Symbol::new(env, "Finalized"),),
        env.ledger().timestamp(),
    );
}

/// Topics: ("EmergencyBurn", kind)
/// Data: (liquidity, amount0, amount1)
pub fn emit_emergency_burn(env: &Env, kind: PositionKind, liquidity: u128, amount0: u128, amount1: u128) {
    env.events().publish(
        (Symbol::new(env, "EmergencyBurn"), kind),
        (liquidity, amount0, amount1),
    );
}

/// Topics: ("Sweep", token)
/// Data: (to, amount)
pub fn emit_sweep(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Sweep"), token.clone()),
        (to.clone(), amount),
    );
}

/// Topics: ("transfer", from, to)
/// Data: amount
pub fn emit_transfer(env: &Env, from: &Address, to: &Address, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "transfer"), from.clone(), to.clone()),
        amount,
    );
}
