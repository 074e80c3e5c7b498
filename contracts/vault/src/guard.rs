// Guard rails shared by every state-mutating entry point

use soroban_sdk::{log, Address, Env};

use crate::error::VaultError;
use crate::storage::{is_locked, read_position, read_roles, read_status, set_locked};
use crate::types::{PositionKind, Roles, VaultConfig};

/// Single-flight execution guard.
///
/// Held for the whole operation, including both phases of every AMM
/// settlement. Released on drop.
pub struct ExecutionGuard<'a> {
    env: &'a Env,
}

impl<'a> ExecutionGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, VaultError> {
        if is_locked(env) {
            log!(env, "guard: operation already in progress");
            return Err(VaultError::Reentrant);
        }
        set_locked(env, true);
        Ok(Self { env })
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        set_locked(self.env, false);
    }
}

/// Authenticate `caller` as governance
pub fn require_governance(env: &Env, caller: &Address) -> Result<Roles, VaultError> {
    caller.require_auth();
    let roles = read_roles(env)?;
    if *caller != roles.governance {
        log!(env, "guard: caller is not governance", caller.clone());
        return Err(VaultError::Unauthorized);
    }
    Ok(roles)
}

/// Keeper only, or anyone authenticated when no keeper is set
pub fn require_keeper(env: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    let roles = read_roles(env)?;
    match roles.keeper {
        Some(keeper) if keeper != *caller => {
            log!(env, "guard: caller is not the keeper", caller.clone());
            Err(VaultError::Unauthorized)
        }
        _ => Ok(()),
    }
}

/// Authenticate `caller` as the team role
pub fn require_team(env: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    let roles = read_roles(env)?;
    match roles.team {
        Some(team) if team == *caller => Ok(()),
        _ => {
            log!(env, "guard: caller is not the team", caller.clone());
            Err(VaultError::Unauthorized)
        }
    }
}

/// New liquidity may only be minted before finalization
pub fn require_not_finalized(env: &Env) -> Result<(), VaultError> {
    if read_status(env).finalized {
        log!(env, "guard: vault finalized");
        return Err(VaultError::Finalized);
    }
    Ok(())
}

pub fn require_finalized(env: &Env) -> Result<(), VaultError> {
    if !read_status(env).finalized {
        return Err(VaultError::NotFinalized);
    }
    Ok(())
}

/// Both ranges fully burned into the vault
pub fn require_positions_empty(env: &Env) -> Result<(), VaultError> {
    for kind in [PositionKind::Base, PositionKind::Limit] {
        if read_position(env, kind)?.is_active() {
            log!(env, "guard: range still holds liquidity", kind);
            return Err(VaultError::PositionsActive);
        }
    }
    Ok(())
}

/// Supply cap check, 0 = unbounded
pub fn check_supply_cap(config: &VaultConfig, total_after: u128) -> Result<(), VaultError> {
    if config.max_total_supply != 0 && total_after > config.max_total_supply {
        return Err(VaultError::SupplyCapExceeded);
    }
    Ok(())
}

/// Shares and tokens never leave or reach the vault's own account
pub fn require_external(env: &Env, recipient: &Address) -> Result<(), VaultError> {
    if *recipient == env.current_contract_address() {
        return Err(VaultError::InvalidRecipient);
    }
    Ok(())
}
