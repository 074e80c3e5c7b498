// Vault storage module
//
// Singletons live in instance storage; share balances in persistent storage.

use soroban_sdk::{contracttype, Address, Env};

use crate::error::VaultError;
use crate::types::{
    FeeAccruals, Market, PositionKind, Roles, VaultConfig, VaultPosition, VaultStatus,
};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Initialization flag
    Initialized,
    /// Versioned configuration
    Config,
    /// Governance, keeper and team addresses
    Roles,
    /// Pool, tokens and tick spacing
    Market,
    /// Last rebalance timestamp and finalized flag
    Status,
    /// Liquidity held per range
    Position(PositionKind),
    /// Unswept protocol fees
    Accruals,
    /// Outstanding shares
    TotalShares,
    /// Share balance by holder
    Balance(Address),
    /// Single-flight execution flag
    Locked,
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
/// TTL bump threshold
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

/// Keep instance storage (and the contract code) alive
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// INITIALIZATION
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

// ============================================================
// CONFIG, ROLES, MARKET, STATUS
// ============================================================

pub fn read_config(env: &Env) -> Result<VaultConfig, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_roles(env: &Env) -> Result<Roles, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Roles)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_roles(env: &Env, roles: &Roles) {
    env.storage().instance().set(&DataKey::Roles, roles);
}

pub fn read_market(env: &Env) -> Result<Market, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Market)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_market(env: &Env, market: &Market) {
    env.storage().instance().set(&DataKey::Market, market);
}

pub fn read_status(env: &Env) -> VaultStatus {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or_default()
}

pub fn write_status(env: &Env, status: &VaultStatus) {
    env.storage().instance().set(&DataKey::Status, status);
}

// ============================================================
// POSITION LEDGER
// ============================================================

pub fn read_position(env: &Env, kind: PositionKind) -> Result<VaultPosition, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Position(kind))
        .ok_or(VaultError::NotInitialized)
}

pub fn write_position(env: &Env, kind: PositionKind, position: &VaultPosition) {
    env.storage()
        .instance()
        .set(&DataKey::Position(kind), position);
}

// ============================================================
// FEE ACCRUALS
// ============================================================

pub fn read_accruals(env: &Env) -> FeeAccruals {
    env.storage()
        .instance()
        .get(&DataKey::Accruals)
        .unwrap_or_default()
}

pub fn write_accruals(env: &Env, accruals: &FeeAccruals) {
    env.storage().instance().set(&DataKey::Accruals, accruals);
}

// ============================================================
// SHARES
// ============================================================

pub fn read_total_shares(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalShares)
        .unwrap_or(0)
}

pub fn write_total_shares(env: &Env, total: u128) {
    env.storage().instance().set(&DataKey::TotalShares, &total);
}

pub fn read_balance(env: &Env, holder: &Address) -> u128 {
    let key = DataKey::Balance(holder.clone());
    match env.storage().persistent().get::<_, u128>(&key) {
        Some(balance) => {
            extend_ttl(env, &key);
            balance
        }
        None => 0,
    }
}

pub fn write_balance(env: &Env, holder: &Address, balance: u128) {
    let key = DataKey::Balance(holder.clone());
    env.storage().persistent().set(&key, &balance);
    extend_ttl(env, &key);
}

// ============================================================
// EXECUTION GUARD FLAG
// ============================================================

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage().instance().set(&DataKey::Locked, &locked);
}
