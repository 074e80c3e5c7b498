// Vault Types

use soroban_sdk::{contracttype, Address};

pub use belugavault_position::{PositionKind, VaultPosition};
pub use belugavault_range::{LimitSide, TickRange};

// ============================================================
// CONFIGURATION
// ============================================================

/// Which holdings a withdrawal is measured against
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WithdrawalBasis {
    /// Pro-rata slice of each AMM range plus idle balances
    Position,
    /// Pro-rata slice of the free token balances only
    Balance,
}

/// Initial settings, bundled into a struct to stay within the parameter limit
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultParams {
    /// Base order half-width in ticks
    pub base_threshold: i32,
    /// Limit order width in ticks
    pub limit_threshold: i32,
    /// Max |tick - twap| accepted by rebalance
    pub max_twap_deviation: u32,
    /// TWAP window in seconds
    pub twap_window: u32,
    /// Minimum seconds between rebalances
    pub rebalance_cooldown: u64,
    /// Share supply cap, 0 = unbounded
    pub max_total_supply: u128,
    /// Protocol cut of fees, parts per 1_000_000
    pub protocol_fee: u32,
    /// Idle contributions below this are skipped on deposit
    pub idle_dust_threshold: u128,
}

/// Versioned configuration, read once at the start of every operation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub version: u32,
    pub base_threshold: i32,
    pub limit_threshold: i32,
    pub max_twap_deviation: u32,
    pub twap_window: u32,
    pub rebalance_cooldown: u64,
    pub max_total_supply: u128,
    pub protocol_fee: u32,
    pub idle_dust_threshold: u128,
    pub withdrawal_basis: WithdrawalBasis,
}

impl VaultConfig {
    pub fn from_params(params: VaultParams) -> Self {
        Self {
            version: 1,
            base_threshold: params.base_threshold,
            limit_threshold: params.limit_threshold,
            max_twap_deviation: params.max_twap_deviation,
            twap_window: params.twap_window,
            rebalance_cooldown: params.rebalance_cooldown,
            max_total_supply: params.max_total_supply,
            protocol_fee: params.protocol_fee,
            idle_dust_threshold: params.idle_dust_threshold,
            withdrawal_basis: WithdrawalBasis::Position,
        }
    }
}

// ============================================================
// ROLES & MARKET
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roles {
    pub governance: Address,
    pub pending_governance: Option<Address>,
    pub keeper: Option<Address>,
    pub team: Option<Address>,
}

/// Immutable pool facts captured at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Market {
    pub pool: Address,
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: i32,
}

// ============================================================
// STATE
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultStatus {
    pub last_rebalance: u64,
    pub finalized: bool,
}

/// Protocol fees collected but not yet swept
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeeAccruals {
    pub owner0: u128,
    pub owner1: u128,
    pub team0: u128,
    pub team1: u128,
}

// ============================================================
// RESULTS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositResult {
    pub shares: u128,
    pub amount0: i128,
    pub amount1: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawResult {
    pub amount0: i128,
    pub amount1: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RebalanceResult {
    pub base: VaultPosition,
    pub limit: VaultPosition,
    pub limit_side: LimitSide,
    /// Fees earned by the old positions, before the protocol cut
    pub fees0: u128,
    pub fees1: u128,
}
