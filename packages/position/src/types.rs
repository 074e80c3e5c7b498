use belugavault_math::U256;
use belugavault_range::TickRange;
use soroban_sdk::contracttype;

/// Which of the two vault ranges a position belongs to
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionKind {
    Base,
    Limit,
}

/// Liquidity the vault holds on the AMM for one range
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VaultPosition {
    pub range: TickRange,
    pub liquidity: u128,
}

impl VaultPosition {
    pub fn new(range: TickRange, liquidity: u128) -> Self {
        Self { range, liquidity }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.liquidity > 0
    }
}

/// Snapshot of everything backing the outstanding shares.
///
/// `idle0`/`idle1` already exclude protocol and team fee accruals.
#[derive(Clone, Copy, Debug)]
pub struct Holdings {
    pub sqrt_price_x96: U256,
    pub total_shares: u128,
    pub base: VaultPosition,
    pub limit: VaultPosition,
    pub idle0: u128,
    pub idle1: u128,
}

/// Result of pricing a deposit
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DepositQuote {
    /// Shares credited to the recipient
    pub shares: u128,
    /// Shares minted to the vault itself (bootstrap only)
    pub locked_shares: u128,
    pub base_liquidity: u128,
    pub limit_liquidity: u128,
    /// Token cost of the new base liquidity, rounded up
    pub base_cost: (u128, u128),
    /// Token cost of the new limit liquidity, rounded up
    pub limit_cost: (u128, u128),
    /// Contribution to idle balances
    pub idle0: u128,
    pub idle1: u128,
    /// Total pulled from the depositor
    pub amount0: u128,
    pub amount1: u128,
}

/// Result of pricing a position-basis withdrawal
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WithdrawQuote {
    pub base_liquidity: u128,
    pub limit_liquidity: u128,
    pub idle0: u128,
    pub idle1: u128,
}
