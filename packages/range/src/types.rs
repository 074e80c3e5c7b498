// Range Types

use soroban_sdk::contracttype;

/// Tick-aligned liquidity range `[lower, upper)`
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    pub fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }
}

/// Side of the single-sided limit order relative to the current price
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LimitSide {
    /// Below the price, holds token1
    Bid,
    /// Above the price, holds token0
    Ask,
}
