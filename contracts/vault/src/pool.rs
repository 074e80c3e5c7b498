// AMM collaborator interface
//
// Token settlement is two-phase: `mint` and `swap` record what the vault
// owes, the vault transfers those tokens itself, then calls `settle` so the
// pool can verify payment. The execution guard stays held across both phases.

use soroban_sdk::{contractclient, contracttype, Address, Env, Vec, U256};

/// Current pool price
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// Pool-side view of one owner's range
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolPosition {
    pub liquidity: u128,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

#[contractclient(name = "PoolClient")]
pub trait ConcentratedPool {
    fn token0(env: Env) -> Address;

    fn token1(env: Env) -> Address;

    fn tick_spacing(env: Env) -> i32;

    fn slot0(env: Env) -> Slot0;

    /// Tick cumulatives at each `seconds_ago`
    fn observe(env: Env, seconds_agos: Vec<u32>) -> Vec<i64>;

    fn position(env: Env, owner: Address, lower: i32, upper: i32) -> PoolPosition;

    /// Phase one of a liquidity increase; returns the amounts owed
    fn mint(env: Env, owner: Address, lower: i32, upper: i32, liquidity: u128) -> (u128, u128);

    /// Phase two: verify the owed tokens arrived
    fn settle(env: Env, owner: Address);

    /// Remove liquidity; the principal becomes collectable. Zero liquidity pokes fees.
    fn burn(env: Env, owner: Address, lower: i32, upper: i32, liquidity: u128) -> (u128, u128);

    fn collect(
        env: Env,
        owner: Address,
        recipient: Address,
        lower: i32,
        upper: i32,
        amount0_max: u128,
        amount1_max: u128,
    ) -> (u128, u128);

    /// Exact-input when `amount_specified > 0`. Positive deltas are owed to
    /// the pool and settled two-phase; negative deltas are paid out.
    fn swap(
        env: Env,
        owner: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
    ) -> (i128, i128);
}
