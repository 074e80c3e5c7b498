#![allow(dead_code)]

use belugavault_math::{
    from_host_u256, get_amounts_for_liquidity, get_sqrt_ratio_at_tick, mul_div, q96, to_host_u256,
    to_u128, Rounding, U256,
};
use belugavault_vault::pool::{PoolPosition, Slot0};
use belugavault_vault::types::VaultParams;
use belugavault_vault::{BelugaVault, BelugaVaultClient};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, Env, Vec, U256 as HostU256,
};

// Test constants
pub const TICK_SPACING: i32 = 60;
pub const BASE_THRESHOLD: i32 = 600;
pub const LIMIT_THRESHOLD: i32 = 600;
pub const MAX_TWAP_DEVIATION: u32 = 100;
pub const TWAP_WINDOW: u32 = 600;
pub const REBALANCE_COOLDOWN: u64 = 3_600;
pub const PROTOCOL_FEE: u32 = 100_000; // 10%
pub const START_TIME: u64 = 1_700_000_000;

// Bootstrap of 1_000_000 / 1_000_000 at tick 0 into [-600, 660]
pub const BOOTSTRAP_LIQUIDITY: u128 = 30_807_233;
pub const BOOTSTRAP_COST0: i128 = 999_998;
pub const BOOTSTRAP_COST1: i128 = 910_447;

// ============================================================
// MOCK POOL
// ============================================================

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Token0,
    Token1,
    Spacing,
    Slot0,
    TwapTick,
    Reserves,
    Debt(Address),
    Position(Address, i32, i32),
}

/// Constant-price pool with two-phase settlement.
///
/// `Reserves` tracks the tokens the pool has accounted for; `settle` checks
/// the real token balance covers reserves plus the owner's debt.
#[contract]
pub struct MockPool;

fn read_reserves(env: &Env) -> (u128, u128) {
    env.storage().instance().get(&MockKey::Reserves).unwrap_or((0, 0))
}

fn write_reserves(env: &Env, reserves: (u128, u128)) {
    env.storage().instance().set(&MockKey::Reserves, &reserves);
}

fn sqrt_price(env: &Env) -> U256 {
    let slot0: Slot0 = env.storage().instance().get(&MockKey::Slot0).unwrap();
    from_host_u256(&slot0.sqrt_price_x96)
}

fn read_pos(env: &Env, owner: &Address, lower: i32, upper: i32) -> PoolPosition {
    env.storage()
        .instance()
        .get(&MockKey::Position(owner.clone(), lower, upper))
        .unwrap_or_default()
}

fn write_pos(env: &Env, owner: &Address, lower: i32, upper: i32, position: &PoolPosition) {
    env.storage()
        .instance()
        .set(&MockKey::Position(owner.clone(), lower, upper), position);
}

fn amounts(env: &Env, lower: i32, upper: i32, liquidity: u128, rounding: Rounding) -> (u128, u128) {
    get_amounts_for_liquidity(
        sqrt_price(env),
        get_sqrt_ratio_at_tick(lower).unwrap(),
        get_sqrt_ratio_at_tick(upper).unwrap(),
        liquidity,
        rounding,
    )
    .unwrap()
}

fn add_debt(env: &Env, owner: &Address, amount0: u128, amount1: u128) {
    let key = MockKey::Debt(owner.clone());
    let (d0, d1): (u128, u128) = env.storage().instance().get(&key).unwrap_or((0, 0));
    env.storage().instance().set(&key, &(d0 + amount0, d1 + amount1));
}

fn token_at(env: &Env, key: MockKey) -> token::Client<'_> {
    let address: Address = env.storage().instance().get(&key).unwrap();
    token::Client::new(env, &address)
}

#[contractimpl]
impl MockPool {
    // ========================================================
    // TEST CONTROLS
    // ========================================================

    pub fn init(env: Env, token0: Address, token1: Address, tick_spacing: i32, tick: i32) {
        env.storage().instance().set(&MockKey::Token0, &token0);
        env.storage().instance().set(&MockKey::Token1, &token1);
        env.storage().instance().set(&MockKey::Spacing, &tick_spacing);
        Self::set_price(env, tick);
    }

    /// Move the spot price; the TWAP follows
    pub fn set_price(env: Env, tick: i32) {
        let sqrt = get_sqrt_ratio_at_tick(tick).unwrap();
        let slot0 = Slot0 {
            sqrt_price_x96: to_host_u256(&env, sqrt),
            tick,
        };
        env.storage().instance().set(&MockKey::Slot0, &slot0);
        env.storage().instance().set(&MockKey::TwapTick, &tick);
    }

    pub fn set_twap_tick(env: Env, tick: i32) {
        env.storage().instance().set(&MockKey::TwapTick, &tick);
    }

    /// Credit fees to a position. Caller mints the tokens to the pool first.
    pub fn accrue_fees(env: Env, owner: Address, lower: i32, upper: i32, fee0: u128, fee1: u128) {
        let mut position = read_pos(&env, &owner, lower, upper);
        position.tokens_owed_0 += fee0;
        position.tokens_owed_1 += fee1;
        write_pos(&env, &owner, lower, upper, &position);

        let (r0, r1) = read_reserves(&env);
        write_reserves(&env, (r0 + fee0, r1 + fee1));
    }

    /// Account for outside liquidity. Caller mints the tokens to the pool first.
    pub fn add_reserves(env: Env, amount0: u128, amount1: u128) {
        let (r0, r1) = read_reserves(&env);
        write_reserves(&env, (r0 + amount0, r1 + amount1));
    }

    pub fn reserves(env: Env) -> (u128, u128) {
        read_reserves(&env)
    }

    // ========================================================
    // POOL INTERFACE
    // ========================================================

    pub fn token0(env: Env) -> Address {
        env.storage().instance().get(&MockKey::Token0).unwrap()
    }

    pub fn token1(env: Env) -> Address {
        env.storage().instance().get(&MockKey::Token1).unwrap()
    }

    pub fn tick_spacing(env: Env) -> i32 {
        env.storage().instance().get(&MockKey::Spacing).unwrap()
    }

    pub fn slot0(env: Env) -> Slot0 {
        env.storage().instance().get(&MockKey::Slot0).unwrap()
    }

    /// Cumulatives of a constant TWAP tick, anchored at 0 for now
    pub fn observe(env: Env, seconds_agos: Vec<u32>) -> Vec<i64> {
        let twap: i32 = env.storage().instance().get(&MockKey::TwapTick).unwrap();
        let mut out = Vec::new(&env);
        for seconds_ago in seconds_agos.iter() {
            out.push_back(-(i64::from(twap) * i64::from(seconds_ago)));
        }
        out
    }

    pub fn position(env: Env, owner: Address, lower: i32, upper: i32) -> PoolPosition {
        read_pos(&env, &owner, lower, upper)
    }

    pub fn mint(env: Env, owner: Address, lower: i32, upper: i32, liquidity: u128) -> (u128, u128) {
        owner.require_auth();
        let (amount0, amount1) = amounts(&env, lower, upper, liquidity, Rounding::Up);

        let mut position = read_pos(&env, &owner, lower, upper);
        position.liquidity += liquidity;
        write_pos(&env, &owner, lower, upper, &position);

        add_debt(&env, &owner, amount0, amount1);
        (amount0, amount1)
    }

    pub fn settle(env: Env, owner: Address) {
        let key = MockKey::Debt(owner);
        let (debt0, debt1): (u128, u128) = env.storage().instance().get(&key).unwrap_or((0, 0));
        let (r0, r1) = read_reserves(&env);

        let pool = env.current_contract_address();
        let balance0 = token_at(&env, MockKey::Token0).balance(&pool) as u128;
        let balance1 = token_at(&env, MockKey::Token1).balance(&pool) as u128;
        assert!(balance0 >= r0 + debt0, "token0 debt unpaid");
        assert!(balance1 >= r1 + debt1, "token1 debt unpaid");

        write_reserves(&env, (r0 + debt0, r1 + debt1));
        env.storage().instance().remove(&key);
    }

    pub fn burn(env: Env, owner: Address, lower: i32, upper: i32, liquidity: u128) -> (u128, u128) {
        owner.require_auth();
        let mut position = read_pos(&env, &owner, lower, upper);
        assert!(position.liquidity >= liquidity, "burn exceeds position");

        let (amount0, amount1) = amounts(&env, lower, upper, liquidity, Rounding::Down);
        position.liquidity -= liquidity;
        position.tokens_owed_0 += amount0;
        position.tokens_owed_1 += amount1;
        write_pos(&env, &owner, lower, upper, &position);

        (amount0, amount1)
    }

    pub fn collect(
        env: Env,
        owner: Address,
        recipient: Address,
        lower: i32,
        upper: i32,
        amount0_max: u128,
        amount1_max: u128,
    ) -> (u128, u128) {
        owner.require_auth();
        let mut position = read_pos(&env, &owner, lower, upper);
        let amount0 = position.tokens_owed_0.min(amount0_max);
        let amount1 = position.tokens_owed_1.min(amount1_max);
        position.tokens_owed_0 -= amount0;
        position.tokens_owed_1 -= amount1;
        write_pos(&env, &owner, lower, upper, &position);

        let pool = env.current_contract_address();
        if amount0 > 0 {
            token_at(&env, MockKey::Token0).transfer(&pool, &recipient, &(amount0 as i128));
        }
        if amount1 > 0 {
            token_at(&env, MockKey::Token1).transfer(&pool, &recipient, &(amount1 as i128));
        }

        let (r0, r1) = read_reserves(&env);
        write_reserves(&env, (r0 - amount0, r1 - amount1));
        (amount0, amount1)
    }

    /// Exact input at the current price; the price does not move
    pub fn swap(
        env: Env,
        owner: Address,
        zero_for_one: bool,
        amount_specified: i128,
        _sqrt_price_limit_x96: HostU256,
    ) -> (i128, i128) {
        owner.require_auth();
        let amount_in = amount_specified as u128;
        let price = sqrt_price(&env);
        let pool = env.current_contract_address();
        let (r0, r1) = read_reserves(&env);

        if zero_for_one {
            let out = to_u128(
                mul_div(mul_div(U256::from(amount_in), price, q96()).unwrap(), price, q96()).unwrap(),
            )
            .unwrap();
            token_at(&env, MockKey::Token1).transfer(&pool, &owner, &(out as i128));
            write_reserves(&env, (r0, r1 - out));
            add_debt(&env, &owner, amount_in, 0);
            (amount_in as i128, -(out as i128))
        } else {
            let out = to_u128(
                mul_div(mul_div(U256::from(amount_in), q96(), price).unwrap(), q96(), price).unwrap(),
            )
            .unwrap();
            token_at(&env, MockKey::Token0).transfer(&pool, &owner, &(out as i128));
            write_reserves(&env, (r0 - out, r1));
            add_debt(&env, &owner, 0, amount_in);
            (-(out as i128), amount_in as i128)
        }
    }
}

// ============================================================
// SETUP
// ============================================================

pub struct Setup<'a> {
    pub env: Env,
    pub vault: BelugaVaultClient<'a>,
    pub pool: MockPoolClient<'a>,
    pub governance: Address,
    pub token0: Address,
    pub token1: Address,
}

pub fn default_params() -> VaultParams {
    VaultParams {
        base_threshold: BASE_THRESHOLD,
        limit_threshold: LIMIT_THRESHOLD,
        max_twap_deviation: MAX_TWAP_DEVIATION,
        twap_window: TWAP_WINDOW,
        rebalance_cooldown: REBALANCE_COOLDOWN,
        max_total_supply: 0,
        protocol_fee: PROTOCOL_FEE,
        idle_dust_threshold: 0,
    }
}

/// Create tokens and a pool at `tick`, without a vault
pub fn setup_pool<'a>(env: &Env, tick: i32) -> (MockPoolClient<'a>, Address, Address) {
    let admin = Address::generate(env);
    let token0 = create_token(env, &admin);
    let token1 = create_token(env, &admin);

    let pool_id = env.register(MockPool, ());
    let pool = MockPoolClient::new(env, &pool_id);
    pool.init(&token0, &token1, &TICK_SPACING, &tick);

    (pool, token0, token1)
}

/// Vault over a pool at tick 0 with default parameters
pub fn setup<'a>() -> Setup<'a> {
    setup_with(default_params())
}

pub fn setup_with<'a>(params: VaultParams) -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START_TIME);

    let (pool, token0, token1) = setup_pool(&env, 0);
    let governance = Address::generate(&env);

    let vault_id = env.register(BelugaVault, ());
    let vault = BelugaVaultClient::new(&env, &vault_id);
    vault.initialize(&governance, &pool.address, &params);

    Setup {
        env,
        vault,
        pool,
        governance,
        token0,
        token1,
    }
}

impl Setup<'_> {
    /// New user funded with `amount` of each token
    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        mint_tokens(&self.env, &self.token0, &user, amount);
        mint_tokens(&self.env, &self.token1, &user, amount);
        user
    }

    /// Bootstrap deposit of 1_000_000 / 1_000_000, returns the depositor
    pub fn bootstrap(&self) -> Address {
        let user = self.funded_user(1_000_000);
        self.vault
            .deposit(&user, &1_000_000, &1_000_000, &0, &0, &user);
        user
    }

    /// Credit fees to the vault's position on `lower..upper`
    pub fn accrue_pool_fees(&self, lower: i32, upper: i32, fee0: u128, fee1: u128) {
        if fee0 > 0 {
            mint_tokens(&self.env, &self.token0, &self.pool.address, fee0 as i128);
        }
        if fee1 > 0 {
            mint_tokens(&self.env, &self.token1, &self.pool.address, fee1 as i128);
        }
        self.pool
            .accrue_fees(&self.vault.address, &lower, &upper, &fee0, &fee1);
    }

    /// Give the pool outside inventory to swap against
    pub fn fund_pool(&self, amount: u128) {
        mint_tokens(&self.env, &self.token0, &self.pool.address, amount as i128);
        mint_tokens(&self.env, &self.token1, &self.pool.address, amount as i128);
        self.pool.add_reserves(&amount, &amount);
    }

    pub fn advance_time(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }

    pub fn balance0(&self, holder: &Address) -> i128 {
        token::Client::new(&self.env, &self.token0).balance(holder)
    }

    pub fn balance1(&self, holder: &Address) -> i128 {
        token::Client::new(&self.env, &self.token1).balance(holder)
    }

    /// Neutral swap limit for rebalances that do not swap
    pub fn no_limit(&self) -> HostU256 {
        HostU256::from_u32(&self.env, 0)
    }
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    token_id.address()
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    let client = StellarAssetClient::new(env, token);
    client.mint(to, &amount);
}
