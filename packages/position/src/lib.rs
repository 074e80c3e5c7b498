#![no_std]

pub mod error;
pub mod types;
pub mod shares;
pub mod fees;

pub use error::AccountingError;
pub use types::{DepositQuote, Holdings, PositionKind, VaultPosition, WithdrawQuote};
pub use shares::{
    deployable_liquidity, pro_rata, quote_balance_withdraw, quote_deposit, quote_withdraw, total_amounts,
    LIQUIDITY_ROUNDING_EPSILON, MIN_LOCKED_SHARES,
};
pub use fees::{fee_from_collect, split_fees, FeeSplit, FEE_DENOMINATOR};
