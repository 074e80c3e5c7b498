#![no_std]

pub mod error;
pub mod types;
pub mod select;
pub mod validate;
pub mod twap;

pub use error::RangeError;
pub use types::{LimitSide, TickRange};
pub use select::{ask_range, base_range, bid_range, select_limit_range};
pub use validate::{check_price_bounds, validate_range, validate_threshold};
pub use twap::{check_twap_deviation, twap_from_cumulatives};

// Re-export from math
pub use belugavault_math::floor_tick;
