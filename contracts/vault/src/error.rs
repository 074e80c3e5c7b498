// Vault error module
//
// Codes are banded by category:
// - 100s lifecycle
// - 200s preconditions
// - 300s bounds
// - 400s staleness (rebalance price sanity)
// - 500s arithmetic

use belugavault_math::MathError;
use belugavault_position::AccountingError;
use belugavault_range::RangeError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    // Lifecycle errors (100-199)
    AlreadyInitialized = 100,
    NotInitialized = 101,

    // Precondition errors (200-299)
    ZeroAmount = 200,
    NegativeAmount = 201,
    ZeroShares = 202,
    Unauthorized = 203,
    CooldownActive = 204,
    InvalidRecipient = 205,
    Reentrant = 206,
    Finalized = 207,
    NotFinalized = 208,
    InsufficientShares = 209,
    InvalidToken = 210,
    NoPendingGovernance = 211,
    EmptyVault = 212,
    PositionsActive = 213,

    // Bounds errors (300-399)
    BelowMinimum = 300,
    AboveMaximum = 301,
    SupplyCapExceeded = 302,
    TickOutOfRange = 303,
    TickMisaligned = 304,
    InvalidRange = 305,
    InvalidThreshold = 306,
    InvalidTickSpacing = 307,
    InvalidProtocolFee = 308,
    InvalidTwapWindow = 309,
    BootstrapTooSmall = 310,
    DuplicateRanges = 311,

    // Staleness errors (400-499)
    TwapDeviationExceeded = 400,
    PriceNearBounds = 401,

    // Arithmetic errors (500-599)
    Overflow = 500,
    DivisionByZero = 501,
}

/// Coarse error taxonomy
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Lifecycle,
    PreconditionViolation,
    BoundsViolation,
    StalenessViolation,
    ArithmeticViolation,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            100..=199 => ErrorKind::Lifecycle,
            200..=299 => ErrorKind::PreconditionViolation,
            300..=399 => ErrorKind::BoundsViolation,
            400..=499 => ErrorKind::StalenessViolation,
            _ => ErrorKind::ArithmeticViolation,
        }
    }
}

// ============================================================
// CONVERSIONS FROM PACKAGE ERRORS
// ============================================================

impl From<MathError> for VaultError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::TickOutOfRange => VaultError::TickOutOfRange,
            MathError::InvalidTickSpacing => VaultError::InvalidTickSpacing,
            MathError::InvalidRange => VaultError::InvalidRange,
            MathError::Overflow => VaultError::Overflow,
            MathError::DivisionByZero => VaultError::DivisionByZero,
        }
    }
}

impl From<RangeError> for VaultError {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::TickMisaligned => VaultError::TickMisaligned,
            RangeError::TickOutOfRange => VaultError::TickOutOfRange,
            RangeError::InvalidRange => VaultError::InvalidRange,
            RangeError::InvalidThreshold => VaultError::InvalidThreshold,
            RangeError::InvalidTickSpacing => VaultError::InvalidTickSpacing,
            RangeError::InvalidTwapWindow => VaultError::InvalidTwapWindow,
            RangeError::PriceNearBounds => VaultError::PriceNearBounds,
            RangeError::TwapDeviationExceeded => VaultError::TwapDeviationExceeded,
            RangeError::Math(math) => math.into(),
        }
    }
}

impl From<AccountingError> for VaultError {
    fn from(err: AccountingError) -> Self {
        match err {
            AccountingError::ZeroShares => VaultError::ZeroShares,
            AccountingError::InsufficientShares => VaultError::InsufficientShares,
            AccountingError::BootstrapTooSmall => VaultError::BootstrapTooSmall,
            AccountingError::ExceedsDesired => VaultError::AboveMaximum,
            AccountingError::EmptyVault => VaultError::EmptyVault,
            AccountingError::InvalidProtocolFee => VaultError::InvalidProtocolFee,
            AccountingError::Range(range) => range.into(),
            AccountingError::Math(math) => math.into(),
        }
    }
}
