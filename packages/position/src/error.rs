use belugavault_math::MathError;
use belugavault_range::RangeError;

/// Share accounting failures
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccountingError {
    /// Deposit too small to mint a single share
    ZeroShares,
    /// Burning more shares than exist
    InsufficientShares,
    /// First deposit does not exceed the locked minimum
    BootstrapTooSmall,
    /// Computed cost exceeds the caller's desired amount
    ExceedsDesired,
    /// Shares exist but nothing backs them
    EmptyVault,
    /// Protocol fee fraction must be below 100%
    InvalidProtocolFee,
    Range(RangeError),
    Math(MathError),
}

impl From<MathError> for AccountingError {
    fn from(err: MathError) -> Self {
        AccountingError::Math(err)
    }
}

impl From<RangeError> for AccountingError {
    fn from(err: RangeError) -> Self {
        AccountingError::Range(err)
    }
}
