// Fee Distribution
//
// fee = collected - burned principal; protocol takes `protocol_fee / 1e6` of
// it, split between the owner and team buckets with the odd unit to team.

use belugavault_math::{mul_div_u128, MathError};

use crate::error::AccountingError;

/// Denominator of the protocol fee fraction
pub const FEE_DENOMINATOR: u32 = 1_000_000;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FeeSplit {
    pub depositors: u128,
    pub owner: u128,
    pub team: u128,
}

impl FeeSplit {
    #[inline]
    pub fn protocol(&self) -> u128 {
        self.owner + self.team
    }
}

/// Fees earned by a position: everything collected beyond the burned principal
pub fn fee_from_collect(collected: u128, burned: u128) -> Result<u128, AccountingError> {
    collected
        .checked_sub(burned)
        .ok_or(AccountingError::Math(MathError::Overflow))
}

/// Split a raw fee amount between depositors, owner and team
pub fn split_fees(fee: u128, protocol_fee: u32) -> Result<FeeSplit, AccountingError> {
    if protocol_fee >= FEE_DENOMINATOR {
        return Err(AccountingError::InvalidProtocolFee);
    }

    let protocol = mul_div_u128(fee, u128::from(protocol_fee), u128::from(FEE_DENOMINATOR))?;
    let owner = protocol / 2;

    Ok(FeeSplit {
        depositors: fee - protocol,
        owner,
        team: protocol - owner,
    })
}
