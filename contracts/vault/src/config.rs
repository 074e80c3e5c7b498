// Configuration validation and versioned updates

use belugavault_position::FEE_DENOMINATOR;
use belugavault_range::validate_threshold;
use soroban_sdk::{log, Address, Env};

use crate::error::VaultError;
use crate::events::emit_config_updated;
use crate::guard::require_governance;
use crate::storage::{read_config, read_market, write_config};
use crate::types::VaultConfig;

pub fn validate_config(config: &VaultConfig, tick_spacing: i32) -> Result<(), VaultError> {
    validate_threshold(config.base_threshold, tick_spacing)?;
    validate_threshold(config.limit_threshold, tick_spacing)?;

    if config.twap_window == 0 {
        return Err(VaultError::InvalidTwapWindow);
    }
    if config.protocol_fee >= FEE_DENOMINATOR {
        return Err(VaultError::InvalidProtocolFee);
    }
    Ok(())
}

/// Apply a governance change, validate the result and bump the version.
///
/// The new config is visible to the next operation only.
pub fn update_config<F>(env: &Env, caller: &Address, apply: F) -> Result<VaultConfig, VaultError>
where
    F: FnOnce(&mut VaultConfig),
{
    require_governance(env, caller)?;
    let market = read_market(env)?;
    let mut config = read_config(env)?;

    apply(&mut config);
    validate_config(&config, market.tick_spacing)?;
    config.version = config.version.checked_add(1).ok_or(VaultError::Overflow)?;

    write_config(env, &config);
    log!(env, "config updated", config.version);
    emit_config_updated(env, config.version);
    Ok(config)
}
