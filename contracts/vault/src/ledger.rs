// Share ownership ledger

use soroban_sdk::{Address, Env};

use crate::error::VaultError;
use crate::events::emit_transfer;
use crate::storage::{read_balance, read_total_shares, write_balance, write_total_shares};

pub fn total_shares(env: &Env) -> u128 {
    read_total_shares(env)
}

pub fn balance_of(env: &Env, holder: &Address) -> u128 {
    read_balance(env, holder)
}

pub fn mint_shares(env: &Env, holder: &Address, amount: u128) -> Result<(), VaultError> {
    let balance = read_balance(env, holder)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    let total = read_total_shares(env)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;

    write_balance(env, holder, balance);
    write_total_shares(env, total);
    Ok(())
}

pub fn burn_shares(env: &Env, holder: &Address, amount: u128) -> Result<(), VaultError> {
    let balance = read_balance(env, holder);
    if amount > balance {
        return Err(VaultError::InsufficientShares);
    }
    let total = read_total_shares(env)
        .checked_sub(amount)
        .ok_or(VaultError::Overflow)?;

    write_balance(env, holder, balance - amount);
    write_total_shares(env, total);
    Ok(())
}

pub fn transfer_shares(env: &Env, from: &Address, to: &Address, amount: u128) -> Result<(), VaultError> {
    if amount == 0 {
        return Err(VaultError::ZeroShares);
    }
    let from_balance = read_balance(env, from);
    if amount > from_balance {
        return Err(VaultError::InsufficientShares);
    }

    write_balance(env, from, from_balance - amount);
    let to_balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    write_balance(env, to, to_balance);

    emit_transfer(env, from, to, amount);
    Ok(())
}
