use soroban_sdk::{contractclient, token, Address, Env};

use crate::auth::OwnerCap;
use crate::errors::{ContractError, LedgerError, MathError};
use crate::storage::{self, GlobalConfig};

/// Interface a liquidity migrator must expose.
///
/// The ledger approves the migrator for `amount` of `token` held by `from`,
/// then expects it to pull exactly that amount and hand `from` the same
/// amount of a different, returned replacement token.
#[contractclient(name = "MigratorClient")]
pub trait Migrator {
    fn migrate(env: Env, from: Address, token: Address, amount: i128) -> Address;
}

/// Swap the stake token of `pool_id` for the migrator's replacement.
///
/// Only the pool's own `total_staked` moves. Other pools staking the same
/// token keep their share of it. Returns `(old_token, new_token, amount)`.
pub fn migrate_pool(
    env: &Env,
    _cap: &OwnerCap,
    config: &GlobalConfig,
    pool_id: u32,
) -> Result<(Address, Address, i128), ContractError> {
    let migrator = config.migrator.clone().ok_or(LedgerError::NoMigrator)?;
    let mut pool = storage::pool(env, pool_id)?;
    let this = env.current_contract_address();
    let amount = pool.total_staked;

    let old_token = pool.stake_token.clone();
    let old_client = token::Client::new(env, &old_token);
    let old_before = old_client.balance(&this);
    old_client.approve(&this, &migrator, &amount, &env.ledger().sequence());

    let new_token = MigratorClient::new(env, &migrator).migrate(&this, &old_token, &amount);
    if new_token == old_token || new_token == config.esm_token || new_token == config.esg_token {
        return Err(LedgerError::BadMigration.into());
    }

    let pulled = old_before
        .checked_sub(old_client.balance(&this))
        .ok_or(MathError::Overflow)?;
    let expected = staked_in(env, &new_token, pool_id)?
        .checked_add(amount)
        .ok_or(MathError::Overflow)?;
    if pulled != amount || token::Client::new(env, &new_token).balance(&this) != expected {
        return Err(LedgerError::BadMigration.into());
    }

    pool.stake_token = new_token.clone();
    storage::set_pool(env, pool_id, &pool);
    Ok((old_token, new_token, amount))
}

/// Stake of `token` booked by every pool other than `except`.
fn staked_in(env: &Env, token: &Address, except: u32) -> Result<i128, ContractError> {
    let mut total: i128 = 0;
    for pool_id in (0..storage::pool_count(env)).filter(|id| *id != except) {
        let pool = storage::pool(env, pool_id)?;
        if pool.stake_token == *token {
            total = total
                .checked_add(pool.total_staked)
                .ok_or(MathError::Overflow)?;
        }
    }
    Ok(total)
}
