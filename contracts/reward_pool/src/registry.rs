//! Pool set and the global weight invariant.
//!
//! Pools are never removed, only weighted down. Whatever the caller asks for,
//! the weight sum across all pools must stay above zero once a pool exists.

use soroban_sdk::{Address, Env};

use crate::accrual;
use crate::auth::OwnerCap;
use crate::errors::{ContractError, MathError, RegistryError};
use crate::schedule;
use crate::storage::{self, GlobalConfig, PoolInfo};

/// Reject a post-change weight sum of zero.
pub fn ensure_nonzero(total_weight: u64) -> Result<u64, RegistryError> {
    if total_weight == 0 {
        return Err(RegistryError::ZeroWeight);
    }
    Ok(total_weight)
}

/// Register a new pool for `stake_token`. Returns its id.
///
/// With `with_update`, every existing pool is synced under the old weights
/// before the new pool dilutes them.
pub fn add_pool(
    env: &Env,
    _cap: &OwnerCap,
    config: &mut GlobalConfig,
    weight: u64,
    stake_token: Address,
    with_update: bool,
) -> Result<u32, ContractError> {
    if stake_token == config.esm_token || stake_token == config.esg_token {
        return Err(RegistryError::RewardTokenNotStakeable.into());
    }
    let new_total = config
        .total_weight
        .checked_add(weight)
        .ok_or(MathError::Overflow)?;
    ensure_nonzero(new_total)?;

    if with_update {
        accrual::sync_all(env, config)?;
    }

    let now = env.ledger().sequence();
    let last_reward_block = schedule::first_start(env).map_or(now, |start| now.max(start));

    let pool_id = storage::push_pool(
        env,
        &PoolInfo {
            stake_token,
            weight,
            last_reward_block,
            acc_esm_per_share: 0,
            acc_esg_per_share: 0,
            total_staked: 0,
        },
    );
    config.total_weight = new_total;
    Ok(pool_id)
}

/// Change the weight of an existing pool. Returns the previous weight.
pub fn set_weight(
    env: &Env,
    _cap: &OwnerCap,
    config: &mut GlobalConfig,
    pool_id: u32,
    weight: u64,
    with_update: bool,
) -> Result<u64, ContractError> {
    let old_weight = storage::pool(env, pool_id)?.weight;
    let new_total = config
        .total_weight
        .checked_sub(old_weight)
        .and_then(|rest| rest.checked_add(weight))
        .ok_or(MathError::Overflow)?;
    ensure_nonzero(new_total)?;

    if with_update {
        accrual::sync_all(env, config)?;
    }

    // Re-read: the sync above may have moved the accumulator.
    let mut pool = storage::pool(env, pool_id)?;
    pool.weight = weight;
    storage::set_pool(env, pool_id, &pool);
    config.total_weight = new_total;
    Ok(old_weight)
}
