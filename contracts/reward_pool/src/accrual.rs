//! Per-pool reward accumulator.
//!
//! Each pool tracks how much ESM and ESG one staked unit has earned since the
//! pool was created:
//!
//! ```text
//! emitted  = schedule.total_rewards(last_reward_block + 1, now)
//! share    = emitted × pool.weight / total_weight
//! acc     += share × SCALE / pool.total_staked
//! ```
//!
//! A depositor's entitlement is then `amount × acc / SCALE − debt`, where the
//! debt is the same product taken at their last settlement.
//!
//! When a pool has nothing staked the window is skipped and its emission is
//! lost. Nothing is carried forward to the next depositor.

use soroban_sdk::Env;

use crate::errors::{ContractError, MathError};
use crate::schedule;
use crate::storage::{self, GlobalConfig, PoolInfo, UserInfo};
use crate::RewardAmounts;

/// Fixed-point scaling factor applied to the per-share accumulators.
///
/// 10^12 keeps twelve decimal places of reward-per-unit precision.
pub const SCALE: i128 = 1_000_000_000_000;

/// `a × b / d` with every step checked.
pub fn mul_div(a: i128, b: i128, d: i128) -> Result<i128, MathError> {
    a.checked_mul(b)
        .ok_or(MathError::Overflow)?
        .checked_div(d)
        .ok_or(MathError::Overflow)
}

/// Bring `pool` forward to block `now` in memory.
///
/// Returns `false` when there was nothing to do: either the pool is already at
/// or past `now`, or it was created ahead of the schedule start.
pub fn advance(
    env: &Env,
    pool: &mut PoolInfo,
    total_weight: u64,
    now: u32,
) -> Result<bool, MathError> {
    if now <= pool.last_reward_block {
        return Ok(false);
    }
    if pool.total_staked <= 0 || pool.weight == 0 {
        pool.last_reward_block = now;
        return Ok(true);
    }

    let emitted = schedule::total_rewards(env, pool.last_reward_block + 1, now)?;
    let weight = i128::from(pool.weight);
    let total_weight = i128::from(total_weight);

    let esm = mul_div(emitted.esm, weight, total_weight)?;
    let esg = mul_div(emitted.esg, weight, total_weight)?;

    pool.acc_esm_per_share = pool
        .acc_esm_per_share
        .checked_add(mul_div(esm, SCALE, pool.total_staked)?)
        .ok_or(MathError::Overflow)?;
    pool.acc_esg_per_share = pool
        .acc_esg_per_share
        .checked_add(mul_div(esg, SCALE, pool.total_staked)?)
        .ok_or(MathError::Overflow)?;
    pool.last_reward_block = now;
    Ok(true)
}

/// Load, advance and persist one pool. Returns the updated record.
pub fn sync_pool(env: &Env, config: &GlobalConfig, pool_id: u32) -> Result<PoolInfo, ContractError> {
    let mut pool = storage::pool(env, pool_id)?;
    if advance(env, &mut pool, config.total_weight, env.ledger().sequence())? {
        storage::set_pool(env, pool_id, &pool);
    }
    Ok(pool)
}

/// Sync every registered pool.
pub fn sync_all(env: &Env, config: &GlobalConfig) -> Result<(), ContractError> {
    for pool_id in 0..storage::pool_count(env) {
        sync_pool(env, config, pool_id)?;
    }
    Ok(())
}

/// What `user` would be owed if `pool` were settled right now.
///
/// Works on a copy of the pool, so it always agrees with what a `sync_pool`
/// at the same block would persist.
pub fn pending(
    env: &Env,
    config: &GlobalConfig,
    pool: &PoolInfo,
    user: &UserInfo,
) -> Result<RewardAmounts, MathError> {
    let mut simulated = pool.clone();
    advance(env, &mut simulated, config.total_weight, env.ledger().sequence())?;
    owed(&simulated, user)
}

/// Rewards `user` has earned against an already-synced `pool`.
pub fn owed(pool: &PoolInfo, user: &UserInfo) -> Result<RewardAmounts, MathError> {
    let earned = debt_for(pool, user.amount)?;
    Ok(RewardAmounts {
        esm: earned
            .esm
            .checked_sub(user.esm_debt)
            .ok_or(MathError::Overflow)?,
        esg: earned
            .esg
            .checked_sub(user.esg_debt)
            .ok_or(MathError::Overflow)?,
    })
}

/// The reward already priced in for `amount` staked units at the pool's
/// current accumulator values.
pub fn debt_for(pool: &PoolInfo, amount: i128) -> Result<RewardAmounts, MathError> {
    Ok(RewardAmounts {
        esm: mul_div(amount, pool.acc_esm_per_share, SCALE)?,
        esg: mul_div(amount, pool.acc_esg_per_share, SCALE)?,
    })
}
