//! Depositor positions, settlement and the dev fee split.
//!
//! Every deposit and withdrawal first syncs the pool, then pays out what the
//! position earned since its last settlement, then moves stake and re-prices
//! the debt. Zero-amount transfers are skipped together with their events.

use soroban_sdk::{token, Address, Env};

use crate::accrual;
use crate::errors::{ContractError, LedgerError, MathError};
use crate::events::{self, StakeDirection};
use crate::storage::{self, GlobalConfig, PoolInfo, UserInfo};
use crate::{Currency, RewardAmounts};

pub const PPM_DENOMINATOR: i128 = 1_000_000;

/// Stake `amount` of the pool's token on behalf of `user`.
///
/// `amount` may be zero, which only settles.
pub fn deposit(
    env: &Env,
    config: &GlobalConfig,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<RewardAmounts, ContractError> {
    if amount < 0 {
        return Err(LedgerError::InvalidAmount.into());
    }

    let mut pool = accrual::sync_pool(env, config, pool_id)?;
    let mut position = storage::user_info(env, pool_id, user);

    let paid = if position.amount > 0 {
        settle(env, config, pool_id, &pool, &position, user)?
    } else {
        RewardAmounts::zero()
    };

    if amount > 0 {
        token::Client::new(env, &pool.stake_token).transfer(
            user,
            &env.current_contract_address(),
            &amount,
        );
        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        storage::set_pool(env, pool_id, &pool);
        events::publish_stake_changed(env, pool_id, user.clone(), amount, StakeDirection::Deposit);
    }

    reprice(&pool, &mut position)?;
    storage::set_user_info(env, pool_id, user, &position);
    Ok(paid)
}

/// Return `amount` of stake to `user`, settling rewards first.
pub fn withdraw(
    env: &Env,
    config: &GlobalConfig,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<RewardAmounts, ContractError> {
    if amount < 0 {
        return Err(LedgerError::InvalidAmount.into());
    }
    // Existence check comes before the stake check.
    storage::pool(env, pool_id)?;
    let mut position = storage::user_info(env, pool_id, user);
    if amount > position.amount {
        return Err(LedgerError::InsufficientStake.into());
    }

    let mut pool = accrual::sync_pool(env, config, pool_id)?;
    let paid = settle(env, config, pool_id, &pool, &position, user)?;

    if amount > 0 {
        position.amount -= amount;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(MathError::Overflow)?;
        storage::set_pool(env, pool_id, &pool);
        token::Client::new(env, &pool.stake_token).transfer(
            &env.current_contract_address(),
            user,
            &amount,
        );
        events::publish_stake_changed(env, pool_id, user.clone(), amount, StakeDirection::Withdraw);
    }

    reprice(&pool, &mut position)?;
    storage::set_user_info(env, pool_id, user, &position);
    Ok(paid)
}

/// Hand back the whole stake immediately and forfeit everything pending.
///
/// The pool is synced before the stake leaves, so the blocks already elapsed
/// are priced against the old total. Nothing is settled.
pub fn emergency_withdraw(
    env: &Env,
    config: &GlobalConfig,
    pool_id: u32,
    user: &Address,
) -> Result<i128, ContractError> {
    let mut pool = accrual::sync_pool(env, config, pool_id)?;
    let position = storage::user_info(env, pool_id, user);
    let amount = position.amount;

    storage::set_user_info(env, pool_id, user, &UserInfo::default());

    if amount > 0 {
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(MathError::Overflow)?;
        storage::set_pool(env, pool_id, &pool);
        token::Client::new(env, &pool.stake_token).transfer(
            &env.current_contract_address(),
            user,
            &amount,
        );
        events::publish_stake_changed(env, pool_id, user.clone(), amount, StakeDirection::Emergency);
    }
    Ok(amount)
}

/// Pay out what `position` has earned against the synced `pool`.
///
/// Returns the net amounts the depositor actually received.
fn settle(
    env: &Env,
    config: &GlobalConfig,
    pool_id: u32,
    pool: &PoolInfo,
    position: &UserInfo,
    user: &Address,
) -> Result<RewardAmounts, ContractError> {
    let owed = accrual::owed(pool, position)?;
    Ok(RewardAmounts {
        esm: pay_reward(env, config, pool_id, user, Currency::Esm, owed.esm)?,
        esg: pay_reward(env, config, pool_id, user, Currency::Esg, owed.esg)?,
    })
}

fn reprice(pool: &PoolInfo, position: &mut UserInfo) -> Result<(), MathError> {
    let debt = accrual::debt_for(pool, position.amount)?;
    position.esm_debt = debt.esm;
    position.esg_debt = debt.esg;
    Ok(())
}

/// Split `pending` into the depositor's net share and the dev fee.
pub fn split_fee(pending: i128, dev_fee_ppm: u32) -> Result<(i128, i128), MathError> {
    let fee = accrual::mul_div(pending, i128::from(dev_fee_ppm), PPM_DENOMINATOR)?;
    Ok((pending - fee, fee))
}

fn pay_reward(
    env: &Env,
    config: &GlobalConfig,
    pool_id: u32,
    user: &Address,
    currency: Currency,
    pending: i128,
) -> Result<i128, ContractError> {
    if pending <= 0 {
        return Ok(0);
    }
    let reward_token = match currency {
        Currency::Esm => &config.esm_token,
        Currency::Esg => &config.esg_token,
    };
    let client = token::Client::new(env, reward_token);
    let (net, fee) = split_fee(pending, config.dev_fee_ppm)?;

    let net_paid = safe_transfer(env, &client, user, net);
    if net_paid > 0 {
        events::publish_reward_paid(env, pool_id, user.clone(), currency, net_paid);
    }
    let fee_paid = safe_transfer(env, &client, &config.dev_address, fee);
    if fee_paid > 0 {
        events::publish_fee_paid(env, pool_id, currency, fee_paid);
    }
    Ok(net_paid)
}

/// Transfer at most `amount`, capped at what the ledger holds. Returns the
/// amount actually sent.
fn safe_transfer(env: &Env, client: &token::Client, to: &Address, amount: i128) -> i128 {
    if amount <= 0 {
        return 0;
    }
    let this = env.current_contract_address();
    let sent = amount.min(client.balance(&this));
    if sent > 0 {
        client.transfer(&this, to, &sent);
    }
    sent
}
