#![no_std]

pub mod accrual;
pub mod auth;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod migration;
pub mod registry;
pub mod schedule;
pub mod storage;

use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Env};

pub use errors::ContractError;
pub use storage::{GlobalConfig, PoolInfo, RewardStage, UserInfo};

// ── Public types ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Currency {
    Esm,
    Esg,
}

/// A pair of ESM and ESG amounts.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RewardAmounts {
    pub esm: i128,
    pub esg: i128,
}

impl RewardAmounts {
    pub const fn zero() -> Self {
        Self { esm: 0, esg: 0 }
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, errors::MathError> {
        Ok(Self {
            esm: self
                .esm
                .checked_add(other.esm)
                .ok_or(errors::MathError::Overflow)?,
            esg: self
                .esg
                .checked_add(other.esg)
                .ok_or(errors::MathError::Overflow)?,
        })
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardPoolContract;

#[contractimpl]
impl RewardPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `esm_token` / `esg_token` – the two reward token contracts. The
    ///   ledger pays out of its own balance of each, so it must be funded.
    /// * `dev_address` – receives the dev fee. The fee starts at zero.
    pub fn initialize(
        env: Env,
        owner: Address,
        esm_token: Address,
        esg_token: Address,
        dev_address: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if esm_token == esg_token {
            return Err(ContractError::TokensIdentical);
        }

        storage::set_owner(&env, &owner);
        storage::set_config(
            &env,
            &GlobalConfig {
                esm_token: esm_token.clone(),
                esg_token: esg_token.clone(),
                dev_address: dev_address.clone(),
                dev_fee_ppm: 0,
                total_weight: 0,
                migrator: None,
            },
        );

        events::publish_initialized(&env, owner, esm_token, esg_token, dev_address);
        Ok(())
    }

    // ── Schedule (owner) ────────────────────────────────────────────────────

    /// Append a reward stage covering `[start_block, end_block]`.
    ///
    /// Every pool is synced first, so a stage that starts in the past cannot
    /// pay for blocks that were already accounted for.
    pub fn add_stage(
        env: Env,
        caller: Address,
        start_block: u32,
        end_block: u32,
        esm_per_block: i128,
        esg_per_block: i128,
    ) -> Result<u32, ContractError> {
        let _cap = auth::require_owner(&env, &caller)?;
        let config = storage::config(&env)?;
        let stage = RewardStage {
            start_block,
            end_block,
            esm_per_block,
            esg_per_block,
        };
        accrual::sync_all(&env, &config)?;
        let index = schedule::push(&env, stage)?;

        log!(&env, "stage {} added: {}..={}", index, start_block, end_block);
        events::publish_stage_added(
            &env,
            index,
            start_block,
            end_block,
            esm_per_block,
            esg_per_block,
        );
        Ok(index)
    }

    // ── Pools (owner) ───────────────────────────────────────────────────────

    /// Register a pool staking `stake_token` with the given weight.
    pub fn add(
        env: Env,
        caller: Address,
        weight: u64,
        stake_token: Address,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        let cap = auth::require_owner(&env, &caller)?;
        let mut config = storage::config(&env)?;

        let pool_id = registry::add_pool(
            &env,
            &cap,
            &mut config,
            weight,
            stake_token.clone(),
            with_update,
        )?;
        storage::set_config(&env, &config);

        log!(&env, "pool {} added with weight {}", pool_id, weight);
        events::publish_pool_added(&env, pool_id, stake_token, weight, config.total_weight);
        Ok(pool_id)
    }

    /// Change the weight of `pool_id`.
    pub fn set(
        env: Env,
        caller: Address,
        pool_id: u32,
        weight: u64,
        with_update: bool,
    ) -> Result<(), ContractError> {
        let cap = auth::require_owner(&env, &caller)?;
        let mut config = storage::config(&env)?;

        let old_weight =
            registry::set_weight(&env, &cap, &mut config, pool_id, weight, with_update)?;
        storage::set_config(&env, &config);

        events::publish_pool_weight_set(&env, pool_id, old_weight, weight, config.total_weight);
        Ok(())
    }

    // ── Fee & migration settings (owner) ────────────────────────────────────

    /// Set the dev fee, in parts per million of every settled reward.
    pub fn set_dev_fee(env: Env, caller: Address, dev_fee_ppm: u32) -> Result<(), ContractError> {
        let _cap = auth::require_owner(&env, &caller)?;
        if i128::from(dev_fee_ppm) > ledger::PPM_DENOMINATOR {
            return Err(errors::LedgerError::InvalidFee.into());
        }
        let mut config = storage::config(&env)?;
        config.dev_fee_ppm = dev_fee_ppm;
        storage::set_config(&env, &config);

        events::publish_dev_fee_set(&env, dev_fee_ppm);
        Ok(())
    }

    pub fn set_dev_address(
        env: Env,
        caller: Address,
        dev_address: Address,
    ) -> Result<(), ContractError> {
        let _cap = auth::require_owner(&env, &caller)?;
        let mut config = storage::config(&env)?;
        config.dev_address = dev_address.clone();
        storage::set_config(&env, &config);

        events::publish_dev_address_set(&env, dev_address);
        Ok(())
    }

    pub fn set_migrator(env: Env, caller: Address, migrator: Address) -> Result<(), ContractError> {
        let _cap = auth::require_owner(&env, &caller)?;
        let mut config = storage::config(&env)?;
        config.migrator = Some(migrator.clone());
        storage::set_config(&env, &config);

        events::publish_migrator_set(&env, migrator);
        Ok(())
    }

    /// Move `pool_id`'s stake into the migrator's replacement token.
    ///
    /// Reward accounting is untouched; only the stake token reference changes.
    pub fn migrate(env: Env, caller: Address, pool_id: u32) -> Result<Address, ContractError> {
        let cap = auth::require_owner(&env, &caller)?;
        let config = storage::config(&env)?;

        let (old_token, new_token, amount) =
            migration::migrate_pool(&env, &cap, &config, pool_id)?;

        log!(&env, "pool {} migrated", pool_id);
        events::publish_migrated(&env, pool_id, old_token, new_token.clone(), amount);
        Ok(new_token)
    }

    // ── Depositors ──────────────────────────────────────────────────────────

    /// Stake `amount` into `pool_id`, paying out pending rewards first.
    ///
    /// A zero `amount` only settles. Returns the net rewards received.
    pub fn deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<RewardAmounts, ContractError> {
        user.require_auth();
        let config = storage::config(&env)?;
        ledger::deposit(&env, &config, pool_id, &user, amount)
    }

    /// Unstake `amount` from `pool_id`, paying out pending rewards first.
    pub fn withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<RewardAmounts, ContractError> {
        user.require_auth();
        let config = storage::config(&env)?;
        ledger::withdraw(&env, &config, pool_id, &user, amount)
    }

    /// Take the whole stake out of `pool_id` and forfeit pending rewards.
    pub fn emergency_withdraw(env: Env, user: Address, pool_id: u32) -> Result<i128, ContractError> {
        user.require_auth();
        let config = storage::config(&env)?;
        ledger::emergency_withdraw(&env, &config, pool_id, &user)
    }

    /// Bring one pool's accumulator up to the current block.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<(), ContractError> {
        let config = storage::config(&env)?;
        accrual::sync_pool(&env, &config, pool_id)?;
        Ok(())
    }

    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        let config = storage::config(&env)?;
        accrual::sync_all(&env, &config)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Rewards `user` would receive, before the dev fee, if `pool_id` were
    /// settled now.
    pub fn pending_reward(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<RewardAmounts, ContractError> {
        let config = storage::config(&env)?;
        let pool = storage::pool(&env, pool_id)?;
        let position = storage::user_info(&env, pool_id, &user);
        Ok(accrual::pending(&env, &config, &pool, &position)?)
    }

    /// Schedule emission over the inclusive range `[from, to]`, pool weights
    /// not applied.
    pub fn get_total_rewards(env: Env, from: u32, to: u32) -> Result<RewardAmounts, ContractError> {
        Ok(schedule::total_rewards(&env, from, to)?)
    }

    pub fn pool_count(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    pub fn total_weight(env: Env) -> Result<u64, ContractError> {
        Ok(storage::config(&env)?.total_weight)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<PoolInfo, ContractError> {
        Ok(storage::pool(&env, pool_id)?)
    }

    pub fn stage_count(env: Env) -> u32 {
        storage::stage_count(&env)
    }

    pub fn get_stage(env: Env, index: u32) -> Result<RewardStage, ContractError> {
        Ok(storage::stage(&env, index)?)
    }

    pub fn get_user_info(env: Env, pool_id: u32, user: Address) -> UserInfo {
        storage::user_info(&env, pool_id, &user)
    }

    pub fn get_config(env: Env) -> Result<GlobalConfig, ContractError> {
        storage::config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        storage::owner(&env)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        storage::pending_owner(&env)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. The candidate must call `accept_owner`.
    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        let cap = auth::require_owner(&env, &caller)?;
        auth::propose(&env, &cap, &new_owner);

        events::publish_owner_transfer_proposed(&env, caller, new_owner);
        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        let old_owner = auth::accept(&env, &new_owner)?;

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);
        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        let cap = auth::require_owner(&env, &caller)?;
        let cancelled = auth::cancel(&env, &cap)?;

        events::publish_owner_transfer_cancelled(&env, caller, cancelled);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_migration;

#[cfg(test)]
mod test_owner;
