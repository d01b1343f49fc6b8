use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::{ContractError, RegistryError, ScheduleError};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const STAGE_COUNT: Symbol = symbol_short!("STG_CNT");

// Unbounded collections use tuple keys in persistent storage.
const POOL: Symbol = symbol_short!("POOL");
const STAGE: Symbol = symbol_short!("STAGE");
const USER: Symbol = symbol_short!("USER");

// ── Stored records ───────────────────────────────────────────────────────────

/// Ledger-wide configuration, loaded once per call and threaded through the
/// engine by reference.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalConfig {
    pub esm_token: Address,
    pub esg_token: Address,
    pub dev_address: Address,
    /// Dev fee on settled rewards, in parts per million.
    pub dev_fee_ppm: u32,
    /// Sum of every pool's weight. Never zero while a pool exists.
    pub total_weight: u64,
    pub migrator: Option<Address>,
}

/// A contiguous block range `[start_block, end_block]` (both inclusive)
/// emitting a fixed amount of each reward token per block.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardStage {
    pub start_block: u32,
    pub end_block: u32,
    pub esm_per_block: i128,
    pub esg_per_block: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub stake_token: Address,
    pub weight: u64,
    pub last_reward_block: u32,
    /// Cumulative ESM per staked unit, scaled by `accrual::SCALE`.
    pub acc_esm_per_share: i128,
    /// Cumulative ESG per staked unit, scaled by `accrual::SCALE`.
    pub acc_esg_per_share: i128,
    pub total_staked: i128,
}

/// A depositor's position in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    pub esm_debt: i128,
    pub esg_debt: i128,
}

// ── Owner ────────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&OWNER)
}

pub fn owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, candidate: &Address) {
    env.storage().instance().set(&PENDING_OWNER, candidate);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

// ── Config ───────────────────────────────────────────────────────────────────

pub fn config(env: &Env) -> Result<GlobalConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &GlobalConfig) {
    env.storage().instance().set(&CONFIG, config);
}

// ── Stages ───────────────────────────────────────────────────────────────────

pub fn stage_count(env: &Env) -> u32 {
    env.storage().instance().get(&STAGE_COUNT).unwrap_or(0)
}

pub fn stage(env: &Env, index: u32) -> Result<RewardStage, ScheduleError> {
    env.storage()
        .persistent()
        .get(&(STAGE, index))
        .ok_or(ScheduleError::StageNotFound)
}

/// Appends at `stage_count()`; ordering checks live in `schedule`.
pub fn push_stage(env: &Env, stage: &RewardStage) -> u32 {
    let index = stage_count(env);
    env.storage().persistent().set(&(STAGE, index), stage);
    env.storage()
        .instance()
        .set(&STAGE_COUNT, &index.saturating_add(1));
    index
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn pool(env: &Env, pool_id: u32) -> Result<PoolInfo, RegistryError> {
    env.storage()
        .persistent()
        .get(&(POOL, pool_id))
        .ok_or(RegistryError::PoolNotFound)
}

pub fn set_pool(env: &Env, pool_id: u32, pool: &PoolInfo) {
    env.storage().persistent().set(&(POOL, pool_id), pool);
}

pub fn push_pool(env: &Env, pool: &PoolInfo) -> u32 {
    let pool_id = pool_count(env);
    set_pool(env, pool_id, pool);
    env.storage()
        .instance()
        .set(&POOL_COUNT, &pool_id.saturating_add(1));
    pool_id
}

// ── Positions ────────────────────────────────────────────────────────────────

pub fn user_info(env: &Env, pool_id: u32, user: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&(USER, pool_id, user.clone()))
        .unwrap_or_default()
}

pub fn set_user_info(env: &Env, pool_id: u32, user: &Address, info: &UserInfo) {
    env.storage()
        .persistent()
        .set(&(USER, pool_id, user.clone()), info);
}
