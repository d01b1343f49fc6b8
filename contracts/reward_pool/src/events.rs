#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::Currency;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub esm_token: Address,
    pub esg_token: Address,
    pub dev_address: Address,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageAddedEvent {
    pub index: u32,
    pub start_block: u32,
    pub end_block: u32,
    pub esm_per_block: i128,
    pub esg_per_block: i128,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub stake_token: Address,
    pub weight: u64,
    pub total_weight: u64,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool_id: u32,
    pub old_weight: u64,
    pub new_weight: u64,
    pub total_weight: u64,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StakeDirection {
    Deposit,
    Withdraw,
    Emergency,
}

/// Fired whenever a non-zero amount of stake moves in or out of a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeChangedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub direction: StakeDirection,
    pub block: u32,
}

/// Fired per currency when a depositor actually receives rewards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub pool_id: u32,
    pub user: Address,
    pub currency: Currency,
    pub amount: i128,
    pub block: u32,
}

/// Fired per currency when the dev address actually receives a fee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeePaidEvent {
    pub pool_id: u32,
    pub currency: Currency,
    pub amount: i128,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DevFeeSetEvent {
    pub dev_fee_ppm: u32,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DevAddressSetEvent {
    pub dev_address: Address,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratorSetEvent {
    pub migrator: Address,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedEvent {
    pub pool_id: u32,
    pub old_token: Address,
    pub new_token: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when an ownership transfer is proposed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub block: u32,
}

/// Fired when an ownership transfer is accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub block: u32,
}

/// Fired when a pending ownership transfer is cancelled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    esm_token: Address,
    esg_token: Address,
    dev_address: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            esm_token,
            esg_token,
            dev_address,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_stage_added(
    env: &Env,
    index: u32,
    start_block: u32,
    end_block: u32,
    esm_per_block: i128,
    esg_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("STG_ADD"), index),
        StageAddedEvent {
            index,
            start_block,
            end_block,
            esm_per_block,
            esg_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    stake_token: Address,
    weight: u64,
    total_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            stake_token,
            weight,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_weight_set(
    env: &Env,
    pool_id: u32,
    old_weight: u64,
    new_weight: u64,
    total_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolWeightSetEvent {
            pool_id,
            old_weight,
            new_weight,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_stake_changed(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    direction: StakeDirection,
) {
    env.events().publish(
        (symbol_short!("STAKE"), pool_id, user.clone()),
        StakeChangedEvent {
            pool_id,
            user,
            amount,
            direction,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, pool_id: u32, user: Address, currency: Currency, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), pool_id, user.clone()),
        RewardPaidEvent {
            pool_id,
            user,
            currency,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_fee_paid(env: &Env, pool_id: u32, currency: Currency, amount: i128) {
    env.events().publish(
        (symbol_short!("FEE_PAID"), pool_id),
        FeePaidEvent {
            pool_id,
            currency,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_dev_fee_set(env: &Env, dev_fee_ppm: u32) {
    env.events().publish(
        (symbol_short!("DEV_FEE"),),
        DevFeeSetEvent {
            dev_fee_ppm,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_dev_address_set(env: &Env, dev_address: Address) {
    env.events().publish(
        (symbol_short!("DEV_ADDR"),),
        DevAddressSetEvent {
            dev_address,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_migrator_set(env: &Env, migrator: Address) {
    env.events().publish(
        (symbol_short!("MIGR_SET"),),
        MigratorSetEvent {
            migrator,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_migrated(
    env: &Env,
    pool_id: u32,
    old_token: Address,
    new_token: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("MIGRATED"), pool_id),
        MigratedEvent {
            pool_id,
            old_token,
            new_token,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            block: env.ledger().sequence(),
        },
    );
}
