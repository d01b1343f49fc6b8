#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, Symbol,
};

use crate::test::Setup;
use crate::{ContractError, RewardAmounts};

const NEW_TOKEN: Symbol = symbol_short!("NEW_TKN");
const SHORTFALL: Symbol = symbol_short!("SHORT");

/// Pulls the old stake token and hands back `amount - shortfall` of the
/// configured token: minted when the migrator administers it, returned
/// as-is when it is the old token, nothing otherwise.
#[contract]
pub struct MockMigrator;

#[contractimpl]
impl MockMigrator {
    pub fn setup(env: Env, new_token: Address, shortfall: i128) {
        env.storage().instance().set(&NEW_TOKEN, &new_token);
        env.storage().instance().set(&SHORTFALL, &shortfall);
    }

    pub fn migrate(env: Env, from: Address, token: Address, amount: i128) -> Address {
        let this = env.current_contract_address();
        TokenClient::new(&env, &token).transfer_from(&this, &from, &this, &amount);

        let new_token: Address = env.storage().instance().get(&NEW_TOKEN).unwrap();
        let shortfall: i128 = env.storage().instance().get(&SHORTFALL).unwrap();
        if new_token == token {
            TokenClient::new(&env, &token).transfer(&this, &from, &(amount - shortfall));
        } else {
            let asset = StellarAssetClient::new(&env, &new_token);
            if asset.admin() == this {
                asset.mint(&from, &(amount - shortfall));
            }
        }
        new_token
    }
}

/// A migrator contract plus the token it mints. Returns `(migrator, new_token)`.
fn deploy_migrator(s: &Setup, shortfall: i128) -> (Address, Address) {
    let migrator = s.env.register(MockMigrator, ());
    let new_token = s
        .env
        .register_stellar_asset_contract_v2(migrator.clone())
        .address();
    MockMigratorClient::new(&s.env, &migrator).setup(&new_token, &shortfall);
    (migrator, new_token)
}

/// A migrator that answers with `token` instead of a fresh asset.
fn deploy_migrator_returning(s: &Setup, token: &Address) -> Address {
    let migrator = s.env.register(MockMigrator, ());
    MockMigratorClient::new(&s.env, &migrator).setup(token, &0);
    migrator
}

#[test]
fn test_migrate_without_migrator_fails() {
    let s = Setup::new();
    let (pool_id, _) = s.single_pool(100, 199, 12, 6, 100);
    assert_eq!(
        s.client.try_migrate(&s.owner, &pool_id),
        Err(Ok(ContractError::NoMigrator))
    );
}

#[test]
fn test_migrate_swaps_stake_token() {
    let s = Setup::new();
    let (pool_id, old_lp) = s.single_pool(100, 299, 12, 6, 100);
    let alice = s.account_with(&old_lp, 1_000);
    s.at(90);
    s.client.deposit(&alice, &pool_id, &100);

    let (migrator, new_lp) = deploy_migrator(&s, 0);
    s.client.set_migrator(&s.owner, &migrator);

    s.at(110);
    assert_eq!(s.client.migrate(&s.owner, &pool_id), new_lp);
    assert_eq!(s.ledger_events().last().unwrap().0, symbol_short!("MIGRATED"));

    let pool = s.client.get_pool(&pool_id);
    assert_eq!(pool.stake_token, new_lp);
    assert_eq!(pool.total_staked, 100);
    assert_eq!(s.balance(&old_lp, &s.contract_id), 0);
    assert_eq!(s.balance(&old_lp, &migrator), 100);
    assert_eq!(s.balance(&new_lp, &s.contract_id), 100);

    // Rewards keep accruing and withdrawals pay out the new token.
    s.at(120);
    assert_eq!(
        s.client.withdraw(&alice, &pool_id, &100),
        RewardAmounts { esm: 240, esg: 120 }
    );
    assert_eq!(s.balance(&new_lp, &alice), 100);
    assert_eq!(s.balance(&old_lp, &alice), 900);
}

#[test]
fn test_migrate_rejects_short_delivery() {
    let s = Setup::new();
    let (pool_id, old_lp) = s.single_pool(100, 299, 12, 6, 100);
    let alice = s.account_with(&old_lp, 1_000);
    s.client.deposit(&alice, &pool_id, &100);

    let (migrator, _) = deploy_migrator(&s, 1);
    s.client.set_migrator(&s.owner, &migrator);

    assert_eq!(
        s.client.try_migrate(&s.owner, &pool_id),
        Err(Ok(ContractError::BadMigration))
    );
    // Rolled back in full.
    assert_eq!(s.client.get_pool(&pool_id).stake_token, old_lp);
    assert_eq!(s.balance(&old_lp, &s.contract_id), 100);
}

#[test]
fn test_migrate_rejects_old_or_reward_token() {
    let s = Setup::new();
    let (pool_id, old_lp) = s.single_pool(100, 299, 12, 6, 100);
    let alice = s.account_with(&old_lp, 1_000);
    s.client.deposit(&alice, &pool_id, &100);

    for returned in [old_lp.clone(), s.esm.clone(), s.esg.clone()] {
        let migrator = deploy_migrator_returning(&s, &returned);
        s.client.set_migrator(&s.owner, &migrator);
        assert_eq!(
            s.client.try_migrate(&s.owner, &pool_id),
            Err(Ok(ContractError::BadMigration))
        );
        assert_eq!(s.client.get_pool(&pool_id).stake_token, old_lp);
        assert_eq!(s.balance(&old_lp, &s.contract_id), 100);
    }
}

#[test]
fn test_migrate_leaves_shared_stake_with_other_pool() {
    let s = Setup::new();
    let (first, lp) = s.single_pool(100, 299, 12, 6, 100);
    let second = s.client.add(&s.owner, &100, &lp, &false);
    let alice = s.account_with(&lp, 1_000);
    let bob = s.account_with(&lp, 1_000);
    s.at(90);
    s.client.deposit(&alice, &first, &100);
    s.client.deposit(&bob, &second, &200);

    let (migrator, new_lp) = deploy_migrator(&s, 0);
    s.client.set_migrator(&s.owner, &migrator);

    s.at(110);
    assert_eq!(s.client.migrate(&s.owner, &first), new_lp);
    assert_eq!(s.balance(&lp, &migrator), 100);
    assert_eq!(s.balance(&lp, &s.contract_id), 200);
    assert_eq!(s.balance(&new_lp, &s.contract_id), 100);
    assert_eq!(s.client.get_pool(&second).stake_token, lp);

    s.client.withdraw(&bob, &second, &200);
    assert_eq!(s.balance(&lp, &bob), 1_000);
    s.client.withdraw(&alice, &first, &100);
    assert_eq!(s.balance(&new_lp, &alice), 100);
    assert_eq!(s.balance(&lp, &s.contract_id), 0);
}

#[test]
fn test_migrate_into_token_another_pool_stakes() {
    let s = Setup::new();
    let (first, old_lp) = s.single_pool(100, 299, 12, 6, 100);
    let (migrator, new_lp) = deploy_migrator(&s, 0);
    let second = s.client.add(&s.owner, &100, &new_lp, &false);
    let alice = s.account_with(&old_lp, 1_000);
    let bob = s.account_with(&new_lp, 1_000);
    s.client.deposit(&alice, &first, &100);
    s.client.deposit(&bob, &second, &200);
    s.client.set_migrator(&s.owner, &migrator);

    assert_eq!(s.client.migrate(&s.owner, &first), new_lp);
    assert_eq!(s.balance(&new_lp, &s.contract_id), 300);
    assert_eq!(s.client.get_pool(&first).total_staked, 100);
    assert_eq!(s.client.get_pool(&second).total_staked, 200);
}

#[test]
fn test_migrate_unknown_pool() {
    let s = Setup::new();
    s.client.set_migrator(&s.owner, &Address::generate(&s.env));
    assert_eq!(
        s.client.try_migrate(&s.owner, &4),
        Err(Ok(ContractError::PoolNotFound))
    );
}
