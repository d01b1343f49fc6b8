#![allow(clippy::unwrap_used)]

use soroban_sdk::{symbol_short, testutils::Address as _, Address, TryIntoVal};

use crate::events::OwnerTransferAcceptedEvent;
use crate::test::Setup;
use crate::ContractError;

#[test]
fn test_admin_calls_reject_non_owner() {
    let s = Setup::new();
    s.client.add_stage(&s.owner, &100, &199, &12, &6);
    let pool_id = s.client.add(&s.owner, &100, &s.stake_token(), &false);
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.client.try_add_stage(&stranger, &200, &299, &1, &1),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_add(&stranger, &100, &s.stake_token(), &false),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_set(&stranger, &pool_id, &5, &false),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_set_dev_address(&stranger, &stranger),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_set_migrator(&stranger, &stranger),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_migrate(&stranger, &pool_id),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_propose_owner(&stranger, &stranger),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(
        s.client.try_cancel_owner_transfer(&stranger),
        Err(Ok(ContractError::NotOwner))
    );

    assert_eq!(s.client.stage_count(), 1);
    assert_eq!(s.client.pool_count(), 1);
    assert_eq!(s.client.get_pool(&pool_id).weight, 100);
}

#[test]
fn test_two_step_owner_transfer() {
    let s = Setup::new();
    let successor = Address::generate(&s.env);

    s.client.propose_owner(&s.owner, &successor);
    assert_eq!(s.client.get_pending_owner(), Some(successor.clone()));
    // Nothing changes until the candidate accepts.
    assert_eq!(s.client.get_owner(), s.owner);

    s.client.accept_owner(&successor);
    let events = s.ledger_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, symbol_short!("OWN_ACPT"));
    let payload: OwnerTransferAcceptedEvent = events[0].1.try_into_val(&s.env).unwrap();
    assert_eq!(payload.old_owner, s.owner);
    assert_eq!(payload.new_owner, successor);

    assert_eq!(s.client.get_owner(), successor);
    assert_eq!(s.client.get_pending_owner(), None);

    // The old owner is locked out, the new one is in.
    assert_eq!(
        s.client.try_set_dev_fee(&s.owner, &1),
        Err(Ok(ContractError::NotOwner))
    );
    s.client.set_dev_fee(&successor, &1);
    assert_eq!(s.client.get_config().dev_fee_ppm, 1);
}

#[test]
fn test_accept_requires_the_proposed_address() {
    let s = Setup::new();
    let successor = Address::generate(&s.env);
    let impostor = Address::generate(&s.env);

    assert_eq!(
        s.client.try_accept_owner(&successor),
        Err(Ok(ContractError::NoPendingOwner))
    );

    s.client.propose_owner(&s.owner, &successor);
    assert_eq!(
        s.client.try_accept_owner(&impostor),
        Err(Ok(ContractError::NotOwner))
    );
    assert_eq!(s.client.get_owner(), s.owner);
}

#[test]
fn test_cancel_owner_transfer() {
    let s = Setup::new();
    let successor = Address::generate(&s.env);

    assert_eq!(
        s.client.try_cancel_owner_transfer(&s.owner),
        Err(Ok(ContractError::NoPendingOwner))
    );

    s.client.propose_owner(&s.owner, &successor);
    s.client.cancel_owner_transfer(&s.owner);
    assert_eq!(s.client.get_pending_owner(), None);
    assert_eq!(
        s.client.try_accept_owner(&successor),
        Err(Ok(ContractError::NoPendingOwner))
    );
}

#[test]
fn test_owner_actions_publish_events() {
    let s = Setup::new();
    let migrator = Address::generate(&s.env);

    s.client.set_migrator(&s.owner, &migrator);
    assert_eq!(s.ledger_events()[0].0, symbol_short!("MIGR_SET"));
    assert_eq!(s.client.get_config().migrator, Some(migrator));

    s.client.set_dev_fee(&s.owner, &10);
    assert_eq!(s.ledger_events()[0].0, symbol_short!("DEV_FEE"));

    s.client.add_stage(&s.owner, &100, &199, &12, &6);
    assert_eq!(s.ledger_events()[0].0, symbol_short!("STG_ADD"));

    let pool_id = s.client.add(&s.owner, &100, &s.stake_token(), &false);
    assert_eq!(s.ledger_events()[0].0, symbol_short!("POOL_ADD"));

    s.client.set(&s.owner, &pool_id, &60, &false);
    assert_eq!(s.ledger_events()[0].0, symbol_short!("POOL_SET"));
}
