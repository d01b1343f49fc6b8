use soroban_sdk::{Address, Env};

use crate::errors::{AuthError, ContractError};
use crate::storage;

/// Proof that the current invocation was authorised by the owner.
///
/// Only [`require_owner`] can build one; owner-only internals take it by
/// reference instead of re-checking.
pub struct OwnerCap {
    _private: (),
}

/// Demand the caller's signature and check it against the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<OwnerCap, ContractError> {
    caller.require_auth();
    let owner = storage::owner(env)?;
    if *caller != owner {
        return Err(AuthError::NotOwner.into());
    }
    Ok(OwnerCap { _private: () })
}

/// Record `candidate` as the proposed next owner.
pub fn propose(env: &Env, _cap: &OwnerCap, candidate: &Address) {
    storage::set_pending_owner(env, candidate);
}

/// Complete a two-step transfer. Returns the previous owner.
pub fn accept(env: &Env, candidate: &Address) -> Result<Address, ContractError> {
    candidate.require_auth();
    let pending = storage::pending_owner(env).ok_or(AuthError::NoPendingOwner)?;
    if *candidate != pending {
        return Err(AuthError::NotOwner.into());
    }
    let previous = storage::owner(env)?;
    storage::set_owner(env, candidate);
    storage::clear_pending_owner(env);
    Ok(previous)
}

/// Drop the pending proposal. Returns the address that had been proposed.
pub fn cancel(env: &Env, _cap: &OwnerCap) -> Result<Address, ContractError> {
    let pending = storage::pending_owner(env).ok_or(AuthError::NoPendingOwner)?;
    storage::clear_pending_owner(env);
    Ok(pending)
}
