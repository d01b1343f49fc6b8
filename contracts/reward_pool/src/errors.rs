//! Error codes returned by the reward pool.
//!
//! Every entry point returns [`ContractError`]. The component modules report
//! their own narrow kinds ([`ScheduleError`], [`RegistryError`],
//! [`LedgerError`], [`AuthError`], [`MathError`]) and `?` widens them.
//!
//! # Code ranges
//! | Range   | Purpose                        |
//! |---------|--------------------------------|
//! | 1 – 9   | Lifecycle / initialisation     |
//! | 10 – 19 | Owner authorisation            |
//! | 20 – 29 | Reward schedule                |
//! | 30 – 39 | Pool registry                  |
//! | 40 – 49 | Deposits, fees and migration   |
//! | 50 – 59 | Arithmetic                     |

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// ESM and ESG must be distinct token contracts.
    TokensIdentical = 3,

    // ── Auth (10–19) ─────────────────────────────────────────
    NotOwner = 10,
    NoPendingOwner = 11,

    // ── Schedule (20–29) ─────────────────────────────────────
    /// A new stage must start exactly one block after the previous one ends.
    NotAdjacent = 20,
    InvertedRange = 21,
    NegativeRate = 22,
    StageNotFound = 23,

    // ── Registry (30–39) ─────────────────────────────────────
    /// The total weight across all pools would drop to zero.
    ZeroWeight = 30,
    PoolNotFound = 31,
    RewardTokenNotStakeable = 32,

    // ── Ledger (40–49) ───────────────────────────────────────
    InsufficientStake = 40,
    InvalidAmount = 41,
    InvalidFee = 42,
    NoMigrator = 43,
    /// The migrator did not hand back exactly the balance it was given.
    BadMigration = 44,

    // ── Arithmetic (50–59) ───────────────────────────────────
    MathOverflow = 50,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    NotAdjacent,
    InvertedRange,
    NegativeRate,
    StageNotFound,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    ZeroWeight,
    PoolNotFound,
    RewardTokenNotStakeable,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LedgerError {
    InsufficientStake,
    InvalidAmount,
    InvalidFee,
    NoMigrator,
    BadMigration,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AuthError {
    NotOwner,
    NoPendingOwner,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    Overflow,
}

impl From<ScheduleError> for ContractError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::NotAdjacent => ContractError::NotAdjacent,
            ScheduleError::InvertedRange => ContractError::InvertedRange,
            ScheduleError::NegativeRate => ContractError::NegativeRate,
            ScheduleError::StageNotFound => ContractError::StageNotFound,
        }
    }
}

impl From<RegistryError> for ContractError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ZeroWeight => ContractError::ZeroWeight,
            RegistryError::PoolNotFound => ContractError::PoolNotFound,
            RegistryError::RewardTokenNotStakeable => ContractError::RewardTokenNotStakeable,
        }
    }
}

impl From<LedgerError> for ContractError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientStake => ContractError::InsufficientStake,
            LedgerError::InvalidAmount => ContractError::InvalidAmount,
            LedgerError::InvalidFee => ContractError::InvalidFee,
            LedgerError::NoMigrator => ContractError::NoMigrator,
            LedgerError::BadMigration => ContractError::BadMigration,
        }
    }
}

impl From<AuthError> for ContractError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotOwner => ContractError::NotOwner,
            AuthError::NoPendingOwner => ContractError::NoPendingOwner,
        }
    }
}

impl From<MathError> for ContractError {
    fn from(_: MathError) -> Self {
        ContractError::MathOverflow
    }
}
