//! Append-only reward schedule.
//!
//! Stages tile the block domain without gaps: every stage after the first
//! starts exactly one block after its predecessor ends. Lookups are inclusive
//! at both ends, so `total_rewards(b, b)` is the emission of block `b` alone.

use soroban_sdk::Env;

use crate::errors::{MathError, ScheduleError};
use crate::storage::{self, RewardStage};
use crate::RewardAmounts;

/// Validate `stage` against the current tail and append it.
pub fn push(env: &Env, stage: RewardStage) -> Result<u32, ScheduleError> {
    let tail = match storage::stage_count(env) {
        0 => None,
        n => Some(storage::stage(env, n - 1)?),
    };
    validate(tail.as_ref(), &stage)?;
    Ok(storage::push_stage(env, &stage))
}

/// Start of the whole schedule, if any stage has been added.
pub fn first_start(env: &Env) -> Option<u32> {
    if storage::stage_count(env) == 0 {
        return None;
    }
    storage::stage(env, 0).ok().map(|s| s.start_block)
}

/// Total emission over the inclusive block range `[from, to]`.
pub fn total_rewards(env: &Env, from: u32, to: u32) -> Result<RewardAmounts, MathError> {
    let count = storage::stage_count(env);
    let mut total = RewardAmounts::zero();
    for index in 0..count {
        let Ok(stage) = storage::stage(env, index) else {
            break;
        };
        // Stages are sorted, nothing later can overlap.
        if stage.start_block > to {
            break;
        }
        total = total.checked_add(&stage_overlap(&stage, from, to)?)?;
    }
    Ok(total)
}

pub(crate) fn validate(tail: Option<&RewardStage>, stage: &RewardStage) -> Result<(), ScheduleError> {
    if stage.end_block < stage.start_block {
        return Err(ScheduleError::InvertedRange);
    }
    if stage.esm_per_block < 0 || stage.esg_per_block < 0 {
        return Err(ScheduleError::NegativeRate);
    }
    if let Some(prev) = tail {
        if Some(stage.start_block) != prev.end_block.checked_add(1) {
            return Err(ScheduleError::NotAdjacent);
        }
    }
    Ok(())
}

/// Emission of `stage` restricted to `[from, to]`.
pub(crate) fn stage_overlap(
    stage: &RewardStage,
    from: u32,
    to: u32,
) -> Result<RewardAmounts, MathError> {
    let lo = from.max(stage.start_block);
    let hi = to.min(stage.end_block);
    if hi < lo {
        return Ok(RewardAmounts::zero());
    }
    let blocks = i128::from(hi - lo) + 1;
    Ok(RewardAmounts {
        esm: blocks
            .checked_mul(stage.esm_per_block)
            .ok_or(MathError::Overflow)?,
        esg: blocks
            .checked_mul(stage.esg_per_block)
            .ok_or(MathError::Overflow)?,
    })
}
