//! Randomized construction of a starting schedule.
//!
//! # Algorithm
//!
//! For each activity in id order:
//! 1. Tentative start = earliest time allowed by precedence.
//! 2. For each skill slot, gather capable resources not already serving this
//!    activity that still leave the remaining slots fillable (see
//!    [`SlotGraph`]). Pick uniformly among those free at the tentative start.
//! 3. If none is free, pick the busy candidate that frees up first (random
//!    among ties) and shift the tentative start to its finish time.
//! 4. Place the activity at `max(earliest, finish of its resources)` and
//!    advance those resources to the activity's finish.
//!
//! The outcome is structurally valid: every slot is bound to a capable
//! resource and no resource appears twice in one activity.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{trace, warn};

use super::greedy::place;
use super::matching::SlotGraph;
use crate::error::{Result, ScheduleError};
use crate::models::{ResourceId, Schedule};

/// Rebuilds `schedule` from scratch with random, availability-aware bindings.
///
/// # Errors
/// [`ScheduleError::InvalidInstance`] if some activity's slots cannot all be
/// bound to distinct capable resources (the instance cannot be satisfied as
/// stated).
pub fn initialize_schedule<R: Rng>(schedule: &mut Schedule, rng: &mut R) -> Result<()> {
    schedule.clear(true);

    for idx in 0..schedule.activities().len() {
        let activity_id = schedule.activities()[idx].id;
        let mut start = schedule.earliest_time_at(idx);

        let graph = SlotGraph::new(&schedule.activities()[idx], schedule.resources());
        if !graph.is_satisfiable() {
            warn!(activity_id, "no complete binding for skill slots");
            return Err(ScheduleError::InvalidInstance(format!(
                "skill demand of activity {activity_id} cannot be met by distinct capable resources"
            )));
        }

        let mut taken: Vec<ResourceId> = Vec::with_capacity(graph.slots().len());
        for (i, &slot) in graph.slots().iter().enumerate() {
            let candidates: Vec<(ResourceId, i64)> = graph
                .feasible_candidates(i, &taken)
                .into_iter()
                .filter_map(|id| schedule.resource(id).map(|r| (id, r.ready_time())))
                .collect();

            let free: Vec<ResourceId> = candidates
                .iter()
                .filter(|&&(_, ready)| ready <= start)
                .map(|&(id, _)| id)
                .collect();

            let chosen = match free.choose(rng) {
                Some(&id) => id,
                None => {
                    let Some((id, ready)) = earliest_finishing(&candidates, rng) else {
                        return Err(ScheduleError::InvalidInstance(format!(
                            "no capable resource left for activity {activity_id}"
                        )));
                    };
                    trace!(activity_id, resource_id = id, ready, "delaying activity for busy resource");
                    start = start.max(ready);
                    id
                }
            };

            schedule.assign(activity_id, chosen, slot)?;
            taken.push(chosen);
        }

        place(schedule, idx, start);
    }

    Ok(())
}

/// Busy candidate with the smallest ready time, random among ties.
fn earliest_finishing<R: Rng>(
    candidates: &[(ResourceId, i64)],
    rng: &mut R,
) -> Option<(ResourceId, i64)> {
    let min_ready = candidates.iter().map(|&(_, r)| r).min()?;
    let ties: Vec<(ResourceId, i64)> = candidates
        .iter()
        .copied()
        .filter(|&(_, r)| r == min_ready)
        .collect();
    ties.choose(rng).copied()
}
