//! Genetic operators on schedules.
//!
//! # Crossover
//!
//! Single-point crossover over the activity array. Positions `[0, k)` come
//! from parent 1, positions `[k, n)` from parent 2. Both parents must hold
//! the same activities in the same (id) order, since genes are matched by
//! position.
//!
//! # Mutation
//!
//! Picks one activity and re-draws every skill slot uniformly among the
//! capable resources that still leave the activity's other slots fillable,
//! never binding the same resource twice in the activity.
//!
//! Both operators leave timings stale. Callers re-time the child with
//! [`assign_timestamps`](crate::scheduler::assign_timestamps).
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine
//! Learning", Ch. 3

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::models::{ResourceId, Schedule};
use crate::scheduler::matching::SlotGraph;

/// Builds the child of a single-point crossover at `cut`.
///
/// `cut == 0` copies parent 2; `cut == n` copies parent 1.
///
/// # Errors
/// [`ScheduleError::OperatorContract`] if the parents differ in activity count
/// or order, or `cut > n`.
pub fn splice(parent1: &Schedule, parent2: &Schedule, cut: usize) -> Result<Schedule> {
    let n = parent1.activities().len();
    if parent2.activities().len() != n {
        return Err(ScheduleError::OperatorContract(format!(
            "crossover parents hold {} and {} activities",
            n,
            parent2.activities().len()
        )));
    }
    if cut > n {
        return Err(ScheduleError::OperatorContract(format!(
            "crossover cut {cut} beyond {n} activities"
        )));
    }

    let genes = parent1.activities()[..cut]
        .iter()
        .chain(&parent2.activities()[cut..])
        .cloned()
        .collect();
    parent1.with_activities(genes)
}

/// Single-point crossover with a uniformly drawn cut in `[0, n)`.
pub fn crossover<R: Rng>(parent1: &Schedule, parent2: &Schedule, rng: &mut R) -> Result<Schedule> {
    let n = parent1.activities().len();
    let cut = if n == 0 { 0 } else { rng.random_range(0..n) };
    splice(parent1, parent2, cut)
}

/// Re-draws the resource bindings of one random activity.
///
/// Activities without skill demand are valid targets and leave the schedule
/// unchanged.
///
/// # Errors
/// [`ScheduleError::InvalidInstance`] if the activity's slots cannot all be
/// bound to distinct capable resources. The previous bindings are kept.
pub fn mutate<R: Rng>(schedule: &mut Schedule, rng: &mut R) -> Result<()> {
    let n = schedule.activities().len();
    if n == 0 {
        return Ok(());
    }
    let idx = rng.random_range(0..n);
    let activity_id = schedule.activities()[idx].id;

    let graph = SlotGraph::new(&schedule.activities()[idx], schedule.resources());
    let mut taken: Vec<ResourceId> = Vec::with_capacity(graph.slots().len());
    for i in 0..graph.slots().len() {
        let candidates = graph.feasible_candidates(i, &taken);
        let Some(&resource_id) = candidates.choose(rng) else {
            warn!(activity_id, "no complete binding for skill slots");
            return Err(ScheduleError::InvalidInstance(format!(
                "skill demand of activity {activity_id} cannot be met by distinct capable resources"
            )));
        };
        taken.push(resource_id);
    }

    let previous = schedule.activities()[idx].required_skills.clone();
    schedule.activities_mut()[idx].clear_assignments();
    for (&slot, &resource_id) in graph.slots().iter().zip(&taken) {
        if let Err(e) = schedule.assign(activity_id, resource_id, slot) {
            schedule.activities_mut()[idx].required_skills = previous;
            return Err(e);
        }
    }
    Ok(())
}
