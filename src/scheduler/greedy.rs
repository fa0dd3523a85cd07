//! Greedy time assignment.
//!
//! # Algorithm
//!
//! Given fixed activity → resource bindings, computes start times:
//!
//! 1. Reset every resource's finish time to 0 and drop all activity starts.
//! 2. Visit activities that gate at least one successor, in id order.
//! 3. Visit the remaining (leaf) activities, in id order.
//! 4. For each activity, `start = max(earliest_time, max finish of its bound
//!    resources)`; every bound resource then finishes at `start + duration`.
//!
//! Gating activities go first so successors see realistic predecessor finish
//! times before leaf activities compete for the same resources. The ordering
//! is a heuristic, not an optimality argument.
//!
//! The result depends only on the bindings, so the pass is idempotent.
//!
//! # Complexity
//! O(n · (p + s)) where n=activities, p=predecessors, s=slots per activity.

use crate::models::Schedule;

/// Recomputes all activity starts and resource finish times.
///
/// An activity without bound resources is placed at its earliest time and
/// does not touch any resource. Slots bound to unknown resource ids are
/// ignored here and reported by the skill constraint check.
pub fn assign_timestamps(schedule: &mut Schedule) {
    for act in schedule.activities_mut() {
        act.start = None;
    }
    for res in schedule.resources_mut() {
        res.finish = Some(0);
    }

    let n = schedule.activities().len();
    let (gating, leaves): (Vec<usize>, Vec<usize>) =
        (0..n).partition(|&i| schedule.has_successors(i));

    for idx in gating.into_iter().chain(leaves) {
        let floor = schedule.earliest_time_at(idx);
        place(schedule, idx, floor);
    }
}

/// Starts the activity at `idx` no earlier than `floor` or the finish of any
/// of its bound resources, then advances those resources to its finish.
pub(super) fn place(schedule: &mut Schedule, idx: usize, floor: i64) {
    let activity = &schedule.activities()[idx];
    let (id, duration) = (activity.id, activity.duration);
    let positions: Vec<usize> = activity
        .bound_resources()
        .into_iter()
        .filter_map(|r| schedule.resource_position(r))
        .collect();

    let start = positions
        .iter()
        .map(|&p| schedule.resources()[p].ready_time())
        .fold(floor, i64::max);

    schedule.activities_mut()[idx].start = Some(start);
    let resources = schedule.resources_mut();
    for p in positions {
        resources[p].finish = Some(start + duration);
        resources[p].current_activity = Some(id);
    }
}
