//! Constraint checking for candidate schedules.
//!
//! Four independent constraint classes, each reported as a violation count
//! (0 = satisfied):
//!
//! | Class | Rule |
//! |-------|------|
//! | Assignment | every skill demand has `assigned == required` |
//! | Conflict | overlapping activities never share a resource for the same skill type |
//! | Precedence | every activity starts at or after its earliest time |
//! | Skill | every bound resource is capable of its slot's skill type |
//!
//! Violations are a search signal, not an error: the GA moves through
//! infeasible states and uses [`number_of_conflicts`] as a penalty.
//!
//! # Conflict definition
//!
//! Activities `a` and `b` overlap when `a.start <= b.start < a.start + a.duration`
//! (or the same with roles swapped). They conflict when they overlap and, for
//! some skill type, the resource sets bound to their slots of that type
//! intersect. Each conflicting pair is counted once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{Activity, ActivityId, ResourceId, Schedule, SkillType};

/// Violation counts per constraint class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintReport {
    /// Skill demands not fully assigned.
    pub assignment: usize,
    /// Pairs of overlapping activities sharing a resource.
    pub conflict: usize,
    /// Activities starting before their earliest time (or unscheduled).
    pub precedence: usize,
    /// Slots bound to incapable or unknown resources.
    pub skill: usize,
}

impl ConstraintReport {
    /// Runs all four checks.
    pub fn check(schedule: &Schedule) -> Self {
        Self {
            assignment: validate_assignment_constraint(schedule),
            conflict: validate_conflict_constraint(schedule),
            precedence: validate_precedence_constraint(schedule),
            skill: validate_skill_constraint(schedule),
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.assignment + self.conflict + self.precedence + self.skill
    }

    /// Whether every count is zero.
    pub fn is_feasible(&self) -> bool {
        self.total() == 0
    }
}

/// Whether the schedule satisfies all four constraint classes.
pub fn validate(schedule: &Schedule) -> bool {
    ConstraintReport::check(schedule).is_feasible()
}

/// Total violation count across all four classes.
pub fn number_of_conflicts(schedule: &Schedule) -> usize {
    ConstraintReport::check(schedule).total()
}

/// Counts skill demands whose assigned slot count differs from `required`.
pub fn validate_assignment_constraint(schedule: &Schedule) -> usize {
    schedule
        .activities()
        .iter()
        .flat_map(|a| a.required_skills.iter())
        .filter(|req| !req.is_satisfied())
        .count()
}

/// Counts pairs of overlapping activities that share a resource for some
/// skill type.
pub fn validate_conflict_constraint(schedule: &Schedule) -> usize {
    conflicting_pairs(schedule).len()
}

/// Counts activities that are unscheduled or start before their earliest time.
pub fn validate_precedence_constraint(schedule: &Schedule) -> usize {
    schedule
        .activities()
        .iter()
        .filter(|a| a.start.map_or(true, |s| s < schedule.earliest_time(a)))
        .count()
}

/// Counts slots bound to a resource that is unknown or lacks the skill.
pub fn validate_skill_constraint(schedule: &Schedule) -> usize {
    schedule
        .activities()
        .iter()
        .flat_map(|a| a.required_skills.iter())
        .flat_map(|req| req.slots.iter())
        .filter_map(|slot| slot.resource.map(|r| (r, slot.skill_type)))
        .filter(|&(r, t)| !schedule.resource(r).is_some_and(|res| res.is_capable_of(t)))
        .count()
}

/// Per-activity resource sets, indexed by skill type.
fn resource_sets(schedule: &Schedule, activity: &Activity) -> Vec<BTreeSet<ResourceId>> {
    (0..schedule.num_skills())
        .map(|t| activity.resources_for_type(t))
        .collect()
}

/// Conflicting activity pairs `(a, b, resource, skill_type)` with `a` before `b`
/// in schedule order. One entry per pair, reporting the first shared resource.
fn conflicting_pairs(
    schedule: &Schedule,
) -> Vec<(ActivityId, ActivityId, ResourceId, SkillType)> {
    let activities = schedule.activities();
    let sets: Vec<Vec<BTreeSet<ResourceId>>> = activities
        .iter()
        .map(|a| resource_sets(schedule, a))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..activities.len() {
        for j in (i + 1)..activities.len() {
            let (a, b) = (&activities[i], &activities[j]);
            if !(a.overlaps_start_of(b) || b.overlaps_start_of(a)) {
                continue;
            }
            let shared = sets[i]
                .iter()
                .zip(sets[j].iter())
                .enumerate()
                .find_map(|(t, (sa, sb))| sa.intersection(sb).next().map(|&r| (r, t)));
            if let Some((resource, skill_type)) = shared {
                pairs.push((a.id, b.id, resource, skill_type));
            }
        }
    }
    pairs
}

/// Kind of a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A skill demand is not fully assigned.
    UnassignedSkill,
    /// Two overlapping activities share a resource.
    ResourceConflict,
    /// Activity starts before a predecessor has finished, or is unscheduled.
    PrecedenceViolation,
    /// Resource lacks the skill of the slot it occupies.
    SkillMismatch,
}

/// A single constraint violation, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Offending activity.
    pub activity_id: ActivityId,
    /// Second activity of a conflicting pair.
    pub other_activity_id: Option<ActivityId>,
    /// Resource involved, if any.
    pub resource_id: Option<ResourceId>,
    /// Skill type involved, if any.
    pub skill_type: Option<SkillType>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation_type {
            ViolationType::UnassignedSkill => write!(
                f,
                "activity {} has unassigned units of skill {}",
                self.activity_id,
                self.skill_type.unwrap_or_default()
            ),
            ViolationType::ResourceConflict => write!(
                f,
                "activities {} and {} overlap on resource {}",
                self.activity_id,
                self.other_activity_id.unwrap_or_default(),
                self.resource_id.unwrap_or_default()
            ),
            ViolationType::PrecedenceViolation => write!(
                f,
                "activity {} starts before its predecessors finish",
                self.activity_id
            ),
            ViolationType::SkillMismatch => write!(
                f,
                "resource {} cannot provide skill {} for activity {}",
                self.resource_id.unwrap_or_default(),
                self.skill_type.unwrap_or_default(),
                self.activity_id
            ),
        }
    }
}

/// Lists every violation in the schedule.
///
/// The number of entries of each type equals the matching count in
/// [`ConstraintReport::check`].
pub fn violations(schedule: &Schedule) -> Vec<Violation> {
    let mut out = Vec::new();

    for act in schedule.activities() {
        for req in act.required_skills.iter().filter(|r| !r.is_satisfied()) {
            out.push(Violation {
                violation_type: ViolationType::UnassignedSkill,
                activity_id: act.id,
                other_activity_id: None,
                resource_id: None,
                skill_type: Some(req.skill_type),
            });
        }
    }

    for (a, b, resource, skill_type) in conflicting_pairs(schedule) {
        out.push(Violation {
            violation_type: ViolationType::ResourceConflict,
            activity_id: a,
            other_activity_id: Some(b),
            resource_id: Some(resource),
            skill_type: Some(skill_type),
        });
    }

    for act in schedule.activities() {
        if act.start.map_or(true, |s| s < schedule.earliest_time(act)) {
            out.push(Violation {
                violation_type: ViolationType::PrecedenceViolation,
                activity_id: act.id,
                other_activity_id: None,
                resource_id: None,
                skill_type: None,
            });
        }
    }

    for act in schedule.activities() {
        for slot in act.required_skills.iter().flat_map(|r| r.slots.iter()) {
            let Some(r) = slot.resource else { continue };
            if !schedule
                .resource(r)
                .is_some_and(|res| res.is_capable_of(slot.skill_type))
            {
                out.push(Violation {
                    violation_type: ViolationType::SkillMismatch,
                    activity_id: act.id,
                    other_activity_id: None,
                    resource_id: Some(r),
                    skill_type: Some(slot.skill_type),
                });
            }
        }
    }

    out
}
