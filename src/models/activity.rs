//! Activity model.
//!
//! An activity is the smallest schedulable unit of work. It has a fixed
//! duration, a set of predecessor activities that must finish first, and one
//! [`RequiredSkill`] per skill type it needs.
//!
//! # Timing
//!
//! `start` is `None` until the activity has been scheduled. Once scheduled,
//! the activity occupies `[start, start + duration)`.
//!
//! # Reference
//! Bellenguez-Morineau & Néron (2007), "A Branch-and-Bound method for solving
//! Multi-Skill Project Scheduling Problem"

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ActivityId, RequiredSkill, ResourceId, SkillType};

/// An activity to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier (1-based).
    pub id: ActivityId,
    /// Processing time in time units.
    pub duration: i64,
    /// IDs of activities that must finish before this one starts.
    pub predecessors: BTreeSet<ActivityId>,
    /// Skill demand, one entry per skill type.
    pub required_skills: Vec<RequiredSkill>,
    /// Scheduled start time. `None` = unscheduled.
    pub start: Option<i64>,
}

/// Position of one skill slot inside an activity.
///
/// `requirement` indexes `Activity::required_skills`, `slot` indexes that
/// requirement's `slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    /// Index into `required_skills`.
    pub requirement: usize,
    /// Index into the requirement's slots.
    pub slot: usize,
}

impl SlotRef {
    /// Creates a slot reference.
    pub fn new(requirement: usize, slot: usize) -> Self {
        Self { requirement, slot }
    }
}

impl Activity {
    /// Creates an unscheduled activity with no demand and no predecessors.
    pub fn new(id: ActivityId, duration: i64) -> Self {
        Self {
            id,
            duration,
            predecessors: BTreeSet::new(),
            required_skills: Vec::new(),
            start: None,
        }
    }

    /// Adds a predecessor activity ID.
    pub fn with_predecessor(mut self, predecessor: ActivityId) -> Self {
        self.predecessors.insert(predecessor);
        self
    }

    /// Adds a demand of `required` units of `skill_type`.
    pub fn with_skill(mut self, skill_type: SkillType, required: usize) -> Self {
        self.required_skills.push(RequiredSkill::new(skill_type, required));
        self
    }

    /// Finish time (`start + duration`), `None` while unscheduled.
    #[inline]
    pub fn finish(&self) -> Option<i64> {
        self.start.map(|s| s + self.duration)
    }

    /// Whether the activity needs at least one resource.
    pub fn requires_skills(&self) -> bool {
        self.required_skills.iter().any(|r| r.required > 0)
    }

    /// Positions of every slot with non-zero demand, in declaration order.
    pub fn slot_refs(&self) -> Vec<SlotRef> {
        self.required_skills
            .iter()
            .enumerate()
            .flat_map(|(r, req)| (0..req.slots.len()).map(move |s| SlotRef::new(r, s)))
            .collect()
    }

    /// Resources bound to any slot, deduplicated, in first-seen order.
    pub fn bound_resources(&self) -> Vec<ResourceId> {
        let mut seen = Vec::new();
        for id in self
            .required_skills
            .iter()
            .flat_map(|r| r.slots.iter())
            .filter_map(|s| s.resource)
        {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    /// Resources bound to slots of `skill_type`.
    pub fn resources_for_type(&self, skill_type: SkillType) -> BTreeSet<ResourceId> {
        self.required_skills
            .iter()
            .filter(|r| r.skill_type == skill_type)
            .flat_map(|r| r.slots.iter())
            .filter_map(|s| s.resource)
            .collect()
    }

    /// Whether `resource` already occupies a slot of this activity.
    pub fn uses_resource(&self, resource: ResourceId) -> bool {
        self.required_skills
            .iter()
            .flat_map(|r| r.slots.iter())
            .any(|s| s.resource == Some(resource))
    }

    /// Unbinds every slot.
    pub fn clear_assignments(&mut self) {
        for req in &mut self.required_skills {
            req.clear();
        }
    }

    /// Whether `[start, finish)` of `self` contains the start of `other`.
    ///
    /// Order-sensitive; callers test both directions. Unscheduled activities
    /// never overlap.
    pub fn overlaps_start_of(&self, other: &Activity) -> bool {
        match (self.start, other.start) {
            (Some(a), Some(b)) => a <= b && b < a + self.duration,
            _ => false,
        }
    }
}
