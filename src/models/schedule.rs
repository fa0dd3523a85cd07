//! Schedule aggregate.
//!
//! A [`Schedule`] is both the problem definition (durations, precedence,
//! skill demand, resource capabilities) and one candidate solution
//! (slot assignments and timings). Activities and resources live in
//! position-stable vectors with id → index maps built once at construction,
//! so lookups inside the hot loops are O(1).
//!
//! `Clone` is a deep copy: activities (with their slot arrays) and resources
//! are duplicated, so mutating a copy never touches the original.

use serde::Serialize;
use std::collections::HashMap;

use super::{Activity, ActivityId, Resource, ResourceId, SkillType, SlotRef};
use crate::error::{Result, ScheduleError};

/// Project definition plus one candidate assignment/timing.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    activities: Vec<Activity>,
    resources: Vec<Resource>,
    num_skills: usize,
    has_successors: Vec<bool>,
    #[serde(skip)]
    activity_index: HashMap<ActivityId, usize>,
    #[serde(skip)]
    resource_index: HashMap<ResourceId, usize>,
}

impl Schedule {
    /// Builds a schedule from its parts.
    ///
    /// `has_successors[i]` is derived: true iff activity `i` appears as a
    /// predecessor of another activity. Input integrity is the caller's
    /// concern (see [`crate::validation::validate_instance`]).
    pub fn new(num_skills: usize, activities: Vec<Activity>, resources: Vec<Resource>) -> Self {
        let activity_index: HashMap<ActivityId, usize> = activities
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect();
        let resource_index = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();

        let mut has_successors = vec![false; activities.len()];
        for act in &activities {
            for pred in &act.predecessors {
                if let Some(&idx) = activity_index.get(pred) {
                    has_successors[idx] = true;
                }
            }
        }

        Self {
            activities,
            resources,
            num_skills,
            has_successors,
            activity_index,
            resource_index,
        }
    }

    /// Builds a sibling schedule that shares this one's resources and
    /// metadata but carries `activities` instead.
    ///
    /// The replacement must list the same activity ids in the same order;
    /// resource scheduling state is copied as-is and must be recomputed.
    pub fn with_activities(&self, activities: Vec<Activity>) -> Result<Self> {
        if activities.len() != self.activities.len() {
            return Err(ScheduleError::OperatorContract(format!(
                "activity array length {} does not match schedule length {}",
                activities.len(),
                self.activities.len()
            )));
        }
        if let Some((pos, act)) = activities
            .iter()
            .enumerate()
            .find(|(i, a)| a.id != self.activities[*i].id)
        {
            return Err(ScheduleError::OperatorContract(format!(
                "activity {} at position {} breaks the shared id ordering (expected {})",
                act.id, pos, self.activities[pos].id
            )));
        }

        Ok(Self {
            activities,
            resources: self.resources.clone(),
            num_skills: self.num_skills,
            has_successors: self.has_successors.clone(),
            activity_index: self.activity_index.clone(),
            resource_index: self.resource_index.clone(),
        })
    }

    /// Number of skill types in the project.
    pub fn num_skills(&self) -> usize {
        self.num_skills
    }

    /// Activities in their fixed (id) order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Mutable activities. Callers must not change ids.
    pub fn activities_mut(&mut self) -> &mut [Activity] {
        &mut self.activities
    }

    /// Resources in their fixed order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Mutable resources. Callers must not change ids.
    pub fn resources_mut(&mut self) -> &mut [Resource] {
        &mut self.resources
    }

    /// Successor flag per activity position.
    pub fn successor_table(&self) -> &[bool] {
        &self.has_successors
    }

    /// Whether the activity at `index` gates at least one other activity.
    pub fn has_successors(&self, index: usize) -> bool {
        self.has_successors.get(index).copied().unwrap_or(false)
    }

    /// Position of an activity id.
    pub fn activity_position(&self, id: ActivityId) -> Option<usize> {
        self.activity_index.get(&id).copied()
    }

    /// Position of a resource id.
    pub fn resource_position(&self, id: ResourceId) -> Option<usize> {
        self.resource_index.get(&id).copied()
    }

    /// Finds an activity by id.
    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activity_position(id).map(|i| &self.activities[i])
    }

    /// Finds an activity by id (mutable).
    pub fn activity_mut(&mut self, id: ActivityId) -> Option<&mut Activity> {
        self.activity_position(id).map(|i| &mut self.activities[i])
    }

    /// Finds a resource by id.
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resource_position(id).map(|i| &self.resources[i])
    }

    /// Finds a resource by id (mutable).
    pub fn resource_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resource_position(id).map(|i| &mut self.resources[i])
    }

    /// Earliest start permitted by precedence.
    ///
    /// `max(pred.finish + 1)` over scheduled predecessors, 0 without any.
    /// Always computed from current predecessor timings.
    pub fn earliest_time(&self, activity: &Activity) -> i64 {
        activity
            .predecessors
            .iter()
            .filter_map(|&p| self.activity(p).and_then(Activity::finish))
            .map(|finish| finish + 1)
            .max()
            .unwrap_or(0)
    }

    /// [`earliest_time`](Self::earliest_time) for the activity at `index`.
    pub fn earliest_time_at(&self, index: usize) -> i64 {
        self.earliest_time(&self.activities[index])
    }

    /// Binds `resource_id` to the slot `slot` of `activity_id`.
    ///
    /// Records the activity as the resource's current activity. Fails with
    /// [`ScheduleError::InvalidAssignment`] if the resource lacks the slot's
    /// skill type; the slot is left untouched in that case.
    pub fn assign(
        &mut self,
        activity_id: ActivityId,
        resource_id: ResourceId,
        slot: SlotRef,
    ) -> Result<()> {
        let a_idx = self
            .activity_position(activity_id)
            .ok_or(ScheduleError::UnknownActivity(activity_id))?;
        let r_idx = self
            .resource_position(resource_id)
            .ok_or(ScheduleError::UnknownResource(resource_id))?;

        let skill_type = self.activities[a_idx]
            .required_skills
            .get(slot.requirement)
            .and_then(|req| req.slots.get(slot.slot))
            .map(|s| s.skill_type)
            .ok_or_else(|| {
                ScheduleError::OperatorContract(format!(
                    "activity {activity_id} has no slot {}/{}",
                    slot.requirement, slot.slot
                ))
            })?;

        let resource = &mut self.resources[r_idx];
        if !resource.is_capable_of(skill_type) {
            return Err(ScheduleError::InvalidAssignment {
                activity_id,
                resource_id,
                skill_type,
            });
        }
        resource.current_activity = Some(activity_id);
        self.activities[a_idx].required_skills[slot.requirement].slots[slot.slot].resource =
            Some(resource_id);
        Ok(())
    }

    /// Resets all timings; with `with_assignments`, also unbinds every slot.
    pub fn clear(&mut self, with_assignments: bool) {
        for act in &mut self.activities {
            act.start = None;
            if with_assignments {
                act.clear_assignments();
            }
        }
        for res in &mut self.resources {
            res.finish = None;
            if with_assignments {
                res.current_activity = None;
            }
        }
    }

    /// Project duration: latest resource finish time (0 if none used).
    pub fn makespan(&self) -> i64 {
        self.resources
            .iter()
            .filter_map(|r| r.finish)
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// Sum of all activity durations (serial-execution upper bound).
    pub fn total_activity_duration(&self) -> i64 {
        self.activities.iter().map(|a| a.duration).sum()
    }

    /// Makespan divided by the total activity duration.
    ///
    /// Returns 0.0 when every activity has zero duration.
    pub fn normalized_duration(&self) -> f64 {
        let total = self.total_activity_duration();
        if total <= 0 {
            return 0.0;
        }
        self.makespan() as f64 / total as f64
    }

    /// Resources able to provide `skill_type`.
    pub fn capable_resources(&self, skill_type: SkillType) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.iter().filter(move |r| r.is_capable_of(skill_type))
    }
}
