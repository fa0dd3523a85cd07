//! Project instance (problem template).
//!
//! A [`ProjectInstance`] is the validated, immutable problem definition handed
//! over by an instance loader. Every candidate solution starts from a fresh
//! [`Schedule`] built from it, so mutating a candidate never touches the
//! template.

use serde::{Deserialize, Serialize};

use super::{Activity, Resource, Schedule};
use crate::error::{Result, ScheduleError};
use crate::validation::validate_instance;

/// Validated MSPSP problem definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInstance {
    num_skills: usize,
    activities: Vec<Activity>,
    resources: Vec<Resource>,
    min_makespan: Option<i64>,
    max_makespan: Option<i64>,
}

impl ProjectInstance {
    /// Creates an instance after checking its integrity.
    ///
    /// Activities and resources are ordered by id; assignments and timings
    /// carried by the inputs are dropped. Fails with
    /// [`ScheduleError::InvalidInstance`] listing every detected problem.
    pub fn new(
        num_skills: usize,
        mut activities: Vec<Activity>,
        mut resources: Vec<Resource>,
    ) -> Result<Self> {
        validate_instance(num_skills, &activities, &resources).map_err(|errors| {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            ScheduleError::InvalidInstance(messages.join("; "))
        })?;

        activities.sort_by_key(|a| a.id);
        resources.sort_by_key(|r| r.id);
        for act in &mut activities {
            act.start = None;
            act.clear_assignments();
        }
        for res in &mut resources {
            res.reset();
        }

        Ok(Self {
            num_skills,
            activities,
            resources,
            min_makespan: None,
            max_makespan: None,
        })
    }

    /// Attaches known makespan bounds (informational).
    pub fn with_makespan_bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_makespan = min;
        self.max_makespan = max;
        self
    }

    /// Number of skill types.
    pub fn num_skills(&self) -> usize {
        self.num_skills
    }

    /// Number of activities.
    pub fn num_activities(&self) -> usize {
        self.activities.len()
    }

    /// Number of resources.
    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    /// Template activities, ordered by id.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Template resources, ordered by id.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Known lower bound on the makespan, if any.
    pub fn min_makespan(&self) -> Option<i64> {
        self.min_makespan
    }

    /// Known upper bound on the makespan, if any.
    pub fn max_makespan(&self) -> Option<i64> {
        self.max_makespan
    }

    /// Successor flag per activity position.
    pub fn has_successors(&self) -> Vec<bool> {
        let mut flags = vec![false; self.activities.len()];
        for act in &self.activities {
            for pred in &act.predecessors {
                if let Ok(idx) = self.activities.binary_search_by_key(pred, |a| a.id) {
                    flags[idx] = true;
                }
            }
        }
        flags
    }

    /// A fresh, unscheduled schedule independent of the template.
    pub fn schedule(&self) -> Schedule {
        Schedule::new(
            self.num_skills,
            self.activities.clone(),
            self.resources.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activities() -> Vec<Activity> {
        vec![
            Activity::new(2, 2).with_predecessor(1).with_skill(0, 1),
            Activity::new(1, 3).with_skill(0, 1),
        ]
    }

    #[test]
    fn test_instance_is_ordered_by_id() {
        let inst = ProjectInstance::new(
            1,
            activities(),
            vec![Resource::new(1).with_skill(0), Resource::new(0).with_skill(0)],
        )
        .unwrap();

        let ids: Vec<_> = inst.activities().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let rids: Vec<_> = inst.resources().iter().map(|r| r.id).collect();
        assert_eq!(rids, vec![0, 1]);
        assert_eq!(inst.has_successors(), vec![true, false]);
    }

    #[test]
    fn test_instance_rejects_bad_input() {
        let result = ProjectInstance::new(1, activities(), vec![Resource::new(0)]);
        assert!(matches!(result, Err(ScheduleError::InvalidInstance(_))));
    }

    #[test]
    fn test_schedule_does_not_touch_template() {
        let inst =
            ProjectInstance::new(1, activities(), vec![Resource::new(0).with_skill(0)]).unwrap();
        let mut s = inst.schedule();
        s.activity_mut(1).unwrap().start = Some(5);
        s.resource_mut(0).unwrap().finish = Some(8);

        assert_eq!(inst.activities()[0].start, None);
        assert_eq!(inst.resources()[0].finish, None);
        assert_eq!(inst.schedule().activity(1).unwrap().start, None);
    }

    #[test]
    fn test_template_state_is_reset() {
        let mut acts = activities();
        acts[1].start = Some(3);
        acts[1].required_skills[0].slots[0].resource = Some(0);
        let inst = ProjectInstance::new(1, acts, vec![Resource::new(0).with_skill(0)])
            .unwrap()
            .with_makespan_bounds(Some(6), Some(20));

        assert_eq!(inst.activities()[0].start, None);
        assert_eq!(inst.activities()[0].required_skills[0].assigned(), 0);
        assert_eq!(inst.min_makespan(), Some(6));
        assert_eq!(inst.max_makespan(), Some(20));
    }
}
