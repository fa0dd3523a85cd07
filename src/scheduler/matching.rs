//! Slot-to-resource matching for one activity.
//!
//! The skill slots of an activity and the resources able to fill them form a
//! bipartite graph. A complete binding (every slot filled, no resource used
//! twice) exists iff a maximum matching covers every slot.
//!
//! Binding proceeds slot by slot. [`SlotGraph::feasible_candidates`] keeps
//! only resources after which the remaining slots can still be completed, so
//! a random pick among them never reaches a dead end.
//!
//! # Reference
//! Kuhn (1955), "The Hungarian method for the assignment problem"

use std::collections::{HashMap, HashSet};

use crate::models::{Activity, Resource, ResourceId, SlotRef};

/// Capable resources per skill slot of one activity.
#[derive(Debug, Clone)]
pub(crate) struct SlotGraph {
    slots: Vec<SlotRef>,
    candidates: Vec<Vec<ResourceId>>,
}

impl SlotGraph {
    /// Builds the graph for `activity` over `resources`.
    pub(crate) fn new(activity: &Activity, resources: &[Resource]) -> Self {
        let slots = activity.slot_refs();
        let candidates = slots
            .iter()
            .map(|slot| {
                let skill_type = activity.required_skills[slot.requirement].skill_type;
                resources
                    .iter()
                    .filter(|r| r.is_capable_of(skill_type))
                    .map(|r| r.id)
                    .collect()
            })
            .collect();
        Self { slots, candidates }
    }

    /// Slots in declaration order.
    pub(crate) fn slots(&self) -> &[SlotRef] {
        &self.slots
    }

    /// Whether every slot can be bound to a distinct capable resource.
    pub(crate) fn is_satisfiable(&self) -> bool {
        self.completable(0, &[])
    }

    /// Resources for slot `index` that leave slots after it completable,
    /// given that slots `0..index` hold `taken`.
    pub(crate) fn feasible_candidates(&self, index: usize, taken: &[ResourceId]) -> Vec<ResourceId> {
        let mut trial = taken.to_vec();
        self.candidates[index]
            .iter()
            .copied()
            .filter(|r| !taken.contains(r))
            .filter(|&r| {
                trial.truncate(taken.len());
                trial.push(r);
                self.completable(index + 1, &trial)
            })
            .collect()
    }

    /// Whether slots `first..` can be matched to resources outside `taken`.
    fn completable(&self, first: usize, taken: &[ResourceId]) -> bool {
        let mut owner: HashMap<ResourceId, usize> = HashMap::new();
        (first..self.slots.len()).all(|slot| {
            let mut visited = HashSet::new();
            self.augment(slot, taken, &mut visited, &mut owner)
        })
    }

    /// Augmenting-path search from `slot`.
    fn augment(
        &self,
        slot: usize,
        taken: &[ResourceId],
        visited: &mut HashSet<ResourceId>,
        owner: &mut HashMap<ResourceId, usize>,
    ) -> bool {
        for &r in &self.candidates[slot] {
            if taken.contains(&r) || !visited.insert(r) {
                continue;
            }
            let free = match owner.get(&r).copied() {
                None => true,
                Some(other) => self.augment(other, taken, visited, owner),
            };
            if free {
                owner.insert(r, slot);
                return true;
            }
        }
        false
    }
}
