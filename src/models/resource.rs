//! Resource model.
//!
//! A resource is a single worker or machine with a fixed set of skill
//! capabilities. Its mutable state records when it becomes free again and the
//! last activity it was bound to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ActivityId, ResourceId, SkillType};

/// A resource that can be assigned to activity skill slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: ResourceId,
    /// Skill types this resource can embody.
    pub capabilities: BTreeSet<SkillType>,
    /// Time at which the resource is free again. `None` = never used.
    pub finish: Option<i64>,
    /// Last activity the resource was bound to.
    pub current_activity: Option<ActivityId>,
}

impl Resource {
    /// Creates an idle resource with no capabilities.
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            capabilities: BTreeSet::new(),
            finish: None,
            current_activity: None,
        }
    }

    /// Adds a skill capability.
    pub fn with_skill(mut self, skill_type: SkillType) -> Self {
        self.capabilities.insert(skill_type);
        self
    }

    /// Adds several skill capabilities.
    pub fn with_skills(mut self, skill_types: impl IntoIterator<Item = SkillType>) -> Self {
        self.capabilities.extend(skill_types);
        self
    }

    /// Whether this resource can provide `skill_type`.
    #[inline]
    pub fn is_capable_of(&self, skill_type: SkillType) -> bool {
        self.capabilities.contains(&skill_type)
    }

    /// Whether the resource is idle at `time` (never used counts as idle).
    #[inline]
    pub fn is_free_at(&self, time: i64) -> bool {
        self.finish.map_or(true, |f| f <= time)
    }

    /// Finish time treating an unused resource as free from t=0.
    #[inline]
    pub fn ready_time(&self) -> i64 {
        self.finish.unwrap_or(0).max(0)
    }

    /// Drops scheduling state.
    pub fn reset(&mut self) {
        self.finish = None;
        self.current_activity = None;
    }
}
