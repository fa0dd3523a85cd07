//! Skill demand model.
//!
//! A [`RequiredSkill`] is an activity's demand for one skill type. It holds
//! exactly `required` [`Skill`] slots; each slot is bound to at most one
//! resource.

use serde::{Deserialize, Serialize};

use super::{ResourceId, SkillType};

/// One unit of demand for a skill type, bindable to a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill category.
    pub skill_type: SkillType,
    /// Resource occupying this slot. `None` = unassigned.
    pub resource: Option<ResourceId>,
}

impl Skill {
    /// Creates an unassigned slot.
    pub fn new(skill_type: SkillType) -> Self {
        Self {
            skill_type,
            resource: None,
        }
    }

    /// Whether a resource is bound to this slot.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.resource.is_some()
    }
}

/// An activity's demand for one skill type.
///
/// `required == 0` means the type is not needed; such entries carry no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSkill {
    /// Skill category.
    pub skill_type: SkillType,
    /// Number of units needed.
    pub required: usize,
    /// Assignment slots (`slots.len() == required`).
    pub slots: Vec<Skill>,
}

impl RequiredSkill {
    /// Creates a demand of `required` unassigned units.
    pub fn new(skill_type: SkillType, required: usize) -> Self {
        Self {
            skill_type,
            required,
            slots: (0..required).map(|_| Skill::new(skill_type)).collect(),
        }
    }

    /// Number of slots with a bound resource.
    pub fn assigned(&self) -> usize {
        self.slots.iter().filter(|s| s.is_assigned()).count()
    }

    /// Whether every slot is bound.
    pub fn is_satisfied(&self) -> bool {
        self.assigned() == self.required
    }

    /// Slot count matches demand and every slot carries the demand's type.
    pub fn is_well_formed(&self) -> bool {
        self.slots.len() == self.required
            && self.slots.iter().all(|s| s.skill_type == self.skill_type)
    }

    /// Unbinds every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.resource = None;
        }
    }
}
