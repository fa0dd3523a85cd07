//! MSPSP domain models.
//!
//! Provides the data types shared by the constraint checker, the greedy
//! timing pass and the genetic search.
//!
//! # Domain Mappings
//!
//! | u-mspsp | Software project | Maintenance crew | Hospital |
//! |---------|------------------|------------------|----------|
//! | Activity | Work item | Work order | Procedure |
//! | Resource | Engineer | Technician | Staff member |
//! | Skill type | Competence | Trade | Specialty |
//! | Schedule | Sprint plan | Shift plan | OR schedule |

mod activity;
mod instance;
mod resource;
mod schedule;
mod skill;

pub use activity::{Activity, SlotRef};
pub use instance::ProjectInstance;
pub use resource::Resource;
pub use schedule::Schedule;
pub use skill::{RequiredSkill, Skill};

/// Activity identifier (1-based).
pub type ActivityId = usize;

/// Resource identifier (0-based).
pub type ResourceId = usize;

/// Skill category identifier (0-based).
pub type SkillType = usize;
