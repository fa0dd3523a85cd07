//! Error types.
//!
//! Constraint violations found in a candidate schedule are *not* errors:
//! the search explores infeasible intermediate states and reports them as
//! counts (see [`crate::constraints`]). The variants here cover malformed
//! instances, impossible assignments and misuse of the GA operators.

use thiserror::Error;

use crate::models::{ActivityId, ResourceId, SkillType};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Error type for scheduling operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// The problem definition is malformed or unsatisfiable as stated.
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// A resource was bound to a skill slot it cannot provide.
    #[error(
        "Invalid assignment: resource {resource_id} cannot provide skill {skill_type} \
         for activity {activity_id}"
    )]
    InvalidAssignment {
        activity_id: ActivityId,
        resource_id: ResourceId,
        skill_type: SkillType,
    },

    /// Lookup of an activity id that is not part of the schedule.
    #[error("Unknown activity: {0}")]
    UnknownActivity(ActivityId),

    /// Lookup of a resource id that is not part of the schedule.
    #[error("Unknown resource: {0}")]
    UnknownResource(ResourceId),

    /// A GA operator was invoked outside its contract (programming error).
    #[error("Operator contract violated: {0}")]
    OperatorContract(String),

    /// GA configuration out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Instance text could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Instance file could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ScheduleError::InvalidAssignment {
            activity_id: 3,
            resource_id: 1,
            skill_type: 2,
        };
        assert_eq!(
            e.to_string(),
            "Invalid assignment: resource 1 cannot provide skill 2 for activity 3"
        );

        let e = ScheduleError::Parse {
            line: 7,
            message: "expected integer".into(),
        };
        assert_eq!(e.to_string(), "Parse error at line 7: expected integer");
    }
}
