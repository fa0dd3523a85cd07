//! Input validation for MSPSP instances.
//!
//! Checks structural integrity of activities and resources before any
//! schedule is built. Detects:
//! - Duplicate IDs
//! - Negative durations
//! - Missing predecessor references
//! - Circular precedence dependencies (DAG validation)
//! - Malformed skill demand (slot count, unknown or repeated skill types)
//! - Unsatisfiable demand (more units than capable resources, per type or
//!   across all of an activity's types)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Activity, ActivityId, Resource};
use crate::scheduler::matching::SlotGraph;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Activity IDs are 1-based.
    InvalidId,
    /// An activity has a negative duration.
    InvalidDuration,
    /// An activity references a predecessor that doesn't exist.
    InvalidPredecessor,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// A skill demand has the wrong slot count or repeats a skill type.
    MalformedDemand,
    /// A skill type outside `0..num_skills`.
    UnknownSkill,
    /// Demand exceeds the number of capable resources.
    Unsatisfiable,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an MSPSP instance.
///
/// Checks:
/// 1. No duplicate activity or resource IDs, activity IDs are >= 1
/// 2. Durations are non-negative
/// 3. All predecessor references point to existing activities
/// 4. Every skill demand has `required` slots of its own type, one demand per type
/// 5. All skill types (demand and capabilities) lie in `0..num_skills`
/// 6. Every activity's slots can be bound to distinct capable resources
/// 7. No circular precedence dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(
    num_skills: usize,
    activities: &[Activity],
    resources: &[Resource],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if let Some(&t) = r.capabilities.iter().find(|&&t| t >= num_skills) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSkill,
                format!("Resource {} declares unknown skill type {t}", r.id),
            ));
        }
    }

    let mut activity_ids = HashSet::new();
    for act in activities {
        if act.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                "Activity IDs start at 1",
            ));
        }
        if !activity_ids.insert(act.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate activity ID: {}", act.id),
            ));
        }
        if act.duration < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Activity {} has negative duration {}", act.id, act.duration),
            ));
        }
    }

    // Predecessor references
    for act in activities {
        for pred in &act.predecessors {
            if !activity_ids.contains(pred) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!(
                        "Activity {} references unknown predecessor {}",
                        act.id, pred
                    ),
                ));
            }
        }
    }

    // Skill demand
    let capable_count = |skill_type: usize| {
        resources
            .iter()
            .filter(|r| r.is_capable_of(skill_type))
            .count()
    };
    for act in activities {
        let reported = errors.len();
        let mut seen_types = HashSet::new();
        for req in &act.required_skills {
            if !req.is_well_formed() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedDemand,
                    format!(
                        "Activity {} demands {} units of skill {} but holds {} slots",
                        act.id,
                        req.required,
                        req.skill_type,
                        req.slots.len()
                    ),
                ));
            }
            if !seen_types.insert(req.skill_type) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedDemand,
                    format!(
                        "Activity {} lists skill {} more than once",
                        act.id, req.skill_type
                    ),
                ));
            }
            if req.skill_type >= num_skills {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSkill,
                    format!(
                        "Activity {} demands unknown skill type {}",
                        act.id, req.skill_type
                    ),
                ));
            } else if req.required > 0 {
                let available = capable_count(req.skill_type);
                if available < req.required {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::Unsatisfiable,
                        format!(
                            "Activity {} needs {} units of skill {} but only {} resources are capable",
                            act.id, req.required, req.skill_type, available
                        ),
                    ));
                }
            }
        }

        // Each type may be coverable on its own while the types together
        // need more distinct resources than exist.
        if errors.len() == reported && !SlotGraph::new(act, resources).is_satisfiable() {
            errors.push(ValidationError::new(
                ValidationErrorKind::Unsatisfiable,
                format!(
                    "Activity {} needs more distinct capable resources than are available",
                    act.id
                ),
            ));
        }
    }

    // Cycles in the precedence graph (DFS-based)
    if let Some(cycle_err) = detect_cycles(activities) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(activities: &[Activity]) -> Option<ValidationError> {
    // predecessor → successors
    let mut adj: HashMap<ActivityId, Vec<ActivityId>> = HashMap::new();
    for act in activities {
        for &pred in &act.predecessors {
            adj.entry(pred).or_default().push(act.id);
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for act in activities {
        if !visited.contains(&act.id) && has_cycle_dfs(act.id, &adj, &mut visited, &mut in_stack)
        {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving activity {}", act.id),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: ActivityId,
    adj: &HashMap<ActivityId, Vec<ActivityId>>,
    visited: &mut HashSet<ActivityId>,
    in_stack: &mut HashSet<ActivityId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resources() -> Vec<Resource> {
        vec![
            Resource::new(0).with_skill(0),
            Resource::new(1).with_skills([0, 1]),
            Resource::new(2).with_skill(1),
        ]
    }

    fn sample_activities() -> Vec<Activity> {
        vec![
            Activity::new(1, 3).with_skill(0, 1).with_skill(1, 0),
            Activity::new(2, 2)
                .with_predecessor(1)
                .with_skill(0, 2)
                .with_skill(1, 1),
            Activity::new(3, 4).with_predecessor(2).with_skill(1, 2),
        ]
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_instance(2, &sample_activities(), &sample_resources()).is_ok());
    }

    #[test]
    fn test_duplicate_activity_id() {
        let mut acts = sample_activities();
        acts.push(Activity::new(1, 1));
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::DuplicateId
        ));
    }

    #[test]
    fn test_duplicate_resource_id() {
        let mut res = sample_resources();
        res.push(Resource::new(0).with_skill(0));
        let errors = validate_instance(2, &sample_activities(), &res).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("resource")));
    }

    #[test]
    fn test_zero_activity_id() {
        let acts = vec![Activity::new(0, 1)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::InvalidId
        ));
    }

    #[test]
    fn test_negative_duration() {
        let acts = vec![Activity::new(1, -2)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::InvalidDuration
        ));
    }

    #[test]
    fn test_invalid_predecessor() {
        let acts = vec![Activity::new(1, 1).with_predecessor(42)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::InvalidPredecessor
        ));
    }

    #[test]
    fn test_cyclic_dependency() {
        // 1 → 2 → 3 → 1
        let acts = vec![
            Activity::new(1, 1).with_predecessor(3),
            Activity::new(2, 1).with_predecessor(1),
            Activity::new(3, 1).with_predecessor(2),
        ];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::CyclicDependency
        ));
    }

    #[test]
    fn test_self_precedence_is_a_cycle() {
        let acts = vec![Activity::new(1, 1).with_predecessor(1)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::CyclicDependency
        ));
    }

    #[test]
    fn test_malformed_demand() {
        let mut acts = vec![Activity::new(1, 1).with_skill(0, 2)];
        acts[0].required_skills[0].slots.pop();
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::MalformedDemand
        ));

        let acts = vec![Activity::new(1, 1).with_skill(0, 1).with_skill(0, 1)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::MalformedDemand
        ));
    }

    #[test]
    fn test_unknown_skill() {
        let acts = vec![Activity::new(1, 1).with_skill(5, 1)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::UnknownSkill
        ));

        let res = vec![Resource::new(0).with_skill(9)];
        assert!(has_kind(
            validate_instance(2, &[], &res),
            ValidationErrorKind::UnknownSkill
        ));
    }

    #[test]
    fn test_unsatisfiable_demand() {
        // Only resources 0 and 1 can do skill 0.
        let acts = vec![Activity::new(1, 1).with_skill(0, 3)];
        assert!(has_kind(
            validate_instance(2, &acts, &sample_resources()),
            ValidationErrorKind::Unsatisfiable
        ));

        let acts = vec![Activity::new(1, 1).with_skill(0, 1)];
        assert!(has_kind(
            validate_instance(1, &acts, &[]),
            ValidationErrorKind::Unsatisfiable
        ));
    }

    #[test]
    fn test_demand_unsatisfiable_across_types() {
        // Each type alone has a capable resource, but only resource 0 exists.
        let res = vec![Resource::new(0).with_skills([0, 1])];
        let acts = vec![Activity::new(1, 1).with_skill(0, 1).with_skill(1, 1)];
        let errors = validate_instance(2, &acts, &res).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Unsatisfiable);
    }

    #[test]
    fn test_crossed_demand_is_valid() {
        let res = vec![Resource::new(0).with_skills([0, 1]), Resource::new(1).with_skill(0)];
        let acts = vec![Activity::new(1, 1).with_skill(0, 1).with_skill(1, 1)];
        assert!(validate_instance(2, &acts, &res).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let acts = vec![
            Activity::new(1, -1).with_predecessor(9),
            Activity::new(1, 1),
        ];
        let errors = validate_instance(2, &acts, &sample_resources()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
