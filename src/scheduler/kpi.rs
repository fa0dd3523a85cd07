//! Schedule quality metrics (KPIs).
//!
//! Computes the indicators the search reports for one timed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Duration | Latest resource finish time (makespan) |
//! | Max duration | Sum of all activity durations (serial upper bound) |
//! | Normalized duration | Duration / max duration |
//! | Conflicts | Sum of the four constraint violation counts |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintReport;
use crate::models::Schedule;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Project makespan.
    pub duration: i64,
    /// Sum of all activity durations.
    pub max_duration: i64,
    /// `duration / max_duration` (0.0 if every activity has zero duration).
    pub normalized_duration: f64,
    /// Total number of constraint violations.
    pub conflicts: usize,
    /// Whether all four constraint classes are satisfied.
    pub feasible: bool,
}

impl ScheduleKpi {
    /// Computes KPIs from a timed schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let report = ConstraintReport::check(schedule);
        Self {
            duration: schedule.makespan(),
            max_duration: schedule.total_activity_duration(),
            normalized_duration: schedule.normalized_duration(),
            conflicts: report.total(),
            feasible: report.is_feasible(),
        }
    }

    /// Whether the schedule is feasible and finishes within `max_duration`.
    pub fn meets_deadline(&self, max_duration: i64) -> bool {
        self.feasible && self.duration <= max_duration
    }
}
