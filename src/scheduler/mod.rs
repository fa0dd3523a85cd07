//! Schedule construction and KPI evaluation.
//!
//! # Algorithms
//!
//! - [`assign_timestamps`]: deterministic greedy timing for fixed
//!   activity → resource bindings. Gating activities first, then leaves.
//! - [`initialize_schedule`]: randomized construction that binds every skill
//!   slot to a capable resource, preferring resources that are free at the
//!   activity's earliest time.
//!
//! # KPI
//!
//! [`ScheduleKpi`] summarizes a timed schedule: makespan, serial upper bound,
//! their ratio, and constraint violations.
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"
//! - Bellenguez-Morineau & Néron (2005), "A branch-and-bound method for
//!   solving multi-skill project scheduling problem"

mod greedy;
mod initializer;
mod kpi;
pub(crate) mod matching;

pub use greedy::assign_timestamps;
pub use initializer::initialize_schedule;
pub use kpi::ScheduleKpi;
