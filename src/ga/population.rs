//! Individuals, generations and per-generation statistics.
//!
//! A [`Population`] moves through a fixed life cycle:
//!
//! ```text
//! Created ──push──▶ Populated ──evaluate_duration + evaluate_constraints──▶ Evaluated ──summary──▶ Finalized
//! ```
//!
//! No stage can be skipped. Individuals can only be added before evaluation,
//! and a finalized population is read-only.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constraints;
use crate::error::{Result, ScheduleError};
use crate::models::Schedule;

/// One candidate solution.
#[derive(Debug, Clone, Serialize)]
pub struct Individual {
    /// The owned, timed schedule.
    pub schedule: Schedule,
    /// Project duration (lower is better). `INFINITY` until evaluated.
    pub fitness: f64,
    /// Total constraint violations, set by [`Population::evaluate_constraints`].
    pub conflicts: usize,
}

impl Individual {
    /// Wraps a schedule. Fitness is unknown until evaluated.
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            fitness: f64::INFINITY,
            conflicts: 0,
        }
    }

    /// Project duration as an integer time span.
    pub fn duration(&self) -> i64 {
        self.schedule.makespan()
    }

    /// Orders by fitness, then by fewer conflicts.
    pub fn compare(&self, other: &Individual) -> Ordering {
        self.fitness
            .partial_cmp(&other.fitness)
            .unwrap_or(Ordering::Equal)
            .then(self.conflicts.cmp(&other.conflicts))
    }
}

/// Life-cycle stage of a [`Population`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopulationState {
    /// No individuals yet.
    Created,
    /// Individuals added, statistics pending.
    Populated,
    /// Duration and conflict statistics computed.
    Evaluated,
    /// Summary taken; read-only.
    Finalized,
}

/// Duration statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    /// Shortest duration.
    pub best: i64,
    /// Longest duration.
    pub worst: i64,
    /// Sum of all durations.
    pub sum: i64,
    /// Mean duration, rounded to two decimals.
    pub average: f64,
    /// Smallest duration / total-activity-duration ratio, rounded to two decimals.
    pub normalized: f64,
}

/// Conflict statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictStats {
    /// Fewest violations of any individual.
    pub least: usize,
    /// Most violations of any individual.
    pub most: usize,
    /// Mean violations, rounded to two decimals.
    pub average: f64,
}

/// Summary row of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation id (0 = initial population).
    pub id: usize,
    /// Shortest duration.
    pub best: i64,
    /// Longest duration.
    pub worst: i64,
    /// Mean duration.
    pub avg: f64,
    /// Mean constraint violations.
    pub avg_conflicts: f64,
}

impl GenerationSummary {
    /// Column header matching [`to_row`](Self::to_row).
    pub const HEADER: &'static str = "pid;best;worst;avg;avgConflicts";

    /// Renders `id;best;worst;avg;avgConflicts`.
    pub fn to_row(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{}",
            self.id, self.best, self.worst, self.avg, self.avg_conflicts
        )
    }
}

/// Renders the header and one row per generation, newline-terminated.
pub fn summary_table(summaries: &[GenerationSummary]) -> String {
    let mut out = String::with_capacity((summaries.len() + 1) * 32);
    out.push_str(GenerationSummary::HEADER);
    out.push('\n');
    for s in summaries {
        out.push_str(&s.to_row());
        out.push('\n');
    }
    out
}

/// One generation of individuals.
#[derive(Debug, Clone)]
pub struct Population {
    id: usize,
    individuals: Vec<Individual>,
    state: PopulationState,
    durations: Option<DurationStats>,
    conflicts: Option<ConflictStats>,
}

impl Population {
    /// Creates an empty generation.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            individuals: Vec::new(),
            state: PopulationState::Created,
            durations: None,
            conflicts: None,
        }
    }

    /// Creates an empty generation with room for `capacity` individuals.
    pub fn with_capacity(id: usize, capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            ..Self::new(id)
        }
    }

    /// Generation id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current life-cycle stage.
    pub fn state(&self) -> PopulationState {
        self.state
    }

    /// Individuals in insertion order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the generation holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Duration statistics, once evaluated.
    pub fn duration_stats(&self) -> Option<DurationStats> {
        self.durations
    }

    /// Conflict statistics, once evaluated.
    pub fn conflict_stats(&self) -> Option<ConflictStats> {
        self.conflicts
    }

    /// Adds an individual.
    ///
    /// # Errors
    /// [`ScheduleError::OperatorContract`] once evaluation has started.
    pub fn push(&mut self, individual: Individual) -> Result<()> {
        if self.durations.is_some() || self.conflicts.is_some() || self.is_frozen() {
            return Err(ScheduleError::OperatorContract(format!(
                "generation {} no longer accepts individuals",
                self.id
            )));
        }
        self.individuals.push(individual);
        self.state = PopulationState::Populated;
        Ok(())
    }

    /// Sets every fitness to its schedule's makespan and records duration stats.
    ///
    /// Schedules must already be timed.
    pub fn evaluate_duration(&mut self) -> Result<DurationStats> {
        self.check_evaluable("evaluate durations")?;

        for_each_individual(&mut self.individuals, |ind| {
            ind.fitness = ind.duration() as f64;
        });

        let mut best = i64::MAX;
        let mut worst = i64::MIN;
        let mut sum = 0i64;
        let mut normalized = f64::INFINITY;
        for ind in &self.individuals {
            let d = ind.duration();
            best = best.min(d);
            worst = worst.max(d);
            sum += d;
            normalized = normalized.min(ind.schedule.normalized_duration());
        }

        let stats = DurationStats {
            best,
            worst,
            sum,
            average: round_two_decimals(sum as f64 / self.individuals.len() as f64),
            normalized: round_two_decimals(normalized),
        };
        self.durations = Some(stats);
        self.advance();
        Ok(stats)
    }

    /// Counts constraint violations per individual and records conflict stats.
    pub fn evaluate_constraints(&mut self) -> Result<ConflictStats> {
        self.check_evaluable("evaluate constraints")?;

        for_each_individual(&mut self.individuals, |ind| {
            ind.conflicts = constraints::number_of_conflicts(&ind.schedule);
        });

        let least = self.individuals.iter().map(|i| i.conflicts).min().unwrap_or(0);
        let most = self.individuals.iter().map(|i| i.conflicts).max().unwrap_or(0);
        let sum: usize = self.individuals.iter().map(|i| i.conflicts).sum();

        let stats = ConflictStats {
            least,
            most,
            average: round_two_decimals(sum as f64 / self.individuals.len() as f64),
        };
        self.conflicts = Some(stats);
        self.advance();
        Ok(stats)
    }

    /// Finalizes the generation and returns its summary row.
    ///
    /// # Errors
    /// [`ScheduleError::OperatorContract`] unless both evaluations have run.
    pub fn summary(&mut self) -> Result<GenerationSummary> {
        let (Some(d), Some(c)) = (self.durations, self.conflicts) else {
            return Err(ScheduleError::OperatorContract(format!(
                "generation {} summarized before evaluation",
                self.id
            )));
        };
        self.state = PopulationState::Finalized;
        Ok(GenerationSummary {
            id: self.id,
            best: d.best,
            worst: d.worst,
            avg: d.average,
            avg_conflicts: c.average,
        })
    }

    /// Best individual: lowest fitness, then fewest conflicts.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().min_by(|a, b| a.compare(b))
    }

    fn is_frozen(&self) -> bool {
        matches!(
            self.state,
            PopulationState::Evaluated | PopulationState::Finalized
        )
    }

    fn check_evaluable(&self, action: &str) -> Result<()> {
        match self.state {
            PopulationState::Created => Err(ScheduleError::OperatorContract(format!(
                "cannot {action} of empty generation {}",
                self.id
            ))),
            PopulationState::Finalized => Err(ScheduleError::OperatorContract(format!(
                "cannot {action} of finalized generation {}",
                self.id
            ))),
            _ => Ok(()),
        }
    }

    fn advance(&mut self) {
        if self.durations.is_some() && self.conflicts.is_some() {
            self.state = PopulationState::Evaluated;
        }
    }
}

/// Applies `f` to every individual, on the rayon pool when `parallel` is on.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_individual<F>(individuals: &mut [Individual], f: F)
where
    F: Fn(&mut Individual) + Send + Sync,
{
    individuals.par_iter_mut().for_each(f);
}

/// Applies `f` to every individual, on the rayon pool when `parallel` is on.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_individual<F>(individuals: &mut [Individual], f: F)
where
    F: Fn(&mut Individual) + Send + Sync,
{
    individuals.iter_mut().for_each(f);
}

fn round_two_decimals(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
