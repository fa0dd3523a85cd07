//! Generation loop.
//!
//! [`GeneticAlgorithm`] drives the search:
//! initialize → evaluate → select/recombine/mutate → re-time → evaluate → repeat.
//!
//! Every offspring owns a fresh copy of its parent's schedule, so operators
//! never write into the previous generation. All random draws happen on one
//! seeded generator on the calling thread; with the `parallel` feature only
//! the deterministic re-timing and evaluation passes fan out.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use super::config::GaConfig;
use super::operators::{crossover, mutate};
use super::population::{for_each_individual, GenerationSummary, Individual, Population, PopulationState};
use super::selection::tournament;
use crate::error::{Result, ScheduleError};
use crate::models::ProjectInstance;
use crate::scheduler::{assign_timestamps, initialize_schedule};

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct GaResult {
    /// Best individual seen in any generation.
    pub best: Individual,
    /// Generation in which `best` was found.
    pub best_generation: usize,
    /// One summary per generation, generation 0 first.
    pub summaries: Vec<GenerationSummary>,
}

/// Genetic algorithm over one problem instance.
///
/// # Usage
///
/// ```
/// use u_mspsp::ga::{GaConfig, GeneticAlgorithm};
/// use u_mspsp::models::{Activity, ProjectInstance, Resource};
///
/// let instance = ProjectInstance::new(
///     1,
///     vec![
///         Activity::new(1, 3).with_skill(0, 1),
///         Activity::new(2, 2).with_predecessor(1).with_skill(0, 1),
///     ],
///     vec![Resource::new(0).with_skill(0)],
/// )
/// .unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
/// let result = GeneticAlgorithm::new(instance, config).unwrap().run().unwrap();
/// assert_eq!(result.summaries.len(), 6);
/// assert_eq!(result.best.duration(), 6);
/// ```
pub struct GeneticAlgorithm {
    instance: ProjectInstance,
    config: GaConfig,
    rng: SmallRng,
}

impl GeneticAlgorithm {
    /// Creates a search over `instance`.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidConfig`] if the configuration is out of range.
    pub fn new(instance: ProjectInstance, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            instance,
            config,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The problem instance.
    pub fn instance(&self) -> &ProjectInstance {
        &self.instance
    }

    /// The configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Builds generation 0: `population_size` independently constructed
    /// schedules, each from a fresh copy of the instance.
    pub fn initialize_population(&mut self) -> Result<Population> {
        let size = self.config.population_size;
        debug!(
            population_size = size,
            activities = self.instance.num_activities(),
            resources = self.instance.num_resources(),
            "initializing population"
        );

        let mut population = Population::with_capacity(0, size);
        for _ in 0..size {
            let mut schedule = self.instance.schedule();
            initialize_schedule(&mut schedule, &mut self.rng)?;
            population.push(Individual::new(schedule))?;
        }
        Ok(population)
    }

    /// Breeds generation `id` from an evaluated `parent` generation.
    ///
    /// Each child starts as a copy of a tournament winner. With
    /// `crossover_probability` it is instead spliced with a second winner;
    /// with `mutation_probability` one of its activities is re-bound. Every
    /// child is then re-timed.
    ///
    /// # Errors
    /// [`ScheduleError::OperatorContract`] if `parent` has not been evaluated.
    pub fn create_new_population(&mut self, parent: &Population, id: usize) -> Result<Population> {
        if !matches!(
            parent.state(),
            PopulationState::Evaluated | PopulationState::Finalized
        ) {
            return Err(ScheduleError::OperatorContract(format!(
                "generation {} must be evaluated before breeding",
                parent.id()
            )));
        }

        let parents = parent.individuals();
        let k = self.config.tournament_size;
        let mut children = Vec::with_capacity(self.config.population_size);

        for _ in 0..self.config.population_size {
            let first = tournament(parents, k, &mut self.rng)?;
            let mut schedule = if self.rng.random_bool(self.config.crossover_probability) {
                let second = tournament(parents, k, &mut self.rng)?;
                crossover(
                    &parents[first].schedule,
                    &parents[second].schedule,
                    &mut self.rng,
                )?
            } else {
                parents[first].schedule.clone()
            };

            if self.rng.random_bool(self.config.mutation_probability) {
                mutate(&mut schedule, &mut self.rng)?;
            }
            children.push(Individual::new(schedule));
        }

        for_each_individual(&mut children, |ind| assign_timestamps(&mut ind.schedule));

        let mut population = Population::with_capacity(id, children.len());
        for child in children {
            population.push(child)?;
        }
        Ok(population)
    }

    /// Runs generation 0 plus `generations` bred generations.
    pub fn run(&mut self) -> Result<GaResult> {
        let mut population = self.initialize_population()?;
        let mut summaries = Vec::with_capacity(self.config.generations + 1);

        summaries.push(evaluate(&mut population)?);
        let mut best = best_of(&population)?;
        let mut best_generation = 0;

        for id in 1..=self.config.generations {
            let mut next = self.create_new_population(&population, id)?;
            summaries.push(evaluate(&mut next)?);

            let candidate = best_of(&next)?;
            if candidate.compare(&best).is_lt() {
                best = candidate;
                best_generation = id;
            }
            population = next;
        }

        Ok(GaResult {
            best,
            best_generation,
            summaries,
        })
    }
}

/// Evaluates and finalizes one generation.
fn evaluate(population: &mut Population) -> Result<GenerationSummary> {
    population.evaluate_duration()?;
    population.evaluate_constraints()?;
    let summary = population.summary()?;
    info!(
        generation = summary.id,
        best = summary.best,
        worst = summary.worst,
        avg = summary.avg,
        avg_conflicts = summary.avg_conflicts,
        "generation evaluated"
    );
    Ok(summary)
}

fn best_of(population: &Population) -> Result<Individual> {
    population.best().cloned().ok_or_else(|| {
        ScheduleError::OperatorContract(format!("generation {} is empty", population.id()))
    })
}
