//! Genetic-algorithm search for MSPSP schedules.
//!
//! Each individual owns a complete [`Schedule`](crate::models::Schedule):
//! skill slots bound to resources plus the start times derived from them.
//! Operators act on the bindings; timings are always recomputed by the
//! greedy pass afterwards.
//!
//! # Submodules
//!
//! - [`config`]: run parameters
//! - [`selection`]: tournament selection
//! - [`operators`]: single-point crossover and slot re-binding mutation
//! - [`population`]: individuals, generation life cycle and statistics
//! - [`runner`]: the generation loop
//!
//! # Reference
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"
//! - Myszkowski et al. (2015), "Hybrid ant colony optimization in solving
//!   multi-skill resource-constrained project scheduling problem"

pub mod config;
pub mod operators;
pub mod population;
pub mod runner;
pub mod selection;

pub use config::GaConfig;
pub use operators::{crossover, mutate, splice};
pub use population::{
    summary_table, ConflictStats, DurationStats, GenerationSummary, Individual, Population,
    PopulationState,
};
pub use runner::{GaResult, GeneticAlgorithm};
pub use selection::tournament;
