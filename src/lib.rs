//! Multi-Skill Project Scheduling (MSPSP) for the U-Engine ecosystem.
//!
//! Activities demand units of typed skills. Resources master a subset of
//! skills. A schedule binds every skill unit to a capable resource and
//! assigns start times so that precedence holds, no resource is
//! double-booked, and the makespan is as short as possible.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Activity`, `Resource`, `Skill`,
//!   `RequiredSkill`, `Schedule`, `ProjectInstance`
//! - **`validation`**: Input integrity checks (duplicate IDs, DAG cycles, skill demand)
//! - **`constraints`**: Violation counts for candidate schedules
//! - **`scheduler`**: Greedy timing, randomized construction, KPIs
//! - **`ga`**: Genetic-algorithm search (tournament, single-point crossover,
//!   re-binding mutation)
//! - **`io`**: MiniZinc `.dzn` instance loader
//!
//! # Example
//!
//! ```
//! use u_mspsp::ga::{summary_table, GaConfig, GeneticAlgorithm};
//! use u_mspsp::io::dzn;
//!
//! let instance = dzn::parse_str(
//!     "nActs = 2; dur = [3, 2]; nSkills = 1; sreq = [| 1 | 1 |];
//!      nResources = 1; mastery = [| true |];
//!      nPrecs = 1; pred = [1]; succ = [2];",
//! )
//! .unwrap();
//!
//! let config = GaConfig::default()
//!     .with_population_size(8)
//!     .with_generations(3)
//!     .with_seed(42);
//! let result = GeneticAlgorithm::new(instance, config).unwrap().run().unwrap();
//! assert!(summary_table(&result.summaries).starts_with("pid;best;worst;avg;avgConflicts\n"));
//! ```
//!
//! # References
//!
//! - Bellenguez-Morineau & Néron (2005), "A branch-and-bound method for
//!   solving multi-skill project scheduling problem"
//! - Myszkowski et al. (2015), "Hybrid ant colony optimization in solving
//!   multi-skill resource-constrained project scheduling problem"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod constraints;
pub mod error;
pub mod ga;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
