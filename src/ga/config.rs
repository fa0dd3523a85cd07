//! GA configuration.
//!
//! [`GaConfig`] holds the knobs that control the generation loop.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Configuration for the MSPSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_mspsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.tournament_size, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mspsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generations(20)
///     .with_crossover_probability(0.4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Generations bred after the initial population.
    ///
    /// Zero runs only generation 0.
    pub generations: usize,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_probability: f64,

    /// Probability of recombining two parents (0.0–1.0).
    ///
    /// When crossover is not applied, the child is a copy of the first parent.
    pub crossover_probability: f64,

    /// Individuals drawn per tournament (1..=population_size).
    pub tournament_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            generations: 100,
            mutation_probability: 0.01,
            crossover_probability: 0.1,
            tournament_size: 5,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of bred generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`ScheduleError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(ScheduleError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(ScheduleError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.tournament_size > self.population_size {
            return Err(ScheduleError::InvalidConfig(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            )));
        }
        for (name, p) in [
            ("mutation_probability", self.mutation_probability),
            ("crossover_probability", self.crossover_probability),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(ScheduleError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 300);
        assert_eq!(config.generations, 100);
        assert!((config.mutation_probability - 0.01).abs() < 1e-10);
        assert!((config.crossover_probability - 0.1).abs() < 1e-10);
        assert_eq!(config.tournament_size, 5);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(40)
            .with_generations(0)
            .with_mutation_probability(0.2)
            .with_crossover_probability(0.7)
            .with_tournament_size(40)
            .with_seed(42);

        assert_eq!(config.population_size, 40);
        assert_eq!(config.generations, 0);
        assert!((config.mutation_probability - 0.2).abs() < 1e-10);
        assert!((config.crossover_probability - 0.7).abs() < 1e-10);
        assert_eq!(config.tournament_size, 40);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_probabilities_are_clamped() {
        let config = GaConfig::default()
            .with_mutation_probability(1.5)
            .with_crossover_probability(-0.3);
        assert!((config.mutation_probability - 1.0).abs() < 1e-10);
        assert!(config.crossover_probability.abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            GaConfig::default().with_population_size(0),
            GaConfig::default().with_tournament_size(0),
            GaConfig::default().with_population_size(3).with_tournament_size(4),
            GaConfig {
                mutation_probability: f64::NAN,
                ..GaConfig::default()
            },
            GaConfig {
                crossover_probability: 2.0,
                ..GaConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(ScheduleError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = GaConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: GaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
