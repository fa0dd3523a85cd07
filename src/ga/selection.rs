//! Tournament selection.
//!
//! Draws `k` distinct individuals uniformly at random and returns the one
//! with the lowest fitness (shortest duration). Sampling without replacement
//! makes `k == population size` a full scan, so it always returns the
//! population's best.
//!
//! # Reference
//! Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//! Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

use super::population::Individual;
use crate::error::{Result, ScheduleError};

/// Returns the index of the tournament winner in `population`.
///
/// Ties keep the earliest-drawn contender.
///
/// Contenders are drawn without replacement, unlike the textbook
/// with-replacement tournament. Do not switch: with replacement a full-size
/// tournament could miss the best individual.
///
/// # Errors
/// [`ScheduleError::OperatorContract`] if the population is empty, `k == 0`
/// or `k` exceeds the population size.
///
/// # Complexity
/// O(k) per selection
pub fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> Result<usize> {
    let n = population.len();
    if n == 0 {
        return Err(ScheduleError::OperatorContract(
            "cannot select from an empty population".into(),
        ));
    }
    if k == 0 || k > n {
        return Err(ScheduleError::OperatorContract(format!(
            "tournament size {k} outside 1..={n}"
        )));
    }

    let mut contenders = index::sample(rng, n, k).into_iter();
    let mut best = contenders.next().unwrap_or(0);
    for idx in contenders {
        if population[idx].fitness < population[best].fitness {
            best = idx;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Resource, Schedule};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn population(fitness: &[f64]) -> Vec<Individual> {
        let schedule = Schedule::new(1, vec![Activity::new(1, 1)], vec![Resource::new(0).with_skill(0)]);
        fitness
            .iter()
            .map(|&f| {
                let mut ind = Individual::new(schedule.clone());
                ind.fitness = f;
                ind
            })
            .collect()
    }

    #[test]
    fn test_full_tournament_returns_best() {
        let pop = population(&[7.0, 3.0, 9.0, 4.0, 3.5]);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(tournament(&pop, pop.len(), &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_tournament_size_one_is_uniform_pick() {
        let pop = population(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[tournament(&pop, 1, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_tournament_pressure() {
        // With k=3 out of 4, the worst individual can never win.
        let pop = population(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            assert_ne!(tournament(&pop, 3, &mut rng).unwrap(), 3);
        }
    }

    #[test]
    fn test_contract_violations() {
        let pop = population(&[1.0, 2.0]);
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(matches!(
            tournament(&pop, 3, &mut rng),
            Err(ScheduleError::OperatorContract(_))
        ));
        assert!(matches!(
            tournament(&pop, 0, &mut rng),
            Err(ScheduleError::OperatorContract(_))
        ));
        assert!(matches!(
            tournament(&[], 1, &mut rng),
            Err(ScheduleError::OperatorContract(_))
        ));
    }
}
