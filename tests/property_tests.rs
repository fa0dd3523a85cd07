//! Property-based tests for u-mspsp
//!
//! Random instances are generated from a seed so every case is reproducible.
//! Predecessors always have lower ids. Resources share skill types, and only
//! demands that distinct capable resources can cover are kept.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use u_mspsp::constraints::{self, ConstraintReport};
use u_mspsp::ga::{mutate, splice, tournament, Individual};
use u_mspsp::models::{Activity, ProjectInstance, Resource, Schedule};
use u_mspsp::scheduler::{assign_timestamps, initialize_schedule};
use u_mspsp::validation::validate_instance;

fn random_instance(seed: u64, n_acts: usize, n_skills: usize, n_res: usize) -> ProjectInstance {
    let mut rng = SmallRng::seed_from_u64(seed);

    // Resources master overlapping skill sets, so skill types compete for
    // the same resources inside one activity.
    let resources: Vec<Resource> = (0..n_res)
        .map(|r| {
            let extra: Vec<usize> = (0..n_skills).filter(|_| rng.random_bool(0.5)).collect();
            Resource::new(r).with_skill(r % n_skills).with_skills(extra)
        })
        .collect();

    let activities: Vec<Activity> = (1..=n_acts)
        .map(|id| {
            let duration = rng.random_range(0..6);
            let demand = (0..8)
                .map(|_| random_demand(&mut rng, id, duration, n_skills, &resources))
                .find(|act| validate_instance(n_skills, std::slice::from_ref(act), &resources).is_ok())
                .unwrap_or_else(|| Activity::new(id, duration));

            let mut act = demand;
            for pred in 1..id {
                if rng.random_bool(0.3) {
                    act = act.with_predecessor(pred);
                }
            }
            act
        })
        .collect();

    ProjectInstance::new(n_skills, activities, resources).unwrap()
}

/// Demand of up to two units per skill type, not yet checked as a whole.
fn random_demand(
    rng: &mut SmallRng,
    id: usize,
    duration: i64,
    n_skills: usize,
    resources: &[Resource],
) -> Activity {
    (0..n_skills).fold(Activity::new(id, duration), |act, t| {
        let capable = resources.iter().filter(|r| r.is_capable_of(t)).count();
        act.with_skill(t, rng.random_range(0..=capable.min(2)))
    })
}

fn constructed(seed: u64, n_acts: usize, n_skills: usize, n_res: usize) -> Schedule {
    let instance = random_instance(seed, n_acts, n_skills, n_res);
    let mut schedule = instance.schedule();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    initialize_schedule(&mut schedule, &mut rng).unwrap();
    schedule
}

proptest! {
    // ==================== Greedy timing ====================

    #[test]
    fn greedy_timing_is_feasible(
        seed in any::<u64>(),
        n_acts in 1usize..10,
        n_skills in 1usize..4,
        n_res in 1usize..5
    ) {
        let mut s = constructed(seed, n_acts, n_skills, n_res);
        assign_timestamps(&mut s);
        prop_assert!(constraints::validate(&s));
    }

    #[test]
    fn earliest_time_follows_predecessors(
        seed in any::<u64>(),
        n_acts in 1usize..10,
        n_skills in 1usize..4,
        n_res in 1usize..5
    ) {
        let mut s = constructed(seed, n_acts, n_skills, n_res);
        assign_timestamps(&mut s);

        for act in s.activities() {
            let expected = act
                .predecessors
                .iter()
                .filter_map(|&p| s.activity(p).and_then(|a| a.finish()))
                .map(|f| f + 1)
                .max()
                .unwrap_or(0);
            prop_assert_eq!(s.earliest_time(act), expected);
            if act.predecessors.is_empty() {
                prop_assert_eq!(s.earliest_time(act), 0);
            }
        }
    }

    #[test]
    fn greedy_timing_is_idempotent(
        seed in any::<u64>(),
        n_acts in 1usize..10,
        n_skills in 1usize..4,
        n_res in 1usize..5
    ) {
        let mut s = constructed(seed, n_acts, n_skills, n_res);
        assign_timestamps(&mut s);
        let first = s.clone();
        assign_timestamps(&mut s);

        prop_assert_eq!(first.activities(), s.activities());
        prop_assert_eq!(first.resources(), s.resources());
    }

    // ==================== Schedule ownership ====================

    #[test]
    fn copies_are_independent(
        seed in any::<u64>(),
        n_acts in 1usize..10,
        shift in 1i64..50
    ) {
        let original = constructed(seed, n_acts, 2, 3);
        let mut copy = original.clone();
        copy.activities_mut()[0].start = Some(shift + 1000);
        copy.resources_mut()[0].finish = Some(shift + 1000);
        copy.activities_mut()[0].clear_assignments();

        prop_assert_ne!(original.activities()[0].start, Some(shift + 1000));
        prop_assert_ne!(original.resources()[0].finish, Some(shift + 1000));
        prop_assert_eq!(constraints::validate_assignment_constraint(&original), 0);
    }

    // ==================== Constraint checking ====================

    #[test]
    fn report_total_matches_counts(
        seed in any::<u64>(),
        n_acts in 1usize..10,
        jitter in prop::collection::vec(-3i64..3, 10)
    ) {
        let mut s = constructed(seed, n_acts, 2, 3);
        assign_timestamps(&mut s);
        for (act, j) in s.activities_mut().iter_mut().zip(&jitter) {
            act.start = act.start.map(|st| (st + j).max(0));
        }

        let report = ConstraintReport::check(&s);
        let sum = constraints::validate_assignment_constraint(&s)
            + constraints::validate_conflict_constraint(&s)
            + constraints::validate_precedence_constraint(&s)
            + constraints::validate_skill_constraint(&s);
        prop_assert_eq!(constraints::number_of_conflicts(&s), sum);
        prop_assert_eq!(report.total(), sum);
        prop_assert_eq!(constraints::validate(&s), sum == 0);
        prop_assert_eq!(constraints::violations(&s).len(), sum);
    }

    // ==================== GA operators ====================

    #[test]
    fn construction_and_mutation_never_fail(
        seed in any::<u64>(),
        n_acts in 1usize..10,
        n_skills in 1usize..4,
        n_res in 1usize..5
    ) {
        let instance = random_instance(seed, n_acts, n_skills, n_res);
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..5 {
            let mut s = instance.schedule();
            prop_assert!(initialize_schedule(&mut s, &mut rng).is_ok());
            prop_assert_eq!(constraints::validate_assignment_constraint(&s), 0);
            prop_assert_eq!(constraints::validate_skill_constraint(&s), 0);

            for _ in 0..10 {
                prop_assert!(mutate(&mut s, &mut rng).is_ok());
            }
            prop_assert_eq!(constraints::validate_assignment_constraint(&s), 0);
            prop_assert_eq!(constraints::validate_skill_constraint(&s), 0);
            for act in s.activities() {
                let bound: usize = act.required_skills.iter().map(|r| r.assigned()).sum();
                prop_assert_eq!(bound, act.bound_resources().len());
            }
        }
    }

    #[test]
    fn splice_at_bounds_copies_a_parent(
        seed in any::<u64>(),
        n_acts in 1usize..10
    ) {
        let instance = random_instance(seed, n_acts, 2, 3);
        let mut p1 = instance.schedule();
        let mut p2 = instance.schedule();
        let mut rng = SmallRng::seed_from_u64(seed);
        initialize_schedule(&mut p1, &mut rng).unwrap();
        initialize_schedule(&mut p2, &mut rng).unwrap();

        let head = splice(&p1, &p2, 0).unwrap();
        prop_assert_eq!(head.activities(), p2.activities());
        let tail = splice(&p1, &p2, n_acts).unwrap();
        prop_assert_eq!(tail.activities(), p1.activities());
    }

    #[test]
    fn full_tournament_returns_best(
        fitness in prop::collection::vec(0.0f64..1000.0, 1..30),
        seed in any::<u64>()
    ) {
        let template = Schedule::new(1, vec![Activity::new(1, 1)], vec![Resource::new(0).with_skill(0)]);
        let population: Vec<Individual> = fitness
            .iter()
            .map(|&f| {
                let mut ind = Individual::new(template.clone());
                ind.fitness = f;
                ind
            })
            .collect();
        let best = population
            .iter()
            .map(|i| i.fitness)
            .fold(f64::INFINITY, f64::min);

        let mut rng = SmallRng::seed_from_u64(seed);
        let winner = tournament(&population, population.len(), &mut rng).unwrap();
        prop_assert_eq!(population[winner].fitness, best);
    }
}
