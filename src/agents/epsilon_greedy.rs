//! Epsilon-greedy bandit policy.
use super::{ArmStats, BanditPolicy, BuildAgentError, BuildPolicy};
use crate::utils::iter::ArgMaxBy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for an [`EpsilonGreedy`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedyConfig {
    /// Probability of selecting a uniformly random arm.
    pub exploration_rate: f64,
}

impl EpsilonGreedyConfig {
    pub const fn new(exploration_rate: f64) -> Self {
        Self { exploration_rate }
    }
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl BuildPolicy for EpsilonGreedyConfig {
    type Policy = EpsilonGreedy;

    fn build_policy(&self, _arm_count: usize, seed: u64) -> Result<EpsilonGreedy, BuildAgentError> {
        EpsilonGreedy::new(self.exploration_rate, seed)
    }
}

/// Selects a uniformly random arm with probability ε, otherwise the arm with
/// the greatest value estimate.
///
/// Ties in the estimates are broken by the lowest arm index, so with ε = 0
/// the selection is fully deterministic given the estimates.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    /// Probability of selecting a uniformly random arm.
    pub exploration_rate: f64,

    rng: StdRng,
}

impl EpsilonGreedy {
    /// Create an ε-greedy policy.
    ///
    /// # Errors
    /// If `exploration_rate` is outside `[0, 1]`.
    pub fn new(exploration_rate: f64, seed: u64) -> Result<Self, BuildAgentError> {
        if !(0.0..=1.0).contains(&exploration_rate) {
            return Err(BuildAgentError::InvalidExplorationRate(exploration_rate));
        }
        Ok(Self {
            exploration_rate,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl fmt::Display for EpsilonGreedy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EpsilonGreedy(ε={})", self.exploration_rate)
    }
}

impl BanditPolicy for EpsilonGreedy {
    fn select_arm(&mut self, stats: &ArmStats) -> usize {
        if self.rng.gen::<f64>() < self.exploration_rate {
            self.rng.gen_range(0..stats.arm_count())
        } else {
            stats
                .estimates()
                .iter()
                .argmax_by(|a, b| a.partial_cmp(b).unwrap())
                .expect("empty arm set")
        }
    }
}

#[cfg(test)]
mod epsilon_greedy {
    use super::*;
    use crate::agents::PolicyAgent;
    use crate::envs::{BanditEnvironment, DeterministicBandit};

    #[test]
    fn invalid_exploration_rate_rejected() {
        assert!(matches!(
            EpsilonGreedy::new(-0.1, 0),
            Err(BuildAgentError::InvalidExplorationRate(_))
        ));
        assert!(matches!(
            EpsilonGreedy::new(1.5, 0),
            Err(BuildAgentError::InvalidExplorationRate(_))
        ));
    }

    #[test]
    fn zero_epsilon_never_explores() {
        let mut policy = EpsilonGreedy::new(0.0, 0).unwrap();
        let mut stats = ArmStats::new(3);
        stats.record(0, 0.0);
        stats.record(1, 2.0);
        stats.record(2, 1.0);
        for _ in 0..100 {
            assert_eq!(policy.select_arm(&stats), 1);
        }
    }

    #[test]
    fn zero_epsilon_ties_break_to_lowest_index() {
        let mut policy = EpsilonGreedy::new(0.0, 0).unwrap();
        let stats = ArmStats::new(4);
        assert_eq!(policy.select_arm(&stats), 0);
    }

    #[test]
    fn full_epsilon_selects_uniformly() {
        let mut policy = EpsilonGreedy::new(1.0, 53).unwrap();
        let stats = ArmStats::new(4);
        let num_samples = 100_000;
        let mut counts = [0u64; 4];
        for _ in 0..num_samples {
            counts[policy.select_arm(&stats)] += 1;
        }
        // Chi-square goodness-of-fit against uniform: 3 degrees of freedom,
        // critical value 16.27 at significance 0.001.
        let expected = num_samples as f64 / 4.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&count| {
                let gap = count as f64 - expected;
                gap * gap / expected
            })
            .sum();
        assert!(
            chi_square < 16.27,
            "chi-square statistic {} rejects uniformity",
            chi_square
        );
    }

    #[test]
    fn learns_deterministic_bandit() {
        let mut env = DeterministicBandit::from_values(vec![0.0, 1.0]).unwrap();
        let config = EpsilonGreedyConfig::default();
        let mut agent = config.build_agent(&env, 0).unwrap();
        agent.run_trial(&mut env, 1000);
        assert!(agent.optimal_pulls() > 800);
        assert_eq!(env.best_arm(), 1);
    }
}
