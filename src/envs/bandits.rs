use super::{BanditEnvironment, BuildEnvError, EnvBuilder};
use crate::utils::iter::ArgMaxBy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard deviation of every arm's reward distribution.
const ARM_STD_DEV: f64 = 1.0;

/// A multi-armed bandit with normally distributed arm rewards.
///
/// Each arm has a fixed mean, hidden from agents, and unit standard
/// deviation. The best arm and its expected reward are computed once at
/// construction; no arm's distribution ever changes.
pub struct GaussianBandit {
    means: Vec<f64>,
    std_devs: Vec<f64>,
    best_arm: usize,
    best_reward: f64,
    rng: StdRng,
}

impl GaussianBandit {
    fn new(means: Vec<f64>, rng: StdRng) -> Result<Self, BuildEnvError> {
        if means.is_empty() {
            return Err(BuildEnvError::NoArms);
        }
        let std_devs = vec![ARM_STD_DEV; means.len()];
        let best_arm = means
            .iter()
            .argmax_by(|a, b| a.partial_cmp(b).unwrap())
            .expect("means is non-empty");
        let best_reward = means[best_arm];
        Ok(Self {
            means,
            std_devs,
            best_arm,
            best_reward,
            rng,
        })
    }

    /// Create a bandit with the given arm means.
    ///
    /// `seed` initializes the reward-sampling random state.
    pub fn from_means(means: Vec<f64>, seed: u64) -> Result<Self, BuildEnvError> {
        Self::new(means, StdRng::seed_from_u64(seed))
    }

    /// Create a bandit whose arm means are sampled from `Normal(0, prior_std)`.
    ///
    /// The same `seed` drives both the prior draw and later reward sampling.
    pub fn from_prior(num_arms: usize, prior_std: f64, seed: u64) -> Result<Self, BuildEnvError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let prior = Normal::new(0.0, prior_std)?;
        let means = (0..num_arms).map(|_| prior.sample(&mut rng)).collect();
        Self::new(means, rng)
    }
}

impl fmt::Display for GaussianBandit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GaussianBandit({:?})", self.means)
    }
}

impl BanditEnvironment for GaussianBandit {
    fn arm_count(&self) -> usize {
        self.means.len()
    }

    fn pull(&mut self, arm: usize) -> f64 {
        Normal::new(self.means[arm], self.std_devs[arm])
            .unwrap()
            .sample(&mut self.rng)
    }

    fn expected_reward(&self, arm: usize) -> f64 {
        self.means[arm]
    }

    fn best_arm(&self) -> usize {
        self.best_arm
    }

    fn best_expected_reward(&self) -> f64 {
        self.best_reward
    }
}

/// A bandit where pulling an arm always returns that arm's exact mean reward.
///
/// Zero-variance counterpart of [`GaussianBandit`], useful for deterministic
/// tests and baselines.
pub struct DeterministicBandit {
    means: Vec<f64>,
    best_arm: usize,
}

impl DeterministicBandit {
    /// Create a bandit from a vector of per-arm reward values.
    pub fn from_values(means: Vec<f64>) -> Result<Self, BuildEnvError> {
        if means.is_empty() {
            return Err(BuildEnvError::NoArms);
        }
        let best_arm = means
            .iter()
            .argmax_by(|a, b| a.partial_cmp(b).unwrap())
            .expect("means is non-empty");
        Ok(Self { means, best_arm })
    }
}

impl fmt::Display for DeterministicBandit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DeterministicBandit({:?})", self.means)
    }
}

impl BanditEnvironment for DeterministicBandit {
    fn arm_count(&self) -> usize {
        self.means.len()
    }

    fn pull(&mut self, arm: usize) -> f64 {
        self.means[arm]
    }

    fn expected_reward(&self, arm: usize) -> f64 {
        self.means[arm]
    }

    fn best_arm(&self) -> usize {
        self.best_arm
    }
}

/// Configuration for a [`GaussianBandit`] with fixed arm means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedMeansBanditConfig {
    /// The expected reward of each arm.
    pub means: Vec<f64>,
}

impl EnvBuilder<GaussianBandit> for FixedMeansBanditConfig {
    fn build_env(&self, seed: u64) -> Result<GaussianBandit, BuildEnvError> {
        GaussianBandit::from_means(self.means.clone(), seed)
    }
}

/// Configuration for a [`GaussianBandit`] with arm means drawn from a
/// zero-mean normal prior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorMeansBanditConfig {
    /// Number of arms.
    pub num_arms: usize,
    /// Standard deviation of the prior over arm means.
    pub prior_std: f64,
}

impl Default for PriorMeansBanditConfig {
    fn default() -> Self {
        Self {
            num_arms: 10,
            prior_std: 2.0,
        }
    }
}

impl EnvBuilder<GaussianBandit> for PriorMeansBanditConfig {
    fn build_env(&self, seed: u64) -> Result<GaussianBandit, BuildEnvError> {
        GaussianBandit::from_prior(self.num_arms, self.prior_std, seed)
    }
}

#[cfg(test)]
mod gaussian_bandit {
    use super::*;

    #[test]
    fn best_arm_matches_means() {
        let env = GaussianBandit::from_means(vec![-1.0, 2.0, 0.5], 0).unwrap();
        assert_eq!(env.best_arm(), 1);
        assert_eq!(env.best_expected_reward(), 2.0);
    }

    #[test]
    fn no_arms_fails() {
        assert_eq!(
            GaussianBandit::from_means(vec![], 0).err(),
            Some(BuildEnvError::NoArms)
        );
    }

    #[test]
    fn prior_build_is_reproducible() {
        let config = PriorMeansBanditConfig::default();
        let a = config.build_env(17).unwrap();
        let b = config.build_env(17).unwrap();
        assert_eq!(a.arm_count(), config.num_arms);
        assert_eq!(a.means, b.means);
    }

    #[test]
    fn oracle_is_immutable_across_pulls() {
        let mut env = GaussianBandit::from_means(vec![0.0, 1.0], 3).unwrap();
        let best = (env.best_arm(), env.best_expected_reward());
        for _ in 0..100 {
            env.pull(0);
            env.pull(1);
        }
        assert_eq!((env.best_arm(), env.best_expected_reward()), best);
    }

    #[test]
    #[should_panic]
    fn out_of_range_arm_panics() {
        let mut env = GaussianBandit::from_means(vec![0.0, 1.0], 0).unwrap();
        env.pull(2);
    }
}

#[cfg(test)]
mod deterministic_bandit {
    use super::*;

    #[test]
    fn pull_returns_exact_means() {
        let mut env = DeterministicBandit::from_values(vec![0.0, 1.0]).unwrap();
        assert_eq!(env.pull(0), 0.0);
        assert_eq!(env.pull(1), 1.0);
        assert_eq!(env.best_arm(), 1);
    }
}
