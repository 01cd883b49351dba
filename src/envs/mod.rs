//! Bandit environments
mod bandits;

pub use bandits::{
    DeterministicBandit, FixedMeansBanditConfig, GaussianBandit, PriorMeansBanditConfig,
};

use rand_distr::NormalError;
use thiserror::Error;

/// A multi-armed bandit environment.
///
/// Holds a fixed set of arms, each with a hidden reward distribution that
/// never changes after construction. Pulling an arm samples one reward from
/// that arm's distribution.
///
/// The oracle accessors ([`expected_reward`](Self::expected_reward),
/// [`best_arm`](Self::best_arm), [`best_expected_reward`](Self::best_expected_reward))
/// expose the ground truth for regret accounting and tests.
/// They must not be consulted by an agent's selection logic.
pub trait BanditEnvironment {
    /// Number of arms.
    fn arm_count(&self) -> usize;

    /// Sample one reward from the arm's reward distribution.
    ///
    /// Does not change any persistent state beyond advancing the
    /// environment's random number generator.
    ///
    /// # Panics
    /// If `arm >= arm_count()`.
    fn pull(&mut self, arm: usize) -> f64;

    /// The expected reward of an arm (oracle).
    ///
    /// # Panics
    /// If `arm >= arm_count()`.
    fn expected_reward(&self, arm: usize) -> f64;

    /// The index of the arm with the greatest expected reward (oracle).
    fn best_arm(&self) -> usize;

    /// The expected reward of the best arm (oracle).
    fn best_expected_reward(&self) -> f64 {
        self.expected_reward(self.best_arm())
    }
}

impl<E: BanditEnvironment + ?Sized> BanditEnvironment for Box<E> {
    fn arm_count(&self) -> usize {
        E::arm_count(self)
    }
    fn pull(&mut self, arm: usize) -> f64 {
        E::pull(self, arm)
    }
    fn expected_reward(&self, arm: usize) -> f64 {
        E::expected_reward(self, arm)
    }
    fn best_arm(&self) -> usize {
        E::best_arm(self)
    }
    fn best_expected_reward(&self) -> f64 {
        E::best_expected_reward(self)
    }
}

/// Build an environment instance.
pub trait EnvBuilder<E> {
    /// Build an environment instance.
    ///
    /// # Args
    /// * `seed` - Seed for pseudo-randomness used by the environment.
    ///     Covers both randomization of the environment structure (arm means
    ///     drawn from a prior) and reward sampling within that structure.
    fn build_env(&self, seed: u64) -> Result<E, BuildEnvError>;
}

/// Error building an environment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildEnvError {
    #[error("bandit requires at least one arm")]
    NoArms,
    #[error(transparent)]
    NormalError(#[from] NormalError),
}
