//! Bandit agents: a shared bookkeeping core composed with per-policy
//! selection logic.
//!
//! [`PolicyAgent`] owns everything every policy needs — pull counts, value
//! estimates, regret, and trajectories — while a [`BanditPolicy`] contributes
//! only the arm-selection rule. Policies therefore carry no duplicated
//! bookkeeping state.
mod epsilon_greedy;
mod explore_commit;
mod random;
mod stats;
#[cfg(test)]
pub mod testing;
mod ucb;

pub use epsilon_greedy::{EpsilonGreedy, EpsilonGreedyConfig};
pub use explore_commit::{ExploreCommit, ExploreCommitConfig, Phase};
pub use random::{RandomPolicy, RandomPolicyConfig};
pub use stats::{ArmStats, TrialHistory};
pub use ucb::{Ucb, UcbConfig};

use crate::envs::BanditEnvironment;
use std::fmt;
use thiserror::Error;

/// An arm-selection strategy.
///
/// Policies hold only decision state (exploration probabilities, confidence
/// bounds, phase counters). The pull counts and value estimates live in the
/// agent's shared [`ArmStats`] and are passed in by reference each round.
pub trait BanditPolicy {
    /// Choose the arm to pull this round.
    ///
    /// Returns an index in `[0, stats.arm_count())`.
    fn select_arm(&mut self, stats: &ArmStats) -> usize;

    /// Observe the statistics after the chosen arm was pulled and recorded.
    ///
    /// Called exactly once per round. The default does nothing.
    fn update(&mut self, arm: usize, stats: &ArmStats) {
        let _ = (arm, stats);
    }
}

impl<P: BanditPolicy + ?Sized> BanditPolicy for Box<P> {
    fn select_arm(&mut self, stats: &ArmStats) -> usize {
        P::select_arm(self, stats)
    }
    fn update(&mut self, arm: usize, stats: &ArmStats) {
        P::update(self, arm, stats)
    }
}

/// Build a policy instance.
pub trait BuildPolicy {
    type Policy: BanditPolicy;

    /// Build a policy for a bandit with `arm_count` arms.
    ///
    /// # Args
    /// * `arm_count` - Number of arms of the target bandit.
    /// * `seed` - Seeds the policy's random state,
    ///     for those policies that select stochastically.
    fn build_policy(&self, arm_count: usize, seed: u64) -> Result<Self::Policy, BuildAgentError>;

    /// Build an agent running this policy against the given environment.
    fn build_agent<E>(
        &self,
        env: &E,
        seed: u64,
    ) -> Result<PolicyAgent<Self::Policy>, BuildAgentError>
    where
        E: BanditEnvironment + ?Sized,
    {
        let policy = self.build_policy(env.arm_count(), seed)?;
        Ok(PolicyAgent::new(policy, env.arm_count()))
    }
}

/// Error building a policy or agent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildAgentError {
    #[error("exploration probability must lie in [0, 1], got {0}")]
    InvalidExplorationRate(f64),
    #[error("confidence parameter must lie in (0, 1), got {0}")]
    InvalidConfidence(f64),
    #[error("explore-then-commit requires at least one sample per arm")]
    NoExploreSamples,
}

/// A bandit agent: shared bookkeeping composed with an arm-selection policy.
///
/// Each round the agent selects an arm through its policy, pulls it, folds
/// the sampled reward into the per-arm estimates, and accumulates expected
/// regret against the environment's best arm. Trajectories of every round
/// are kept in a [`TrialHistory`].
#[derive(Debug)]
pub struct PolicyAgent<P> {
    policy: P,
    stats: ArmStats,
    cumulative_regret: f64,
    optimal_pulls: u64,
    history: TrialHistory,
}

impl<P: BanditPolicy> PolicyAgent<P> {
    /// Create an agent for a bandit with `arm_count` arms.
    pub fn new(policy: P, arm_count: usize) -> Self {
        Self {
            policy,
            stats: ArmStats::new(arm_count),
            cumulative_regret: 0.0,
            optimal_pulls: 0,
            history: TrialHistory::new(),
        }
    }

    /// Run one round: select an arm, pull it, update all bookkeeping.
    ///
    /// Returns the chosen arm and its sampled reward.
    pub fn step<E>(&mut self, env: &mut E) -> (usize, f64)
    where
        E: BanditEnvironment + ?Sized,
    {
        let arm = self.policy.select_arm(&self.stats);
        let reward = env.pull(arm);

        self.stats.record(arm, reward);
        self.policy.update(arm, &self.stats);

        if arm == env.best_arm() {
            self.optimal_pulls += 1;
        }
        // Regret is the expected-reward gap of the chosen arm, not the
        // sampled reward, so it is deterministic given the action sequence.
        self.cumulative_regret += env.best_expected_reward() - env.expected_reward(arm);

        let rounds = self.stats.total_pulls();
        self.history.actions.push(arm);
        self.history.rewards.push(reward);
        self.history.regret.push(self.cumulative_regret);
        self.history
            .optimal_fraction
            .push(self.optimal_pulls as f64 / rounds as f64);
        self.history.estimates.push(self.stats.estimates().to_vec());

        (arm, reward)
    }

    /// Run `num_steps` sequential rounds against `env`.
    pub fn run_trial<E>(&mut self, env: &mut E, num_steps: u64)
    where
        E: BanditEnvironment + ?Sized,
    {
        for _ in 0..num_steps {
            self.step(env);
        }
    }

    /// The arm-selection policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The shared per-arm statistics.
    pub fn stats(&self) -> &ArmStats {
        &self.stats
    }

    /// Running estimate of each arm's expected reward.
    pub fn estimates(&self) -> &[f64] {
        self.stats.estimates()
    }

    /// Number of times each arm has been pulled.
    pub fn pull_counts(&self) -> &[u64] {
        self.stats.pull_counts()
    }

    /// Cumulative expected regret over all rounds so far.
    pub fn cumulative_regret(&self) -> f64 {
        self.cumulative_regret
    }

    /// Number of rounds that chose the environment's best arm.
    pub fn optimal_pulls(&self) -> u64 {
        self.optimal_pulls
    }

    /// The recorded per-round trajectories.
    pub fn history(&self) -> &TrialHistory {
        &self.history
    }

    /// Consume the agent, keeping only its trajectories.
    pub fn into_history(self) -> TrialHistory {
        self.history
    }
}

impl<P: fmt::Display> fmt::Display for PolicyAgent<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PolicyAgent({})", self.policy)
    }
}
