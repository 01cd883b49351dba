//! Explore-then-commit bandit policy.
use super::{ArmStats, BanditPolicy, BuildAgentError, BuildPolicy};
use crate::utils::iter::ArgMaxBy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for an [`ExploreCommit`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreCommitConfig {
    /// Number of exploration pulls of each arm before committing.
    pub samples_per_arm: u64,
}

impl ExploreCommitConfig {
    pub const fn new(samples_per_arm: u64) -> Self {
        Self { samples_per_arm }
    }
}

impl Default for ExploreCommitConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

impl BuildPolicy for ExploreCommitConfig {
    type Policy = ExploreCommit;

    fn build_policy(&self, arm_count: usize, _seed: u64) -> Result<ExploreCommit, BuildAgentError> {
        ExploreCommit::new(arm_count, self.samples_per_arm)
    }
}

/// Phase of an [`ExploreCommit`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Sampling under-explored arms in index order.
    Exploring,
    /// Permanently exploiting the best-observed arm.
    Committed,
}

/// Pulls every arm `m` times in index order, then permanently selects the
/// arm with the greatest value estimate (ties to the lowest index).
///
/// `tau` counts exploration rounds only. The transition to
/// [`Phase::Committed`] fires on the first selection where `tau` has reached
/// `arm_count * m` and never reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreCommit {
    /// Number of exploration pulls of each arm.
    pub samples_per_arm: u64,

    /// Total exploration rounds, `arm_count * samples_per_arm`.
    exploration_budget: u64,
    /// Exploration rounds taken so far.
    tau: u64,
    phase: Phase,
}

impl ExploreCommit {
    /// Create an explore-then-commit policy for a bandit with `arm_count` arms.
    ///
    /// # Errors
    /// If `samples_per_arm` is zero.
    pub fn new(arm_count: usize, samples_per_arm: u64) -> Result<Self, BuildAgentError> {
        if samples_per_arm == 0 {
            return Err(BuildAgentError::NoExploreSamples);
        }
        Ok(Self {
            samples_per_arm,
            exploration_budget: arm_count as u64 * samples_per_arm,
            tau: 0,
            phase: Phase::Exploring,
        })
    }

    /// The current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

impl fmt::Display for ExploreCommit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ExploreCommit(m={})", self.samples_per_arm)
    }
}

impl BanditPolicy for ExploreCommit {
    fn select_arm(&mut self, stats: &ArmStats) -> usize {
        if self.phase == Phase::Exploring && self.tau >= self.exploration_budget {
            self.phase = Phase::Committed;
        }
        match self.phase {
            Phase::Exploring => {
                self.tau += 1;
                stats
                    .pull_counts()
                    .iter()
                    .position(|&count| count < self.samples_per_arm)
                    .expect("an under-sampled arm exists while exploring")
            }
            Phase::Committed => stats
                .estimates()
                .iter()
                .argmax_by(|a, b| a.partial_cmp(b).unwrap())
                .expect("empty arm set"),
        }
    }
}

#[cfg(test)]
mod explore_commit {
    use super::*;
    use crate::agents::PolicyAgent;
    use crate::envs::DeterministicBandit;

    #[test]
    fn zero_samples_per_arm_rejected() {
        assert_eq!(
            ExploreCommit::new(3, 0).err(),
            Some(BuildAgentError::NoExploreSamples)
        );
    }

    #[test]
    fn explores_in_index_order_then_commits() {
        let mut env = DeterministicBandit::from_values(vec![1.0, 3.0, 2.0]).unwrap();
        let mut agent = PolicyAgent::new(ExploreCommit::new(3, 1).unwrap(), 3);
        agent.run_trial(&mut env, 10);

        // With m = 1 and three arms: one pull of each arm in index order,
        // then argmax of the three exact estimates forever.
        assert_eq!(
            agent.history().actions,
            vec![0, 1, 2, 1, 1, 1, 1, 1, 1, 1]
        );
    }

    #[test]
    fn each_arm_sampled_exactly_m_times_before_commit() {
        let mut env = DeterministicBandit::from_values(vec![0.0, 1.0]).unwrap();
        let mut agent = PolicyAgent::new(ExploreCommit::new(2, 5).unwrap(), 2);
        agent.run_trial(&mut env, 10);
        assert_eq!(agent.pull_counts(), &[5, 5]);
        assert_eq!(agent.policy().phase(), Phase::Exploring);

        agent.run_trial(&mut env, 1);
        assert_eq!(agent.policy().phase(), Phase::Committed);
        assert_eq!(agent.pull_counts(), &[5, 6]);
    }

    #[test]
    fn committed_phase_never_reverts() {
        let mut env = DeterministicBandit::from_values(vec![0.0, 1.0]).unwrap();
        let mut agent = PolicyAgent::new(ExploreCommit::new(2, 1).unwrap(), 2);
        agent.run_trial(&mut env, 100);
        assert_eq!(agent.policy().phase(), Phase::Committed);
        // All post-exploration pulls go to the committed arm.
        assert_eq!(agent.pull_counts(), &[1, 99]);
    }

    #[test]
    fn commit_ties_break_to_lowest_index() {
        let mut env = DeterministicBandit::from_values(vec![1.0, 1.0]).unwrap();
        let mut agent = PolicyAgent::new(ExploreCommit::new(2, 1).unwrap(), 2);
        agent.run_trial(&mut env, 5);
        assert_eq!(agent.history().actions, vec![0, 1, 0, 0, 0]);
    }
}
