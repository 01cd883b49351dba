//! Shared agent bookkeeping: per-arm statistics and trial trajectories.
use serde::{Deserialize, Serialize};

/// Per-arm pull counts and incremental value estimates.
///
/// This is the state shared by every policy: counts are non-negative and
/// monotone, exactly one count is incremented per round, and the estimate of
/// the pulled arm is folded toward the sampled reward by the online-mean
/// recurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmStats {
    pull_counts: Vec<u64>,
    estimates: Vec<f64>,
}

impl ArmStats {
    /// Create statistics for `arm_count` arms, all counts and estimates zero.
    pub fn new(arm_count: usize) -> Self {
        Self {
            pull_counts: vec![0; arm_count],
            estimates: vec![0.0; arm_count],
        }
    }

    /// Number of arms.
    pub fn arm_count(&self) -> usize {
        self.pull_counts.len()
    }

    /// Number of times each arm has been pulled.
    pub fn pull_counts(&self) -> &[u64] {
        &self.pull_counts
    }

    /// Running estimate of each arm's expected reward.
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Total number of pulls across all arms.
    pub fn total_pulls(&self) -> u64 {
        self.pull_counts.iter().sum()
    }

    /// Record one pull of `arm` with the sampled `reward`.
    ///
    /// Increments the pull count first, then updates the running mean with
    /// the post-increment count: `estimate += (reward - estimate) / count`.
    pub fn record(&mut self, arm: usize, reward: f64) {
        self.pull_counts[arm] += 1;
        let count = self.pull_counts[arm] as f64;
        self.estimates[arm] += (reward - self.estimates[arm]) / count;
    }
}

/// Per-round trajectories recorded during a trial.
///
/// Append-only, one entry per round. Never consulted by selection logic;
/// recorded so external consumers can analyze a trial after the fact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialHistory {
    /// The arm chosen each round.
    pub actions: Vec<usize>,
    /// The sampled reward each round.
    pub rewards: Vec<f64>,
    /// Cumulative expected regret after each round.
    pub regret: Vec<f64>,
    /// Fraction of rounds so far that chose the best arm.
    pub optimal_fraction: Vec<f64>,
    /// A snapshot of every arm's value estimate after each round.
    pub estimates: Vec<Vec<f64>>,
}

impl TrialHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded rounds.
    pub fn num_rounds(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
