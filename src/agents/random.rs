//! Uniform random baseline policy.
use super::{ArmStats, BanditPolicy, BuildAgentError, BuildPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a [`RandomPolicy`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomPolicyConfig;

impl BuildPolicy for RandomPolicyConfig {
    type Policy = RandomPolicy;

    fn build_policy(&self, _arm_count: usize, seed: u64) -> Result<RandomPolicy, BuildAgentError> {
        Ok(RandomPolicy::new(seed))
    }
}

/// Selects a uniformly random arm every round, ignoring all statistics.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for RandomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RandomPolicy")
    }
}

impl BanditPolicy for RandomPolicy {
    fn select_arm(&mut self, stats: &ArmStats) -> usize {
        self.rng.gen_range(0..stats.arm_count())
    }
}
