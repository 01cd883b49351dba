//! Upper confidence bound bandit policy.
use super::{ArmStats, BanditPolicy, BuildAgentError, BuildPolicy};
use crate::utils::iter::ArgMaxBy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a [`Ucb`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UcbConfig {
    /// Confidence parameter δ; smaller values widen the exploration bonus.
    pub confidence: f64,
}

impl UcbConfig {
    pub const fn new(confidence: f64) -> Self {
        Self { confidence }
    }
}

impl Default for UcbConfig {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl BuildPolicy for UcbConfig {
    type Policy = Ucb;

    fn build_policy(&self, arm_count: usize, _seed: u64) -> Result<Ucb, BuildAgentError> {
        Ucb::new(arm_count, self.confidence)
    }
}

/// Selects the arm with the greatest upper confidence bound
/// `estimate + sqrt(2 ln(1/δ) / count)`.
///
/// The first `arm_count` rounds are a warm start that pulls every arm once
/// in index order; the bound formula is never evaluated for an arm with zero
/// pulls. After every pull the bounds of all arms are recomputed from the
/// current counts and estimates, so an arm's bound depends only on its own
/// statistics and stays constant while other arms accrue pulls.
#[derive(Debug, Clone, PartialEq)]
pub struct Ucb {
    /// Confidence parameter δ; smaller values widen the exploration bonus.
    pub confidence: f64,

    /// Squared bonus width numerator, `2 ln(1/δ)`.
    bonus_scale: f64,
    /// Current upper confidence bound of each arm.
    bounds: Vec<f64>,
}

impl Ucb {
    /// Create a UCB policy for a bandit with `arm_count` arms.
    ///
    /// # Errors
    /// If `confidence` is outside the open interval `(0, 1)`.
    pub fn new(arm_count: usize, confidence: f64) -> Result<Self, BuildAgentError> {
        if confidence <= 0.0 || confidence >= 1.0 {
            return Err(BuildAgentError::InvalidConfidence(confidence));
        }
        Ok(Self {
            confidence,
            bonus_scale: 2.0 * confidence.recip().ln(),
            bounds: vec![f64::INFINITY; arm_count],
        })
    }

    /// The current upper confidence bound of each arm.
    ///
    /// Arms not yet pulled hold `f64::INFINITY` until the warm start reaches
    /// them.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }
}

impl fmt::Display for Ucb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ucb(δ={})", self.confidence)
    }
}

impl BanditPolicy for Ucb {
    fn select_arm(&mut self, stats: &ArmStats) -> usize {
        // Warm start: every arm is pulled once, in index order, before any
        // bound is consulted.
        if let Some(arm) = stats.pull_counts().iter().position(|&count| count == 0) {
            return arm;
        }
        self.bounds
            .iter()
            .argmax_by(|a, b| a.partial_cmp(b).unwrap())
            .expect("empty arm set")
    }

    fn update(&mut self, _arm: usize, stats: &ArmStats) {
        for (arm, bound) in self.bounds.iter_mut().enumerate() {
            let count = stats.pull_counts()[arm];
            if count > 0 {
                *bound = stats.estimates()[arm] + (self.bonus_scale / count as f64).sqrt();
            }
        }
    }
}

#[cfg(test)]
mod ucb {
    use super::*;
    use crate::agents::PolicyAgent;
    use crate::envs::{BanditEnvironment, DeterministicBandit};

    #[test]
    fn invalid_confidence_rejected() {
        for confidence in [0.0, 1.0, -0.5, 2.0] {
            assert!(matches!(
                Ucb::new(2, confidence),
                Err(BuildAgentError::InvalidConfidence(_))
            ));
        }
    }

    #[test]
    fn warm_start_pulls_each_arm_once_in_order() {
        let mut env = DeterministicBandit::from_values(vec![0.0, 10.0, 5.0]).unwrap();
        let mut agent = PolicyAgent::new(Ucb::new(3, 0.01).unwrap(), 3);
        agent.run_trial(&mut env, 3);
        assert_eq!(agent.history().actions, vec![0, 1, 2]);
        assert_eq!(agent.pull_counts(), &[1, 1, 1]);
    }

    #[test]
    fn bound_is_constant_while_other_arms_accrue_pulls() {
        // Arm 1 dominates, so arm 0 is never pulled after the warm start and
        // its bound must not move.
        let mut env = DeterministicBandit::from_values(vec![0.0, 10.0]).unwrap();
        let mut agent = PolicyAgent::new(Ucb::new(2, 0.01).unwrap(), 2);
        agent.run_trial(&mut env, 2);
        let stale_bound = agent.policy().bounds()[0];

        agent.run_trial(&mut env, 100);
        assert_eq!(agent.pull_counts()[0], 1);
        assert_eq!(agent.policy().bounds()[0], stale_bound);
    }

    #[test]
    fn bound_formula_uses_own_count_and_estimate() {
        let mut env = DeterministicBandit::from_values(vec![1.0, 2.0]).unwrap();
        let confidence: f64 = 0.01;
        let mut agent = PolicyAgent::new(Ucb::new(2, confidence).unwrap(), 2);
        agent.run_trial(&mut env, 2);

        let bonus = (2.0 * confidence.recip().ln()).sqrt();
        let bounds = agent.policy().bounds();
        assert!((bounds[0] - (1.0 + bonus)).abs() < 1e-12);
        assert!((bounds[1] - (2.0 + bonus)).abs() < 1e-12);
    }

    #[test]
    fn learns_deterministic_bandit() {
        let mut env = DeterministicBandit::from_values(vec![0.0, 1.0]).unwrap();
        let config = UcbConfig::default();
        let mut agent = config.build_agent(&env, 0).unwrap();
        agent.run_trial(&mut env, 1000);
        // One warm-start pull of the worse arm, then the bonus keeps the
        // better arm's bound ahead.
        assert!(agent.optimal_pulls() > 900);
        assert_eq!(env.best_arm(), 1);
    }
}
