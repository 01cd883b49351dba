//! A multi-armed bandit simulation library.
//!
//! A bandit environment holds a fixed set of arms with hidden reward
//! distributions ([`envs`]). An agent pulls one arm per round, maintains
//! incremental per-arm value estimates, and accumulates expected regret
//! against the arm an oracle would pick ([`agents`]). Trials are driven by
//! [`simulation`].
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod agents;
pub mod envs;
mod error;
pub mod logging;
pub mod simulation;
pub mod utils;

pub use agents::{BanditPolicy, BuildPolicy, PolicyAgent};
pub use envs::{BanditEnvironment, EnvBuilder, GaussianBandit};
pub use error::SimError;
pub use simulation::{run_trial, SerialTrial};
