//! Error type
use crate::agents::BuildAgentError;
use crate::envs::BuildEnvError;
use thiserror::Error;

/// Error initializing or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("error building agent")]
    BuildAgent(#[from] BuildAgentError),
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
}
