use st_ai::AiError;
use st_command::CommandError;
use st_core::{AgentId, CoreError, Int3D};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {agent} at {position} lies outside the universe grid")]
    OutOfBounds { agent: AgentId, position: Int3D },

    #[error("delivery failed: {0}")]
    Command(#[from] CommandError),

    #[error("decision failed: {0}")]
    Ai(#[from] AiError),
}

pub type SimResult<T> = Result<T, SimError>;
