use st_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} does not exist in this store")]
    UnknownAgent(AgentId),

    #[error("leadership cycle detected through agent {0}")]
    HierarchyCycle(AgentId),

    #[error("{what} length {got} does not match agent count {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AgentResult<T> = Result<T, AgentError>;
