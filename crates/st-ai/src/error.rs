use st_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("agent {0} is not in the universe snapshot")]
    UnknownAgent(AgentId),

    #[error("reasoner `{0}` has no children")]
    EmptyReasoner(String),
}

pub type AiResult<T> = Result<T, AiError>;
