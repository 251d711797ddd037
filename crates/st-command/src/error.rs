use st_agent::{CarrierId, FactoryId};
use st_core::AgentId;
use thiserror::Error;

/// An `execute` call found the target in a state its `can_execute` should
/// have ruled out.  Raised before any write, so the target is untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecuteFault {
    #[error("carrier {0:?} vanished between validation and execution")]
    MissingCarrier(CarrierId),

    #[error("factory {0:?} vanished between validation and execution")]
    MissingFactory(FactoryId),

    #[error("{what} evaluated to a non-finite value ({value})")]
    NonFinite { what: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command addressed to unknown agent {0}")]
    UnknownTarget(AgentId),
}

pub type CommandResult<T> = Result<T, CommandError>;
