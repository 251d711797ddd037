//! Workspace error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `st-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `st-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
