use std::collections::TryReserveError;

/// Errors produced by world construction, registry growth and transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CosmosError {
    /// A required input was missing, empty, out of range or too long.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Memory for a new or copied structure could not be obtained.
    #[error("allocation failed: {0}")]
    AllocationError(String),
    /// The entropy ratio was requested with a zero maximum entropy.
    #[error("division by zero: maximum entropy is zero")]
    DivisionByZero,
}

impl CosmosError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Wrap a failed `try_reserve` with the name of the structure being built.
    pub fn allocation(what: &str, err: TryReserveError) -> Self {
        Self::AllocationError(format!("{what}: {err}"))
    }
}
