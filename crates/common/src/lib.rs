//! Shared types for the cosmos workspace: identifiers, input limits, errors.

mod error;
mod types;

pub use error::CosmosError;
pub use types::{EntityId, MAX_NAME_LENGTH, MAX_PETITION_LENGTH, WorldId};

/// Result alias used by every library crate in the workspace.
pub type Result<T> = std::result::Result<T, CosmosError>;
