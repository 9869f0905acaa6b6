use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Names of this length (in bytes) or longer are rejected.
pub const MAX_NAME_LENGTH: usize = 256;

/// Petition messages of this length (in bytes) or longer are rejected.
pub const MAX_PETITION_LENGTH: usize = 1024;

/// Sequential identifier of an entity within one world's registry.
///
/// Ids start at 1 and follow append order. They are only meaningful inside the
/// world that assigned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one world instance. Every copy gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
