use chrono::{DateTime, Utc};
use cosmos_common::{EntityId, Result, WorldId};
use cosmos_kernel::{Entity, TransitionKind, World};
use serde::Serialize;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world state for reporting and debugging.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state, with the terminal estimate taken at `now`.
    pub fn summary_at(world: &World, now: DateTime<Utc>) -> Result<WorldSummary> {
        Ok(WorldSummary {
            id: world.id(),
            created_at: world.created_at(),
            num_constants: world.num_constants(),
            entropy_level: world.entropy_level(),
            max_entropy: world.max_entropy(),
            lifespan_days: world.lifespan_days(),
            entity_count: world.entity_count(),
            lineage: world.lineage().to_vec(),
            terminal_days: world.terminal_days_at(now)?,
        })
    }

    /// Produce a summary of the world state as of now.
    pub fn summary(world: &World) -> Result<WorldSummary> {
        Self::summary_at(world, Utc::now())
    }

    pub fn inspect_entity(world: &World, id: EntityId) -> Option<EntityInfo> {
        world.entity(id).map(EntityInfo::from)
    }

    /// List all entity ids in append order.
    pub fn list_entities(world: &World) -> Vec<EntityId> {
        world.entities().iter().map(Entity::id).collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub id: WorldId,
    pub created_at: DateTime<Utc>,
    pub num_constants: usize,
    pub entropy_level: f64,
    pub max_entropy: f64,
    pub lifespan_days: u64,
    pub entity_count: usize,
    pub lineage: Vec<TransitionKind>,
    pub terminal_days: i64,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World [{}] constants={} entropy={:.4}/{:.4} lifespan={}d entities={} generation={} terminal={}d",
            &self.id.to_string()[..8],
            self.num_constants,
            self.entropy_level,
            self.max_entropy,
            self.lifespan_days,
            self.entity_count,
            self.lineage.len(),
            self.terminal_days,
        )
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone, Serialize)]
pub struct EntityInfo {
    pub id: EntityId,
    pub name: String,
    pub consciousness_level: f64,
    pub free_will_capacity: f64,
}

impl From<&Entity> for EntityInfo {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id(),
            name: e.name().to_owned(),
            consciousness_level: e.consciousness_level(),
            free_will_capacity: e.free_will_capacity(),
        }
    }
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entity {} \"{}\" consciousness={:.2} free_will={:.2}",
            self.id, self.name, self.consciousness_level, self.free_will_capacity,
        )
    }
}
