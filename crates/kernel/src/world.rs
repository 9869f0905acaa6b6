use chrono::{DateTime, Utc};
use cosmos_common::{CosmosError, EntityId, Result, WorldId};
use glam::DVec4;

use crate::census;
use crate::constants::constant_table;
use crate::registry::{Entity, EntityRegistry};
use crate::transition::TransitionKind;

/// Parameters for a freshly created world.
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisConfig {
    /// Length of the constant table.
    pub num_constants: usize,
    /// Initial entropy, in `0..=max_entropy`.
    pub entropy_level: f64,
    /// Entropy at the terminal state. Must be positive.
    pub max_entropy: f64,
    /// Total lifespan in days, counted from creation.
    pub lifespan_days: u64,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            num_constants: 30,
            entropy_level: 0.618,
            max_entropy: 1.0,
            lifespan_days: 5000 * 365,
        }
    }
}

impl GenesisConfig {
    fn validate(&self) -> Result<()> {
        if !self.max_entropy.is_finite() || self.max_entropy <= 0.0 {
            return Err(CosmosError::invalid(format!(
                "max entropy must be positive and finite, got {}",
                self.max_entropy
            )));
        }
        if !self.entropy_level.is_finite() || self.entropy_level < 0.0 {
            return Err(CosmosError::invalid(format!(
                "entropy level must be non-negative and finite, got {}",
                self.entropy_level
            )));
        }
        if self.entropy_level > self.max_entropy {
            return Err(CosmosError::invalid(format!(
                "entropy level {} exceeds max entropy {}",
                self.entropy_level, self.max_entropy
            )));
        }
        Ok(())
    }
}

/// Scalar fields of a world, copied verbatim between instances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scalars {
    pub spacetime: DVec4,
    pub matter: f64,
    pub energy: f64,
    pub created_at: DateTime<Utc>,
    pub lifespan_days: u64,
    pub entropy_level: f64,
    pub max_entropy: f64,
}

/// The authoritative state of one simulated world.
///
/// Constants and scalar fields are fixed once the world exists; the only
/// in-place mutation is appending entities. Everything else is expressed as a
/// transition that produces a new world (see [`crate::transition`]).
///
/// `World` is not `Clone`; copies go through the fallible [`World::duplicate`].
#[derive(Debug)]
pub struct World {
    pub(crate) id: WorldId,
    pub(crate) constants: Vec<f64>,
    pub(crate) scalars: Scalars,
    pub(crate) entities: EntityRegistry,
    pub(crate) lineage: Vec<TransitionKind>,
}

impl World {
    /// Create a world from `config`, timestamped now.
    pub fn genesis(config: &GenesisConfig) -> Result<Self> {
        Self::genesis_at(config, Utc::now())
    }

    /// Create a world from `config` with an explicit creation time.
    pub fn genesis_at(config: &GenesisConfig, created_at: DateTime<Utc>) -> Result<Self> {
        config.validate()?;
        let constants = constant_table(config.num_constants)?;
        let world = Self::assemble(
            constants,
            Vec::new(),
            Scalars {
                spacetime: DVec4::ZERO,
                matter: 1.0,
                energy: 1.0,
                created_at,
                lifespan_days: config.lifespan_days,
                entropy_level: config.entropy_level,
                max_entropy: config.max_entropy,
            },
        );
        tracing::debug!(
            world = %world.id,
            constants = world.constants.len(),
            entropy = world.scalars.entropy_level,
            lifespan_days = world.scalars.lifespan_days,
            "world created"
        );
        Ok(world)
    }

    /// Single construction point for every world instance, including copies.
    pub(crate) fn assemble(
        constants: Vec<f64>,
        lineage: Vec<TransitionKind>,
        scalars: Scalars,
    ) -> Self {
        census::record_created();
        Self {
            id: WorldId::new(),
            constants,
            scalars,
            entities: EntityRegistry::new(),
            lineage,
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn constants(&self) -> &[f64] {
        &self.constants
    }

    pub fn num_constants(&self) -> usize {
        self.constants.len()
    }

    pub fn entropy_level(&self) -> f64 {
        self.scalars.entropy_level
    }

    pub fn max_entropy(&self) -> f64 {
        self.scalars.max_entropy
    }

    /// `entropy_level / max_entropy`, in `0..=1` for every constructed world.
    pub fn entropy_ratio(&self) -> f64 {
        self.scalars.entropy_level / self.scalars.max_entropy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.scalars.created_at
    }

    pub fn lifespan_days(&self) -> u64 {
        self.scalars.lifespan_days
    }

    pub fn spacetime(&self) -> DVec4 {
        self.scalars.spacetime
    }

    pub fn matter(&self) -> f64 {
        self.scalars.matter
    }

    pub fn energy(&self) -> f64 {
        self.scalars.energy
    }

    /// Transitions applied since the genesis ancestor, oldest first.
    pub fn lineage(&self) -> &[TransitionKind] {
        &self.lineage
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Append a named entity. On error the world is unchanged.
    pub fn add_entity(&mut self, name: &str) -> Result<EntityId> {
        let id = self.entities.append(name)?;
        tracing::debug!(world = %self.id, entity = %id, name, "entity added");
        Ok(id)
    }
}

impl Drop for World {
    fn drop(&mut self) {
        census::record_released();
        tracing::trace!(world = %self.id, "world released");
    }
}
