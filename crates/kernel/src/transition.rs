//! Transition engine: every operation here derives a brand new `World`.
//!
//! # Invariants
//! - The source world is only read. Constants and lineage are copied element by
//!   element into fresh allocations; nothing is shared.
//! - Derived worlds start with an empty entity registry. Entities are not
//!   carried across transitions.
//! - On allocation failure no partially built world escapes; whatever was
//!   allocated is dropped before the error is returned.

use cosmos_common::{CosmosError, MAX_PETITION_LENGTH, Result};
use serde::Serialize;

use crate::registry::Entity;
use crate::world::World;

/// Entropy multiplier applied by every intervention.
pub const INTERVENTION_FACTOR: f64 = 0.9;

/// Extra entropy multiplier for petitions asking for guidance.
pub const GUIDANCE_FACTOR: f64 = 0.99;

/// Substring that marks a petition as a request for guidance.
pub const GUIDANCE_PHRASE: &str = "guide me";

/// Days added to the lifespan by an answered petition.
pub const PETITION_LIFESPAN_BONUS: u64 = 1;

/// The kind of a transition, recorded in a derived world's lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransitionKind {
    /// Entropy reduced by [`INTERVENTION_FACTOR`].
    Intervene,
    /// Intervention plus lifespan extension, optionally further entropy reduction.
    Petition,
    /// Intervention followed by entropy saturation.
    Complete,
}

/// A named adjustment that can be applied to a world.
#[derive(Debug, Clone, Copy)]
pub enum Transition<'a> {
    Intervene,
    Petition {
        petitioner: &'a Entity,
        message: &'a str,
    },
    Complete,
}

impl Transition<'_> {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Intervene => TransitionKind::Intervene,
            Self::Petition { .. } => TransitionKind::Petition,
            Self::Complete => TransitionKind::Complete,
        }
    }
}

impl World {
    /// An independent copy with identical fields and lineage and an empty registry.
    pub fn duplicate(&self) -> Result<World> {
        let lineage = copy_slice("lineage", &self.lineage, 0)?;
        self.derive(lineage)
    }

    /// Miracle: copy the world and reduce its entropy by 10%.
    pub fn intervene(&self) -> Result<World> {
        let world = self.intervened(TransitionKind::Intervene)?;
        tracing::debug!(
            source = %self.id,
            world = %world.id,
            entropy = world.scalars.entropy_level,
            "intervention applied"
        );
        Ok(world)
    }

    /// Answer a petition from `petitioner`.
    ///
    /// The result is an intervention whose lifespan grows by one day. Petitions
    /// containing [`GUIDANCE_PHRASE`] also scale entropy by [`GUIDANCE_FACTOR`].
    pub fn respond_to_petition(&self, petitioner: &Entity, message: &str) -> Result<World> {
        if message.is_empty() {
            return Err(CosmosError::invalid("petition message is empty"));
        }
        if message.len() >= MAX_PETITION_LENGTH {
            return Err(CosmosError::invalid(format!(
                "petition message is {} bytes, limit is {}",
                message.len(),
                MAX_PETITION_LENGTH - 1
            )));
        }

        let mut world = self.intervened(TransitionKind::Petition)?;
        world.scalars.lifespan_days = world
            .scalars
            .lifespan_days
            .saturating_add(PETITION_LIFESPAN_BONUS);
        let guidance = message.contains(GUIDANCE_PHRASE);
        if guidance {
            world.scalars.entropy_level *= GUIDANCE_FACTOR;
        }

        tracing::debug!(
            source = %self.id,
            world = %world.id,
            petitioner = %petitioner.id(),
            name = petitioner.name(),
            guidance,
            lifespan_days = world.scalars.lifespan_days,
            "petition answered"
        );
        Ok(world)
    }

    /// Teleological completion: an intervention whose entropy then saturates.
    pub fn complete(&self) -> Result<World> {
        let mut world = self.intervened(TransitionKind::Complete)?;
        world.scalars.entropy_level = world.scalars.max_entropy;
        tracing::debug!(source = %self.id, world = %world.id, "world completed");
        Ok(world)
    }

    /// Apply a named transition.
    pub fn apply(&self, transition: &Transition<'_>) -> Result<World> {
        match *transition {
            Transition::Intervene => self.intervene(),
            Transition::Petition {
                petitioner,
                message,
            } => self.respond_to_petition(petitioner, message),
            Transition::Complete => self.complete(),
        }
    }

    fn intervened(&self, kind: TransitionKind) -> Result<World> {
        let mut lineage = copy_slice("lineage", &self.lineage, 1)?;
        lineage.push(kind);
        let mut world = self.derive(lineage)?;
        world.scalars.entropy_level *= INTERVENTION_FACTOR;
        Ok(world)
    }

    fn derive(&self, lineage: Vec<TransitionKind>) -> Result<World> {
        let constants = copy_slice("constants", &self.constants, 0)?;
        Ok(World::assemble(constants, lineage, self.scalars))
    }
}

/// Copy `src` into a fresh vector with room for `extra` more elements.
fn copy_slice<T: Copy>(what: &str, src: &[T], extra: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(src.len() + extra)
        .map_err(|e| CosmosError::allocation(what, e))?;
    out.extend_from_slice(src);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census;
    use crate::world::GenesisConfig;
    use cosmos_common::EntityId;

    const EPS: f64 = 1e-12;

    fn populated() -> World {
        let mut w = World::genesis(&GenesisConfig::default()).unwrap();
        w.add_entity("Human1").unwrap();
        w.add_entity("Human2").unwrap();
        w
    }

    #[test]
    fn intervene_reduces_entropy_and_leaves_source() {
        let w = populated();
        let derived = w.intervene().unwrap();
        assert!((derived.entropy_level() - 0.618 * 0.9).abs() < EPS);
        assert_eq!(derived.entity_count(), 0);
        assert_eq!(derived.lifespan_days(), w.lifespan_days());
        assert_eq!(derived.created_at(), w.created_at());
        assert_eq!(derived.constants(), w.constants());
        assert_ne!(derived.id(), w.id());

        assert_eq!(w.entropy_level(), 0.618);
        assert_eq!(w.entity_count(), 2);
        assert!(w.lineage().is_empty());
    }

    #[test]
    fn derived_constants_do_not_alias_source() {
        let w = populated();
        let derived = w.intervene().unwrap();
        assert_ne!(w.constants().as_ptr(), derived.constants().as_ptr());
    }

    #[test]
    fn complete_saturates_entropy() {
        let w = populated();
        let done = w.complete().unwrap();
        assert_eq!(done.entropy_level(), done.max_entropy());
        assert_eq!(done.lineage(), &[TransitionKind::Complete]);
        assert_eq!(w.entropy_level(), 0.618);
    }

    #[test]
    fn petition_for_guidance() {
        let w = populated();
        let petitioner = w.entity(EntityId(1)).unwrap();
        let answered = w
            .respond_to_petition(petitioner, "please guide me")
            .unwrap();
        assert_eq!(answered.lifespan_days(), w.lifespan_days() + 1);
        assert!((answered.entropy_level() - 0.618 * 0.9 * 0.99).abs() < EPS);
        assert_eq!(answered.lineage(), &[TransitionKind::Petition]);
    }

    #[test]
    fn petition_without_guidance() {
        let w = populated();
        let petitioner = w.entity(EntityId(2)).unwrap();
        let answered = w.respond_to_petition(petitioner, "thank you").unwrap();
        assert_eq!(answered.lifespan_days(), w.lifespan_days() + 1);
        assert!((answered.entropy_level() - 0.618 * 0.9).abs() < EPS);
    }

    #[test]
    fn petition_phrase_is_case_sensitive() {
        let w = populated();
        let petitioner = w.entity(EntityId(1)).unwrap();
        let answered = w.respond_to_petition(petitioner, "GUIDE ME").unwrap();
        assert!((answered.entropy_level() - 0.618 * 0.9).abs() < EPS);
    }

    #[test]
    fn petition_rejects_empty_and_oversized_messages() {
        let w = populated();
        let petitioner = w.entity(EntityId(1)).unwrap();
        let before = census::created();
        assert!(matches!(
            w.respond_to_petition(petitioner, ""),
            Err(CosmosError::InvalidArgument(_))
        ));
        let huge = "a".repeat(MAX_PETITION_LENGTH);
        assert!(matches!(
            w.respond_to_petition(petitioner, &huge),
            Err(CosmosError::InvalidArgument(_))
        ));
        assert_eq!(census::created(), before);
    }

    #[test]
    fn lifespan_extension_saturates() {
        let config = GenesisConfig {
            lifespan_days: u64::MAX,
            ..GenesisConfig::default()
        };
        let mut w = World::genesis(&config).unwrap();
        let id = w.add_entity("Human1").unwrap();
        let answered = w
            .respond_to_petition(w.entity(id).unwrap(), "guide me")
            .unwrap();
        assert_eq!(answered.lifespan_days(), u64::MAX);
    }

    /// Entities are never carried into a derived world.
    #[test]
    fn every_transition_empties_registry() {
        let w = populated();
        let petitioner = w.entity(EntityId(1)).unwrap();
        let transitions = [
            Transition::Intervene,
            Transition::Petition {
                petitioner,
                message: "please guide me",
            },
            Transition::Complete,
        ];
        for t in &transitions {
            let derived = w.apply(t).unwrap();
            assert_eq!(derived.entity_count(), 0, "{:?}", t.kind());
            assert_eq!(derived.lineage(), &[t.kind()]);
        }
        assert_eq!(w.duplicate().unwrap().entity_count(), 0);
        assert_eq!(w.entity_count(), 2);
    }

    #[test]
    fn duplicate_copies_fields_verbatim() {
        let w = populated();
        let once = w.intervene().unwrap();
        let copy = once.duplicate().unwrap();
        assert_eq!(copy.entropy_level(), once.entropy_level());
        assert_eq!(copy.lineage(), once.lineage());
        assert_eq!(copy.spacetime(), once.spacetime());
        assert_eq!(copy.matter(), once.matter());
        assert_eq!(copy.energy(), once.energy());
        assert_ne!(copy.id(), once.id());
    }

    #[test]
    fn lineage_accumulates_across_generations() {
        let w = populated();
        let a = w.intervene().unwrap();
        let b = a.complete().unwrap();
        assert_eq!(
            b.lineage(),
            &[TransitionKind::Intervene, TransitionKind::Complete]
        );
        assert_eq!(a.lineage(), &[TransitionKind::Intervene]);
    }

    #[test]
    fn derived_world_accepts_fresh_entities() {
        let w = populated();
        let mut derived = w.intervene().unwrap();
        assert_eq!(derived.add_entity("Newcomer").unwrap(), EntityId(1));
        assert_eq!(w.entity_count(), 2);
    }

    #[test]
    fn every_world_is_released_exactly_once() {
        let base_created = census::created();
        let base_released = census::released();
        {
            let w = populated();
            let petitioner = w.entity(EntityId(1)).unwrap();
            let answered = w.respond_to_petition(petitioner, "guide me").unwrap();
            let done = w.complete().unwrap();
            let again = answered.intervene().unwrap();
            assert_eq!(census::created() - base_created, 4);
            assert_eq!(census::released(), base_released);
            drop((done, again));
            assert_eq!(census::released() - base_released, 2);
        }
        assert_eq!(census::created() - base_created, 4);
        assert_eq!(census::released() - base_released, 4);
    }
}
