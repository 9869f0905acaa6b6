use cosmos_common::{CosmosError, EntityId, MAX_NAME_LENGTH, Result};
use serde::Serialize;

/// A named sub-record owned by exactly one world.
///
/// Consciousness and free will are fixed at 1.0 when the entity is created and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    id: EntityId,
    name: String,
    consciousness_level: f64,
    free_will_capacity: f64,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn consciousness_level(&self) -> f64 {
        self.consciousness_level
    }

    pub fn free_will_capacity(&self) -> f64 {
        self.free_will_capacity
    }
}

/// Append-only collection of entities with sequential ids.
///
/// An append either fully succeeds or leaves the registry exactly as it was.
#[derive(Debug, Default, PartialEq)]
pub struct EntityRegistry {
    entries: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `name`, then append a new entity with the next id.
    pub fn append(&mut self, name: &str) -> Result<EntityId> {
        validate_name(name)?;

        let next = u32::try_from(self.entries.len() + 1)
            .map_err(|_| CosmosError::invalid("entity registry is full"))?;
        let id = EntityId(next);

        let mut owned = String::new();
        owned
            .try_reserve_exact(name.len())
            .map_err(|e| CosmosError::allocation("entity name", e))?;
        owned.push_str(name);

        self.entries
            .try_reserve(1)
            .map_err(|e| CosmosError::allocation("entity registry", e))?;
        self.entries.push(Entity {
            id,
            name: owned,
            consciousness_level: 1.0,
            free_will_capacity: 1.0,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entity by id. Ids map directly onto append positions.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entries.iter()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CosmosError::invalid("entity name is empty"));
    }
    if name.len() >= MAX_NAME_LENGTH {
        return Err(CosmosError::invalid(format!(
            "entity name is {} bytes, limit is {}",
            name.len(),
            MAX_NAME_LENGTH - 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty() {
        let r = EntityRegistry::new();
        assert!(r.is_empty());
        assert!(r.get(EntityId(1)).is_none());
        assert!(r.get(EntityId(0)).is_none());
    }

    #[test]
    fn ids_follow_append_order() {
        let mut r = EntityRegistry::new();
        let ids: Vec<EntityId> = (0..5)
            .map(|i| r.append(&format!("Human{i}")).unwrap())
            .collect();
        assert_eq!(ids, (1..=5).map(EntityId).collect::<Vec<_>>());
        for (entity, id) in r.iter().zip(&ids) {
            assert_eq!(entity.id(), *id);
        }
        assert_eq!(r.get(EntityId(3)).unwrap().name(), "Human2");
    }

    #[test]
    fn new_entities_carry_default_scalars() {
        let mut r = EntityRegistry::new();
        let id = r.append("Human1").unwrap();
        let e = r.get(id).unwrap();
        assert_eq!(e.consciousness_level(), 1.0);
        assert_eq!(e.free_will_capacity(), 1.0);
    }

    #[test]
    fn overlong_name_leaves_registry_untouched() {
        let mut r = EntityRegistry::new();
        r.append("Human1").unwrap();
        let long = "x".repeat(300);
        assert!(matches!(
            r.append(&long),
            Err(CosmosError::InvalidArgument(_))
        ));
        assert_eq!(r.len(), 1);
        // the next successful append still gets the next id
        assert_eq!(r.append("Human2").unwrap(), EntityId(2));
    }

    #[test]
    fn name_length_boundary() {
        let mut r = EntityRegistry::new();
        assert!(r.append(&"a".repeat(MAX_NAME_LENGTH - 1)).is_ok());
        assert!(r.append(&"a".repeat(MAX_NAME_LENGTH)).is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut r = EntityRegistry::new();
        assert!(matches!(r.append(""), Err(CosmosError::InvalidArgument(_))));
        assert!(r.is_empty());
    }
}
