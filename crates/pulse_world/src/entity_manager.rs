//! Live-entity registry and ID allocation.
//!
//! The [`EntityManager`] owns every entity instance and is the single
//! source of truth for ID→entity lookups. The ID counter is explicit
//! per-manager state, so independent worlds do not share an ID space.

use std::collections::HashMap;

use pulse_component::{Entity, EntityId};

/// Allocates entity IDs and tracks the live set.
///
/// IDs are monotonically increasing, start at 1 (0 is
/// [`EntityId::INVALID`]), and are never reused. An entity is resolvable
/// from the moment it is created; the world drops it from the registry
/// when its removal is flushed.
#[derive(Debug, Default)]
pub struct EntityManager {
    next_id: u64,
    entities: HashMap<EntityId, Entity>,
}

impl EntityManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entities: HashMap::new(),
        }
    }

    /// Create a fresh entity, register it, and return its ID.
    ///
    /// The entity is immediately resolvable via [`EntityManager::get_entity`]
    /// but not yet visible to observers.
    pub fn create_entity_instance(&mut self) -> EntityId {
        self.next_id += 1;
        let id = EntityId::from_raw(self.next_id);
        self.entities.insert(id, Entity::new(id));
        id
    }

    /// Resolve an entity by ID, or `None` if it was never created or has
    /// been destroyed.
    #[must_use]
    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Resolve an entity mutably by ID.
    #[must_use]
    pub fn get_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns `true` if the ID resolves to a live entity.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Drop an entity from the registry, returning it if it was live.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all live entities (no particular order).
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let mut manager = EntityManager::new();
        assert_eq!(manager.create_entity_instance(), EntityId::from_raw(1));
        assert_eq!(manager.create_entity_instance(), EntityId::from_raw(2));
        assert_eq!(manager.create_entity_instance(), EntityId::from_raw(3));
    }

    #[test]
    fn test_created_entity_is_resolvable() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity_instance();
        assert!(manager.contains(id));
        assert_eq!(manager.get_entity(id).map(Entity::id), Some(id));
    }

    #[test]
    fn test_remove_makes_id_unresolvable() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity_instance();
        assert!(manager.remove(id).is_some());
        assert!(manager.get_entity(id).is_none());
        // IDs are never reused.
        assert_ne!(manager.create_entity_instance(), id);
    }

    #[test]
    fn test_independent_managers_have_independent_id_spaces() {
        let mut a = EntityManager::new();
        let mut b = EntityManager::new();
        assert_eq!(a.create_entity_instance(), EntityId::from_raw(1));
        assert_eq!(b.create_entity_instance(), EntityId::from_raw(1));
    }

    #[test]
    fn test_entity_count() {
        let mut manager = EntityManager::new();
        assert_eq!(manager.entity_count(), 0);
        let id = manager.create_entity_instance();
        manager.create_entity_instance();
        assert_eq!(manager.entity_count(), 2);
        manager.remove(id);
        assert_eq!(manager.entity_count(), 1);
    }
}
