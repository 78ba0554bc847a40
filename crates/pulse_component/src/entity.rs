//! Entity identity and component storage.
//!
//! An [`Entity`] is an identity (a process-unique [`EntityId`] plus a
//! globally unique [`Uuid`]) and an ordered, type-keyed bag of components.
//! Entities have no behavior of their own.
//!
//! The record here is pure data: mutating it does **not** notify anyone.
//! Change notification is the world's responsibility, so callers that want
//! observers to re-evaluate an entity go through the world's mutation
//! methods instead of reaching for [`Entity`] directly.

use uuid::Uuid;

use crate::component::{Component, ComponentTypeId};

/// A unique entity identifier.
///
/// IDs are allocated monotonically per world and are never reused. For a
/// reference that stays valid across sessions, use [`Entity::uuid`]
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The null / invalid entity sentinel.
    pub const INVALID: EntityId = EntityId(0);

    /// Create an entity ID from a raw `u64`.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) entity ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// An identity plus a bag of typed components.
///
/// Invariant: an entity never holds two components of the same type
/// concurrently — [`Entity::add_component`] replaces the prior instance.
/// Insertion order is preserved for enumeration but carries no semantic
/// meaning. Lookup is a linear scan, which is the intended storage model
/// for this core.
pub struct Entity {
    id: EntityId,
    uuid: Uuid,
    disabled: bool,
    components: Vec<(ComponentTypeId, Box<dyn Component>)>,
}

impl Entity {
    /// Create an entity with the given ID, a fresh random [`Uuid`], no
    /// components, and the enabled flag set.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            uuid: Uuid::new_v4(),
            disabled: false,
            components: Vec::new(),
        }
    }

    /// Returns the entity's ID.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's globally unique secondary identifier, safe for
    /// cross-session reference independent of the integer ID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Attach a component, replacing any prior component of the same type.
    ///
    /// Returns `&mut Self` so attachments can be chained. Does not notify
    /// observers.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut Self {
        let kind = ComponentTypeId::of::<C>();
        match self.components.iter().position(|(k, _)| *k == kind) {
            Some(pos) => self.components[pos].1 = Box::new(component),
            None => self.components.push((kind, Box::new(component))),
        }
        self
    }

    /// Detach the component of type `C` without notifying anyone.
    ///
    /// Returns `true` if a component was removed, `false` if none of that
    /// type was attached. The world's `remove_component` is the tracked
    /// path that also marks the entity changed.
    pub fn remove_component_untracked<C: Component>(&mut self) -> bool {
        self.remove_component_by_id_untracked(ComponentTypeId::of::<C>())
    }

    /// Detach the component with the given type token without notifying
    /// anyone. Returns `true` if a component was removed.
    pub fn remove_component_by_id_untracked(&mut self, kind: ComponentTypeId) -> bool {
        match self.components.iter().position(|(k, _)| *k == kind) {
            Some(pos) => {
                self.components.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns the component of type `C`, or `None` if absent.
    ///
    /// Callers must not assume presence.
    #[must_use]
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        let kind = ComponentTypeId::of::<C>();
        self.components
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, c)| c.as_ref().as_any().downcast_ref::<C>())
    }

    /// Returns the component of type `C` mutably, or `None` if absent.
    #[must_use]
    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        let kind = ComponentTypeId::of::<C>();
        self.components
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, c)| c.as_mut().as_any_mut().downcast_mut::<C>())
    }

    /// Returns `true` if a component with the given type token is attached.
    #[must_use]
    pub fn has_component(&self, kind: ComponentTypeId) -> bool {
        self.components.iter().any(|(k, _)| *k == kind)
    }

    /// Returns `true` only if the list is non-empty and every listed type
    /// is attached. An empty list yields `false`, guarding against
    /// vacuous-truth misuse.
    #[must_use]
    pub fn has_components(&self, kinds: &[ComponentTypeId]) -> bool {
        !kinds.is_empty() && kinds.iter().all(|k| self.has_component(*k))
    }

    /// Number of distinct component types attached.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Iterate over attached components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentTypeId, &dyn Component)> {
        self.components.iter().map(|(k, c)| (*k, c.as_ref()))
    }

    /// Returns `true` if the entity is visible to systems that filter on
    /// the enabled flag. Entities start enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Returns the inverse of [`Entity::is_enabled`].
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Set the enabled flag without notifying anyone. The world's
    /// enable/disable methods are the tracked path that also marks the
    /// entity changed.
    pub fn set_enabled_untracked(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("uuid", &self.uuid)
            .field("disabled", &self.disabled)
            .field("components", &self.components.len())
            .finish()
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "entity[id:{}, components:{}] {{{}}}",
            self.id.raw(),
            self.components.len(),
            self.uuid
        )
    }
}
