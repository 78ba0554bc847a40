//! The [`World`]: central registry and per-tick dispatch loop.
//!
//! The world owns the live-entity table, the three pending-change buckets
//! (added, changed, removed), the ordered manager and system lists, and
//! the current tick's delta time.
//!
//! Mutations never take effect mid-flush: every mutation records the
//! entity into a bucket, and [`World::process`] flushes the buckets once
//! per tick by notifying every manager, then every system, in
//! registration order, before running each system's per-tick logic.

use std::any::{TypeId, type_name};
use std::collections::BTreeSet;
use std::mem;

use tracing::debug;

use pulse_component::{Component, Entity, EntityId};

use crate::entity_manager::EntityManager;
use crate::error::WorldError;
use crate::observer::{EntityObserver, Manager, System};

/// The central ECS registry.
///
/// A world is driven by exactly one logical thread: all mutation happens
/// either before the simulation loop starts or from within an observer
/// callback or [`System::process`], and is deferred through the pending
/// buckets until the next flush.
pub struct World {
    entities: EntityManager,
    added: BTreeSet<EntityId>,
    changed: BTreeSet<EntityId>,
    removed: BTreeSet<EntityId>,
    managers: Vec<ManagerSlot>,
    systems: Vec<SystemSlot>,
    delta: f32,
}

/// A registered manager and the concrete type it was registered as.
///
/// The box sits in an `Option` so dispatch can detach one observer at a
/// time while its callbacks borrow the world. The type id stays in the
/// slot, so duplicate detection and lookups of every *other* registered
/// type keep working mid-flush; only the observer currently being
/// dispatched cannot resolve itself.
struct ManagerSlot {
    type_id: TypeId,
    manager: Option<Box<dyn Manager>>,
}

/// A registered system and the concrete type it was registered as.
/// See [`ManagerSlot`] for the detach protocol.
struct SystemSlot {
    type_id: TypeId,
    system: Option<Box<dyn System>>,
}

impl World {
    /// Create an empty world with no observers and a zero delta.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: EntityManager::new(),
            added: BTreeSet::new(),
            changed: BTreeSet::new(),
            removed: BTreeSet::new(),
            managers: Vec::new(),
            systems: Vec::new(),
            delta: 0.0,
        }
    }

    // -- Entity lifecycle --

    /// Create a fresh entity.
    ///
    /// The entity is resolvable by ID right away (so components can be
    /// attached) but stays invisible to observers until
    /// [`World::add_entity`] schedules it and the next flush announces it.
    pub fn create_entity(&mut self) -> EntityId {
        self.entities.create_entity_instance()
    }

    /// Resolve an entity by ID.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get_entity(id)
    }

    /// Resolve an entity mutably by ID.
    ///
    /// Mutating through the returned reference does not notify observers;
    /// pair direct mutation with [`World::changed_entity`].
    #[must_use]
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_entity_mut(id)
    }

    /// The live-entity registry.
    #[must_use]
    pub fn entity_manager(&self) -> &EntityManager {
        &self.entities
    }

    /// Schedule the entity for an `added` notification on the next flush.
    ///
    /// Idempotent per tick. No-op for IDs the registry does not know.
    pub fn add_entity(&mut self, id: EntityId) {
        if self.entities.contains(id) {
            self.added.insert(id);
        }
    }

    /// Schedule the entity for a `changed` notification on the next flush.
    ///
    /// Idempotent per tick: multiple mutations to the same entity within
    /// one tick coalesce into a single notification. No-op for unknown
    /// IDs.
    pub fn changed_entity(&mut self, id: EntityId) {
        if self.entities.contains(id) {
            self.changed.insert(id);
        }
    }

    /// Schedule the entity for destruction.
    ///
    /// No-op unless the entity is currently live (already-destroyed
    /// entities are not re-enqueued). If the entity was still pending in
    /// the `added` bucket it is dropped immediately with no
    /// notifications: no observer ever saw it, so none hears of its
    /// removal, and an ID never sits in both `added` and `removed` at
    /// flush time.
    pub fn remove_entity(&mut self, id: EntityId) {
        if !self.entities.contains(id) {
            return;
        }
        if self.added.remove(&id) {
            self.changed.remove(&id);
            self.entities.remove(id);
            return;
        }
        self.removed.insert(id);
    }

    // -- Component mutation --

    /// Attach a component to the entity, replacing any prior component of
    /// the same type.
    ///
    /// Does **not** notify observers — whether and when dependent systems
    /// re-evaluate is the caller's call, via [`World::changed_entity`].
    /// Returns `false` (no-op) if the entity is not live.
    pub fn add_component<C: Component>(&mut self, id: EntityId, component: C) -> bool {
        match self.entities.get_entity_mut(id) {
            Some(entity) => {
                entity.add_component(component);
                true
            }
            None => false,
        }
    }

    /// Detach the component of type `C` from the entity and schedule a
    /// `changed` notification so dependent systems re-evaluate
    /// eligibility.
    ///
    /// The notification fires for a live entity even when no component of
    /// that type was attached. Returns whether a component was removed.
    pub fn remove_component<C: Component>(&mut self, id: EntityId) -> bool {
        match self.entities.get_entity_mut(id) {
            Some(entity) => {
                let removed = entity.remove_component_untracked::<C>();
                self.changed.insert(id);
                removed
            }
            None => false,
        }
    }

    /// Enable the entity and schedule a `changed` notification, even if
    /// it was already enabled. Returns `false` for unknown IDs.
    pub fn enable_entity(&mut self, id: EntityId) -> bool {
        self.set_entity_enabled(id, true)
    }

    /// Disable the entity and schedule a `changed` notification, even if
    /// it was already disabled. Returns `false` for unknown IDs.
    pub fn disable_entity(&mut self, id: EntityId) -> bool {
        self.set_entity_enabled(id, false)
    }

    fn set_entity_enabled(&mut self, id: EntityId, enabled: bool) -> bool {
        match self.entities.get_entity_mut(id) {
            Some(entity) => {
                entity.set_enabled_untracked(enabled);
                self.changed.insert(id);
                true
            }
            None => false,
        }
    }

    // -- Manager / system registration --

    /// Register a manager. Managers are notified of entity changes before
    /// any system, in registration order.
    ///
    /// Registering a second manager of the same concrete type is a wiring
    /// bug and fails with [`WorldError::DuplicateManager`].
    pub fn set_manager<M: Manager + 'static>(&mut self, manager: M) -> Result<(), WorldError> {
        if self
            .managers
            .iter()
            .any(|slot| slot.type_id == TypeId::of::<M>())
        {
            return Err(WorldError::DuplicateManager(type_name::<M>()));
        }
        debug!(manager = type_name::<M>(), "registered manager");
        self.managers.push(ManagerSlot {
            type_id: TypeId::of::<M>(),
            manager: Some(Box::new(manager)),
        });
        Ok(())
    }

    /// Look up a manager by concrete type (linear scan).
    ///
    /// Failing here is fatal to the caller: it means the manager was
    /// never wired at startup.
    pub fn get_manager<M: Manager + 'static>(&self) -> Result<&M, WorldError> {
        self.managers
            .iter()
            .find(|slot| slot.type_id == TypeId::of::<M>())
            .and_then(|slot| slot.manager.as_ref())
            .and_then(|m| m.as_ref().as_any().downcast_ref::<M>())
            .ok_or(WorldError::ManagerNotFound(type_name::<M>()))
    }

    /// Look up a manager mutably by concrete type.
    pub fn get_manager_mut<M: Manager + 'static>(&mut self) -> Result<&mut M, WorldError> {
        self.managers
            .iter_mut()
            .find(|slot| slot.type_id == TypeId::of::<M>())
            .and_then(|slot| slot.manager.as_mut())
            .and_then(|m| m.as_mut().as_any_mut().downcast_mut::<M>())
            .ok_or(WorldError::ManagerNotFound(type_name::<M>()))
    }

    /// Register a system. Systems are notified after all managers and run
    /// their per-tick logic in registration order.
    ///
    /// Registering a second system of the same concrete type fails with
    /// [`WorldError::DuplicateSystem`].
    pub fn set_system<S: System + 'static>(&mut self, system: S) -> Result<(), WorldError> {
        if self
            .systems
            .iter()
            .any(|slot| slot.type_id == TypeId::of::<S>())
        {
            return Err(WorldError::DuplicateSystem(type_name::<S>()));
        }
        debug!(system = type_name::<S>(), "registered system");
        self.systems.push(SystemSlot {
            type_id: TypeId::of::<S>(),
            system: Some(Box::new(system)),
        });
        Ok(())
    }

    /// Look up a system by concrete type (linear scan).
    pub fn get_system<S: System + 'static>(&self) -> Result<&S, WorldError> {
        self.systems
            .iter()
            .find(|slot| slot.type_id == TypeId::of::<S>())
            .and_then(|slot| slot.system.as_ref())
            .and_then(|s| s.as_ref().as_any().downcast_ref::<S>())
            .ok_or(WorldError::SystemNotFound(type_name::<S>()))
    }

    /// Look up a system mutably by concrete type.
    pub fn get_system_mut<S: System + 'static>(&mut self) -> Result<&mut S, WorldError> {
        self.systems
            .iter_mut()
            .find(|slot| slot.type_id == TypeId::of::<S>())
            .and_then(|slot| slot.system.as_mut())
            .and_then(|s| s.as_mut().as_any_mut().downcast_mut::<S>())
            .ok_or(WorldError::SystemNotFound(type_name::<S>()))
    }

    /// Number of registered managers.
    #[must_use]
    pub fn manager_count(&self) -> usize {
        self.managers.len()
    }

    /// Number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // -- Delta time --

    /// Set the per-tick delta time, in seconds. Called externally once
    /// per tick, before [`World::process`].
    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta;
    }

    /// The current per-tick delta time, in seconds.
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    // -- Per-tick flush --

    /// Flush the pending buckets and run every system's per-tick logic.
    ///
    /// 1. Snapshot and clear the three buckets. Mutations made during the
    ///    flush land in the fresh buckets and are delivered next tick.
    /// 2. Notify every manager, in registration order: `added` for each
    ///    entity in the added snapshot, then `removed`, then `changed`.
    /// 3. Notify every system the same way, using the same snapshot.
    /// 4. Drop removed entities from the live registry. Observers could
    ///    still resolve them in their `removed` callbacks; per-tick logic
    ///    cannot.
    /// 5. Invoke [`System::process`] on every system, in registration
    ///    order.
    ///
    /// A flush with empty buckets performs no callbacks but still runs
    /// step 5.
    pub fn process(&mut self) {
        let added: Vec<EntityId> = mem::take(&mut self.added).into_iter().collect();
        let removed: Vec<EntityId> = mem::take(&mut self.removed).into_iter().collect();
        let changed: Vec<EntityId> = mem::take(&mut self.changed).into_iter().collect();

        debug!(
            added = added.len(),
            removed = removed.len(),
            changed = changed.len(),
            delta = self.delta,
            "processing tick"
        );

        // Each observer is detached from its slot only while its own
        // callbacks run, so the callbacks can borrow the world mutably and
        // still resolve every other registered manager and system.
        // Observers registered during the flush get indices past the loop
        // bound and are dispatched from the next flush on.
        for i in 0..self.managers.len() {
            let Some(mut manager) = self.managers[i].manager.take() else {
                continue;
            };
            notify(manager.as_mut(), self, &added, &removed, &changed);
            self.managers[i].manager = Some(manager);
        }

        for i in 0..self.systems.len() {
            let Some(mut system) = self.systems[i].system.take() else {
                continue;
            };
            notify(system.as_mut(), self, &added, &removed, &changed);
            self.systems[i].system = Some(system);
        }

        for &id in &removed {
            self.entities.remove(id);
            // Scrub freshly enqueued references to the dead entity.
            self.added.remove(&id);
            self.changed.remove(&id);
            self.removed.remove(&id);
        }

        for i in 0..self.systems.len() {
            let Some(mut system) = self.systems[i].system.take() else {
                continue;
            };
            system.process(self);
            self.systems[i].system = Some(system);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Deliver one bucket snapshot to one observer: `added`, then `removed`,
/// then `changed`, each entity exactly once.
fn notify<O: EntityObserver + ?Sized>(
    observer: &mut O,
    world: &mut World,
    added: &[EntityId],
    removed: &[EntityId],
    changed: &[EntityId],
) {
    for &id in added {
        observer.added(world, id);
    }
    for &id in removed {
        observer.removed(world, id);
    }
    for &id in changed {
        observer.changed(world, id);
    }
}
