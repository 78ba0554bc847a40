//! The entity-change observer contract and the polymorphic slots the
//! world holds: [`Manager`] and [`System`].
//!
//! Managers and systems are user-supplied. The core only requires a
//! concrete-type identity usable as a lookup key (via [`AsAny`]),
//! conformance to [`EntityObserver`], and — for systems — a per-tick
//! [`System::process`] entry point.

use pulse_component::{AsAny, EntityId};

use crate::world::World;

/// Callbacks delivered when entities are added to, changed in, or removed
/// from the world.
///
/// Each callback is invoked at most once per entity per flush per bucket.
/// The world is passed in so observers can resolve entities and enqueue
/// further mutations; anything enqueued during a flush is delivered on the
/// **next** flush.
///
/// All methods default to no-ops so observers implement only what they
/// react to.
pub trait EntityObserver {
    /// The entity became visible to observers this flush.
    ///
    /// The entity may already carry every component it will ever carry
    /// this tick — no ordering between component attachment and world
    /// registration is enforced by the core.
    fn added(&mut self, world: &mut World, entity: EntityId) {
        let _ = (world, entity);
    }

    /// The entity was mutated (component added/removed, enabled/disabled)
    /// since the last flush. Observers should re-evaluate eligibility.
    fn changed(&mut self, world: &mut World, entity: EntityId) {
        let _ = (world, entity);
    }

    /// The entity was destroyed. It is still resolvable during this
    /// callback; after the flush completes its ID resolves to nothing.
    fn removed(&mut self, world: &mut World, entity: EntityId) {
        let _ = (world, entity);
    }
}

/// A bookkeeping slot: maintains derived indices over entities.
///
/// Within a flush, all managers observe all three change kinds before any
/// system observes any kind, so systems may assume manager-maintained
/// indices are already consistent.
pub trait Manager: EntityObserver + AsAny {}

/// A per-tick logic slot.
///
/// Systems receive the same lifecycle callbacks as managers (after all
/// managers have been notified) and additionally have
/// [`System::process`] invoked once per [`World::process`] call, after
/// every observer has been informed of the tick's structural changes.
pub trait System: EntityObserver + AsAny {
    /// Execute this system's per-tick logic. Read the tick's time step
    /// from [`World::delta`].
    fn process(&mut self, world: &mut World);
}
