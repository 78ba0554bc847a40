//! # pulse_world
//!
//! The core of the pulse ECS: the [`World`] registry, the live-entity
//! table, and the per-tick change-notification protocol.
//!
//! Callers mutate entities through the world; each mutation records the
//! entity into one of three pending buckets (added, changed, removed).
//! Once per tick, [`World::process`] flushes the buckets by notifying
//! every [`Manager`] and then every [`System`] in registration order,
//! clears them, and finally runs each system's per-tick logic.
//!
//! The core is single-threaded and tick-driven: exactly one logical
//! thread drives `World::process` end to end, and structural changes made
//! during a flush are deferred to the next one.

pub mod entity_manager;
pub mod error;
pub mod observer;
pub mod world;

pub use entity_manager::EntityManager;
pub use error::WorldError;
pub use observer::{EntityObserver, Manager, System};
pub use world::World;

pub use pulse_component::{Component, ComponentTypeId, Entity, EntityId};
