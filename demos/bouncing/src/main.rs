//! # bouncing — pulse ECS wiring demo
//!
//! Spawns a handful of particles, runs a fixed-timestep loop, and lets
//! the observer protocol do its job: a [`ParticleManager`] keeps a live
//! count, a [`MovementSystem`] tracks eligible entities through
//! added/changed/removed callbacks and integrates their positions each
//! tick. Partway through, one particle is disabled (it keeps its
//! components but stops moving) and another is destroyed.

use anyhow::Result;
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulse_component::{Component, ComponentTypeId, EntityId};
use pulse_world::{EntityObserver, Manager, System, World};

/// World-space position of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    value: Vec2,
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    linear: Vec2,
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Bookkeeping manager: counts live particles and logs lifecycle events.
#[derive(Debug, Default)]
struct ParticleManager {
    live: usize,
}

impl EntityObserver for ParticleManager {
    fn added(&mut self, world: &mut World, entity: EntityId) {
        self.live += 1;
        if let Some(e) = world.entity(entity) {
            info!(%entity, uuid = %e.uuid(), "particle entered the world");
        }
    }

    fn removed(&mut self, _world: &mut World, entity: EntityId) {
        self.live -= 1;
        info!(%entity, "particle left the world");
    }
}

impl Manager for ParticleManager {}

/// Integrates positions for enabled entities carrying Position + Velocity,
/// bouncing them off the demo's rectangular bounds.
struct MovementSystem {
    bounds: Vec2,
    tracked: Vec<EntityId>,
}

impl MovementSystem {
    fn new(bounds: Vec2) -> Self {
        Self {
            bounds,
            tracked: Vec::new(),
        }
    }

    /// Re-evaluate whether the entity belongs in the tracked set.
    fn refresh(&mut self, world: &mut World, entity: EntityId) {
        let required = [
            ComponentTypeId::of::<Position>(),
            ComponentTypeId::of::<Velocity>(),
        ];
        let eligible = world
            .entity(entity)
            .is_some_and(|e| e.is_enabled() && e.has_components(&required));
        let known = self.tracked.contains(&entity);
        if eligible && !known {
            self.tracked.push(entity);
        } else if !eligible && known {
            self.tracked.retain(|id| *id != entity);
        }
    }
}

impl EntityObserver for MovementSystem {
    fn added(&mut self, world: &mut World, entity: EntityId) {
        self.refresh(world, entity);
    }

    fn changed(&mut self, world: &mut World, entity: EntityId) {
        self.refresh(world, entity);
    }

    fn removed(&mut self, _world: &mut World, entity: EntityId) {
        self.tracked.retain(|id| *id != entity);
    }
}

impl System for MovementSystem {
    fn process(&mut self, world: &mut World) {
        let dt = world.delta();
        for &id in &self.tracked {
            let Some(entity) = world.entity_mut(id) else {
                continue;
            };
            let Some(vel) = entity.get_component::<Velocity>().copied() else {
                continue;
            };
            let Some(pos) = entity.get_component_mut::<Position>() else {
                continue;
            };
            pos.value += vel.linear * dt;
            let p = pos.value;

            let mut linear = vel.linear;
            if p.x <= 0.0 || p.x >= self.bounds.x {
                linear.x = -linear.x;
            }
            if p.y <= 0.0 || p.y >= self.bounds.y {
                linear.y = -linear.y;
            }
            if linear != vel.linear {
                entity.add_component(Velocity { linear });
            }
        }
    }
}

fn spawn_particle(world: &mut World, position: Vec2, velocity: Vec2) -> EntityId {
    let id = world.create_entity();
    world.add_component(id, Position { value: position });
    world.add_component(id, Velocity { linear: velocity });
    world.add_entity(id);
    id
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bouncing=info".parse()?))
        .init();

    let mut world = World::new();
    world.set_manager(ParticleManager::default())?;
    world.set_system(MovementSystem::new(Vec2::new(64.0, 48.0)))?;

    let _slow = spawn_particle(&mut world, Vec2::new(8.0, 8.0), Vec2::new(3.0, 2.0));
    let fast = spawn_particle(&mut world, Vec2::new(32.0, 24.0), Vec2::new(-20.0, 14.0));
    let drifter = spawn_particle(&mut world, Vec2::new(50.0, 10.0), Vec2::new(1.0, 1.0));

    const DT: f32 = 1.0 / 60.0;
    for tick in 0..240u32 {
        world.set_delta(DT);
        world.process();

        if tick == 80 {
            info!(entity = %drifter, "disabling drifter");
            world.disable_entity(drifter);
        }
        if tick == 160 {
            info!(entity = %fast, "destroying fast particle");
            world.remove_entity(fast);
        }
    }

    let survivors = world.get_manager::<ParticleManager>()?.live;
    info!(survivors, "simulation finished");
    for entity in world.entity_manager().iter() {
        if let Some(pos) = entity.get_component::<Position>() {
            info!(%entity, x = pos.value.x, y = pos.value.y, "final position");
        }
    }

    Ok(())
}
