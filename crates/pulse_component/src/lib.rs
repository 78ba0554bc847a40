//! # pulse_component
//!
//! The "E" and "C" in ECS — defines what a component is, how component
//! types are identified at runtime, and the entity record that carries
//! them.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract all ECS data must satisfy.
//! - [`ComponentTypeId`] — stable, name-derived component type token.
//! - [`AsAny`] — downcast seam shared by components and world plugins.
//! - [`EntityId`] — lightweight `u64` entity identifier.
//! - [`Entity`] — identity plus an ordered, type-keyed bag of components.

pub mod component;
pub mod entity;

pub use component::{AsAny, Component, ComponentTypeId};
pub use entity::{Entity, EntityId};
