//! # Entity Component System
//!
//! A small sparse-set ECS.
//!
//! ## Design Philosophy
//!
//! - Entities are `(index, generation)` handles issued by an [`EntityRegistry`]
//! - Each component type lives in its own [`ComponentStore`]
//! - Stores never trust a handle on its own: the owning handle is kept per dense row
//! - Systems iterate a store's dense rows and re-validate liveness with the registry

mod component;
mod entity;
mod storage;
mod world;

pub use component::{Collider, Component, Follow, Light, Player, Transform, Velocity};
pub use entity::{EntityRegistry, Handle};
pub use storage::ComponentStore;
pub use world::Ecs;
