//! # DELVE Core
//!
//! Entity storage for the DELVE simulation:
//! - Generational entity handles that can never dangle
//! - Sparse/dense component stores with O(1) add, remove and lookup
//! - Contiguous dense arrays for cache-friendly system iteration
//!
//! ## Architecture Rules
//!
//! 1. **Handles, not references** - every access goes through a [`Handle`]
//!    that is re-validated against its generation
//! 2. **Dense iteration** - component values live in one contiguous array per type
//! 3. **Graceful staleness** - a stale handle reads as "absent", never as an error
//!
//! ## Example
//!
//! ```rust
//! use delve_core::{Ecs, Transform, Vec2};
//!
//! let mut ecs = Ecs::new();
//! let player = ecs.spawn();
//! ecs.transforms.add(player, Transform::at(Vec2::new(0.0, 200.0)));
//!
//! ecs.despawn(player);
//! assert!(ecs.transforms.get(player).is_none());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod ecs;
pub mod math;

pub use ecs::{
    Collider, Component, ComponentStore, Ecs, EntityRegistry, Follow, Handle, Light, Player,
    Transform, Velocity,
};
pub use math::{lerp, Vec2};
