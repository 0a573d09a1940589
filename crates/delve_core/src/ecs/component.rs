//! # Component Types
//!
//! Components are plain data with no behavior. Every component type has
//! exactly one [`ComponentStore`] inside [`Ecs`], reachable generically
//! through the [`Component`] trait.

use super::entity::Handle;
use super::storage::ComponentStore;
use super::world::Ecs;
use crate::math::Vec2;

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: stores move values around during swap-remove
/// - `Default`: scene setup can attach a default-configured component
///
/// The store accessors let systems and scene code address a store by
/// component type: `ecs.get::<Velocity>(handle)`.
pub trait Component: Copy + Default + Send + Sync + 'static {
    /// Human-readable component name, used in logs.
    const NAME: &'static str;

    /// The store holding this component type.
    fn store(ecs: &Ecs) -> &ComponentStore<Self>;

    /// The store holding this component type, mutably.
    fn store_mut(ecs: &mut Ecs) -> &mut ComponentStore<Self>;
}

/// World-space placement of an entity.
///
/// `pos` is the entity's center in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Center position in world pixels.
    pub pos: Vec2,
    /// Rotation in radians (visual only, physics ignores it).
    pub rotation: f32,
    /// Visual scale.
    pub scale: Vec2,
}

impl Transform {
    /// Creates an unrotated, unscaled transform at `pos`.
    #[inline]
    #[must_use]
    pub const fn at(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

/// Linear velocity in world pixels per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Velocity vector.
    pub v: Vec2,
}

impl Velocity {
    /// Creates a velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { v: Vec2::new(x, y) }
    }
}

/// Axis-aligned box collider centered on the entity's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    /// Half-extents in world pixels.
    pub half: Vec2,
    /// Set by the physics resolver when the last Y pass landed on a tile.
    pub on_ground: bool,
}

impl Collider {
    /// Creates a collider with the given half-extents.
    #[inline]
    #[must_use]
    pub const fn new(half_x: f32, half_y: f32) -> Self {
        Self {
            half: Vec2::new(half_x, half_y),
            on_ground: false,
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(14.0, 20.0)
    }
}

/// Player-controlled movement parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    /// Horizontal speed in pixels per second.
    pub move_speed: f32,
    /// Upward speed applied on jump, in pixels per second.
    pub jump_speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            move_speed: 320.0,
            jump_speed: 520.0,
        }
    }
}

/// Light emitter attached to an entity with a [`Transform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Light {
    /// Radius hint in tiles. Informational; falloff comes from attenuation.
    pub radius_tiles: i32,
    /// Intensity ceiling (0-255).
    pub intensity: u8,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            radius_tiles: 10,
            intensity: 255,
        }
    }
}

/// Copies `target`'s position plus `offset` every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follow {
    /// Entity to follow. A dead target leaves the follower where it is.
    pub target: Handle,
    /// Offset from the target's position in world pixels.
    pub offset: Vec2,
}

macro_rules! impl_component {
    ($ty:ty, $name:literal, $field:ident) => {
        impl Component for $ty {
            const NAME: &'static str = $name;

            #[inline]
            fn store(ecs: &Ecs) -> &ComponentStore<Self> {
                &ecs.$field
            }

            #[inline]
            fn store_mut(ecs: &mut Ecs) -> &mut ComponentStore<Self> {
                &mut ecs.$field
            }
        }
    };
}

impl_component!(Transform, "transform", transforms);
impl_component!(Velocity, "velocity", velocities);
impl_component!(Collider, "collider", colliders);
impl_component!(Player, "player", players);
impl_component!(Light, "light", lights);
impl_component!(Follow, "follow", follows);
