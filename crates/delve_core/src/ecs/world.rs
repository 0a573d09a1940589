//! # ECS Container
//!
//! The entity registry plus one store per component type.
//! Owned by the caller's simulation context; there is no global instance.

use super::component::{Collider, Component, Follow, Light, Player, Transform, Velocity};
use super::entity::{EntityRegistry, Handle};
use super::storage::ComponentStore;

/// Entity registry and component stores.
///
/// Stores are public fields so systems can borrow several of them
/// mutably at once (`&mut ecs.transforms` alongside `&mut ecs.velocities`).
///
/// # Example
///
/// ```rust
/// use delve_core::{Ecs, Velocity};
///
/// let mut ecs = Ecs::new();
/// let e = ecs.spawn();
/// ecs.add(e, Velocity::new(0.0, 10.0));
/// assert!(ecs.has::<Velocity>(e));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Ecs {
    /// Authoritative source of entity liveness.
    pub registry: EntityRegistry,

    // =========================================================================
    // Component Stores - Add new component types here
    // =========================================================================
    /// Transform store.
    pub transforms: ComponentStore<Transform>,
    /// Velocity store.
    pub velocities: ComponentStore<Velocity>,
    /// Collider store.
    pub colliders: ComponentStore<Collider>,
    /// Player controller store.
    pub players: ComponentStore<Player>,
    /// Light emitter store.
    pub lights: ComponentStore<Light>,
    /// Follow store.
    pub follows: ComponentStore<Follow>,
}

impl Ecs {
    /// Creates an empty ECS.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new entity with no components.
    pub fn spawn(&mut self) -> Handle {
        self.registry.create()
    }

    /// Despawns an entity, removing it from every store first.
    ///
    /// # Returns
    ///
    /// `true` if the entity was alive.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        if !self.registry.alive(handle) {
            return false;
        }

        self.transforms.remove(handle);
        self.velocities.remove(handle);
        self.colliders.remove(handle);
        self.players.remove(handle);
        self.lights.remove(handle);
        self.follows.remove(handle);

        self.registry.destroy(handle)
    }

    /// Checks if an entity is alive.
    #[inline]
    #[must_use]
    pub fn alive(&self, handle: Handle) -> bool {
        self.registry.alive(handle)
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    /// Attaches (or overwrites) a component on a live entity.
    ///
    /// # Returns
    ///
    /// `false` if the entity is dead; nothing is stored in that case.
    pub fn add<C: Component>(&mut self, handle: Handle, component: C) -> bool {
        if !self.registry.alive(handle) {
            return false;
        }
        C::store_mut(self).add(handle, component).is_some()
    }

    /// Gets a component of a live entity.
    ///
    /// Rows left behind by a bare `registry.destroy` are not visible here.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, handle: Handle) -> Option<&C> {
        if !self.registry.alive(handle) {
            return None;
        }
        C::store(self).get(handle)
    }

    /// Gets a component of a live entity mutably.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, handle: Handle) -> Option<&mut C> {
        if !self.registry.alive(handle) {
            return None;
        }
        C::store_mut(self).get_mut(handle)
    }

    /// Checks if a live entity has a component.
    #[inline]
    #[must_use]
    pub fn has<C: Component>(&self, handle: Handle) -> bool {
        self.registry.alive(handle) && C::store(self).has(handle)
    }

    /// Detaches a component from a live entity.
    ///
    /// Use [`Ecs::prune_dead`] to clear rows of dead entities.
    pub fn remove<C: Component>(&mut self, handle: Handle) -> Option<C> {
        if !self.registry.alive(handle) {
            return None;
        }
        C::store_mut(self).remove(handle)
    }

    /// Names of the components attached to `handle`, for debug output.
    #[must_use]
    pub fn component_names(&self, handle: Handle) -> Vec<&'static str> {
        let mut names = Vec::new();
        push_name::<Transform>(self, handle, &mut names);
        push_name::<Velocity>(self, handle, &mut names);
        push_name::<Collider>(self, handle, &mut names);
        push_name::<Player>(self, handle, &mut names);
        push_name::<Light>(self, handle, &mut names);
        push_name::<Follow>(self, handle, &mut names);
        names
    }

    /// Drops rows left behind by entities destroyed through the bare registry.
    ///
    /// # Returns
    ///
    /// Total rows removed across all stores.
    pub fn prune_dead(&mut self) -> usize {
        let registry = &self.registry;
        self.transforms.prune_dead(registry)
            + self.velocities.prune_dead(registry)
            + self.colliders.prune_dead(registry)
            + self.players.prune_dead(registry)
            + self.lights.prune_dead(registry)
            + self.follows.prune_dead(registry)
    }
}

fn push_name<C: Component>(ecs: &Ecs, handle: Handle, names: &mut Vec<&'static str>) {
    if ecs.has::<C>(handle) {
        names.push(C::NAME);
    }
}
