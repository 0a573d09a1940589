//! # Component Storage
//!
//! Sparse-set storage for a single component type.
//!
//! The storage keeps three arrays:
//! - `dense`: component values, contiguous, in insertion/compaction order
//! - `owners`: the full owning handle of each dense row
//! - `sparse`: entity slot index -> dense row (or [`ABSENT`])
//!
//! Invariant: for every slot `i` with `sparse[i] == d`, `owners[d].index() == i`.
//! Lookups additionally compare the owner's generation, so a handle whose slot
//! was destroyed and reissued never resolves to the new entity's row.

use super::entity::{EntityRegistry, Handle};

/// Sparse entry for "no component".
const ABSENT: u32 = u32::MAX;

/// Sparse/dense storage mapping entity handles to values of type `T`.
///
/// The store owns its values; entities are only keys.
///
/// # Example
///
/// ```rust
/// use delve_core::{ComponentStore, EntityRegistry};
///
/// let mut registry = EntityRegistry::new();
/// let mut health: ComponentStore<u32> = ComponentStore::new();
///
/// let e = registry.create();
/// health.add(e, 100);
/// assert_eq!(health.get(e), Some(&100));
/// ```
#[derive(Clone, Debug)]
pub struct ComponentStore<T> {
    /// Dense component values.
    dense: Vec<T>,
    /// Owning handle per dense row.
    owners: Vec<Handle>,
    /// Slot index -> dense row.
    sparse: Vec<u32>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dense: Vec::new(),
            owners: Vec::new(),
            sparse: Vec::new(),
        }
    }

    /// Creates an empty store with room for `capacity` components.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense: Vec::with_capacity(capacity),
            owners: Vec::with_capacity(capacity),
            sparse: Vec::new(),
        }
    }

    /// Dense row holding the component of exactly `handle`.
    #[inline]
    fn row_of(&self, handle: Handle) -> Option<usize> {
        let row = *self.sparse.get(handle.index() as usize)?;
        if row == ABSENT {
            return None;
        }
        let row = row as usize;
        (self.owners.get(row) == Some(&handle)).then_some(row)
    }

    /// Dense row assigned to `handle`'s slot, whatever generation owns it.
    #[inline]
    fn row_of_slot(&self, index: u32) -> Option<usize> {
        let row = *self.sparse.get(index as usize)?;
        if row == ABSENT {
            return None;
        }
        debug_assert_eq!(
            self.owners[row as usize].index(),
            index,
            "sparse/dense desync at slot {index}"
        );
        Some(row as usize)
    }

    /// Returns `true` if `handle` has a component in this store.
    #[inline]
    #[must_use]
    pub fn has(&self, handle: Handle) -> bool {
        self.row_of(handle).is_some()
    }

    /// Gets the component for `handle`, or `None` if absent or stale.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.row_of(handle).map(|row| &self.dense[row])
    }

    /// Gets the component for `handle` mutably, or `None` if absent or stale.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.row_of(handle).map(|row| &mut self.dense[row])
    }

    /// Inserts or overwrites the component for `handle`.
    ///
    /// Overwriting reuses the slot's dense row in place, so no other
    /// entity's row moves. A row left behind by an older generation of the
    /// same slot is taken over by `handle`.
    ///
    /// # Returns
    ///
    /// The stored value, or `None` if the slot's row belongs to a newer
    /// generation than `handle`. Nothing is written in that case.
    pub fn add(&mut self, handle: Handle, value: T) -> Option<&mut T> {
        let index = handle.index();

        if let Some(row) = self.row_of_slot(index) {
            if handle.generation() < self.owners[row].generation() {
                return None;
            }
            self.owners[row] = handle;
            self.dense[row] = value;
            return Some(&mut self.dense[row]);
        }

        let slot = index as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, ABSENT);
        }

        let row = self.dense.len();
        self.sparse[slot] = u32::try_from(row)
            .unwrap_or_else(|_| panic!("component store exceeded u32 rows"));
        self.owners.push(handle);
        self.dense.push(value);
        Some(&mut self.dense[row])
    }

    /// Removes the component for `handle` with a swap-remove.
    ///
    /// The last dense row moves into the vacated row and its sparse entry is
    /// fixed up. Removing an absent or stale handle is a no-op.
    ///
    /// # Returns
    ///
    /// The removed value, if there was one.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let row = self.row_of(handle)?;
        Some(self.remove_row(row))
    }

    /// Swap-removes a dense row.
    fn remove_row(&mut self, row: usize) -> T {
        let removed_owner = self.owners.swap_remove(row);
        let value = self.dense.swap_remove(row);

        if let Some(moved) = self.owners.get(row) {
            self.sparse[moved.index() as usize] = row as u32;
        }
        self.sparse[removed_owner.index() as usize] = ABSENT;

        value
    }

    /// Removes every row whose owner is no longer alive in `registry`.
    ///
    /// # Returns
    ///
    /// Number of rows removed.
    pub fn prune_dead(&mut self, registry: &EntityRegistry) -> usize {
        let mut removed = 0;
        let mut row = 0;
        while row < self.owners.len() {
            if registry.alive(self.owners[row]) {
                row += 1;
            } else {
                // The row now holds what was the last row; re-check it.
                self.remove_row(row);
                removed += 1;
            }
        }
        removed
    }

    /// Number of components stored.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if the store is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Owning handle of dense row `row`.
    ///
    /// The handle may be stale; systems must check it against the registry.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    #[inline]
    #[must_use]
    pub fn handle_at(&self, row: usize) -> Handle {
        self.owners[row]
    }

    /// Value of dense row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    #[inline]
    #[must_use]
    pub fn value_at(&self, row: usize) -> &T {
        &self.dense[row]
    }

    /// Owning handles in dense order.
    #[inline]
    #[must_use]
    pub fn handles(&self) -> &[Handle] {
        &self.owners
    }

    /// Values in dense order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.dense
    }

    /// Iterates `(handle, &value)` pairs in dense order.
    ///
    /// Order is not stable across removals.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    /// Iterates `(handle, &mut value)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }

    /// Removes every component.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.owners.clear();
        self.sparse.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn assert_consistent<T>(store: &ComponentStore<T>) {
        assert_eq!(store.dense.len(), store.owners.len());
        for (row, owner) in store.owners.iter().enumerate() {
            assert_eq!(
                store.sparse[owner.index() as usize] as usize,
                row,
                "sparse[owners[{row}]] != {row}"
            );
        }
        let mapped = store.sparse.iter().filter(|&&row| row != ABSENT).count();
        assert_eq!(mapped, store.len());
    }

    #[test]
    fn test_add_get_overwrite() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<u32> = ComponentStore::new();

        let a = registry.create();
        let b = registry.create();
        store.add(a, 1);
        store.add(b, 2);
        assert_eq!(store.get(a), Some(&1));
        assert_eq!(store.get(b), Some(&2));

        // Overwrite keeps every row where it was
        store.add(a, 10);
        assert_eq!(store.len(), 2);
        assert_eq!(store.handle_at(0), a);
        assert_eq!(store.handle_at(1), b);
        assert_eq!(store.get(a), Some(&10));

        *store.get_mut(b).unwrap() += 5;
        assert_eq!(store.value_at(1), &7);
        assert_consistent(&store);
    }

    #[test]
    fn test_swap_remove_fixes_moved_row() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<char> = ComponentStore::new();

        let a = registry.create();
        let b = registry.create();
        let c = registry.create();
        store.add(a, 'a');
        store.add(b, 'b');
        store.add(c, 'c');

        assert_eq!(store.remove(a), Some('a'));
        assert_eq!(store.len(), 2);
        assert_eq!(store.handle_at(0), c, "last row moved into the hole");
        assert_eq!(store.get(c), Some(&'c'));
        assert_eq!(store.get(b), Some(&'b'));
        assert!(!store.has(a));
        assert_consistent(&store);

        // Removing the last row needs no fix-up
        assert_eq!(store.remove(b), Some('b'));
        assert_eq!(store.values(), &['c']);
        assert_consistent(&store);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<u8> = ComponentStore::new();

        let a = registry.create();
        let b = registry.create();
        store.add(b, 1);

        assert_eq!(store.remove(a), None);
        assert_eq!(store.remove(Handle::new(500, 1)), None);
        assert_eq!(store.len(), 1);
        assert_consistent(&store);
    }

    #[test]
    fn test_stale_handle_never_reads_new_entity() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<&str> = ComponentStore::new();

        let old = registry.create();
        store.add(old, "old");
        registry.destroy(old);

        let new = registry.create();
        assert_eq!(new.index(), old.index());

        // Leftover row of the destroyed entity is invisible to the new one
        assert!(!store.has(new));
        assert_eq!(store.get(new), None);

        store.add(new, "new");
        assert_eq!(store.get(new), Some(&"new"));
        assert_eq!(store.get(old), None, "stale handle must not see new data");
        assert!(!store.has(old));
        assert_eq!(store.remove(old), None);
        assert_eq!(store.len(), 1);
        assert_consistent(&store);
    }

    #[test]
    fn test_stale_add_leaves_new_entity_alone() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<u32> = ComponentStore::new();

        let old = registry.create();
        registry.destroy(old);
        let new = registry.create();
        assert_eq!(new.index(), old.index());

        assert_eq!(store.add(new, 42).copied(), Some(42));
        assert!(store.add(old, 1).is_none(), "older generation must not write");
        assert_eq!(store.get(new), Some(&42));
        assert_eq!(store.get(old), None);
        assert_eq!(store.handle_at(0), new);
        assert_eq!(store.len(), 1);
        assert_consistent(&store);
    }

    #[test]
    fn test_prune_dead() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<u32> = ComponentStore::new();

        let handles: Vec<Handle> = (0..6).map(|_| registry.create()).collect();
        for (i, &handle) in handles.iter().enumerate() {
            store.add(handle, i as u32);
        }
        for &handle in handles.iter().step_by(2) {
            registry.destroy(handle);
        }

        assert_eq!(store.prune_dead(&registry), 3);
        assert_eq!(store.len(), 3);
        for (handle, _) in store.iter() {
            assert!(registry.alive(handle));
        }
        assert_consistent(&store);
    }

    #[test]
    fn test_iteration_matches_dense_order() {
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<i32> = ComponentStore::new();

        let a = registry.create();
        let b = registry.create();
        store.add(a, 1);
        store.add(b, 2);

        for (_, value) in store.iter_mut() {
            *value *= 10;
        }
        let pairs: Vec<(Handle, i32)> = store.iter().map(|(h, v)| (h, *v)).collect();
        assert_eq!(pairs, vec![(a, 10), (b, 20)]);
        assert_eq!(store.handles(), &[a, b]);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.has(a));
    }

    #[test]
    fn test_consistency_under_random_ops() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut registry = EntityRegistry::new();
        let mut store: ComponentStore<u64> = ComponentStore::new();
        let handles: Vec<Handle> = (0..64).map(|_| registry.create()).collect();

        for step in 0..20_000u64 {
            let handle = handles[rng.gen_range(0..handles.len())];
            if rng.gen_bool(0.55) {
                store.add(handle, step);
                assert_eq!(store.get(handle), Some(&step));
            } else {
                store.remove(handle);
                assert!(!store.has(handle));
            }

            if step % 97 == 0 {
                assert_consistent(&store);
                let present = handles.iter().filter(|&&h| store.has(h)).count();
                assert_eq!(store.len(), present);
            }
        }
        assert_consistent(&store);
    }
}
