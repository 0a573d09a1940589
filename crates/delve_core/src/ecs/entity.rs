//! # Entity Management
//!
//! Entities are lightweight handles consisting of:
//! - A slot index shared with every component store's sparse array
//! - A generation counter for safe slot reuse
//!
//! Generation 0 is reserved as "never issued": the all-zero handle
//! (`Handle::default()`) can therefore never be alive.

/// Unique identifier for an entity.
///
/// The handle is split into two parts:
/// - Lower 32 bits: slot index
/// - Upper 32 bits: generation counter for detecting stale references
///
/// Two handles are equal only if both index and generation match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Handle(u64);

impl Handle {
    /// Null handle. Never issued by a registry.
    pub const NULL: Self = Self(u64::MAX);

    /// Creates a handle from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the handle.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the packed 64-bit representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Rebuilds a handle from its packed representation.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Checks if this is the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

/// First generation assigned to a fresh slot.
const FIRST_GENERATION: u32 = 1;

/// Issues and invalidates entity handles.
///
/// Each slot carries the generation that its live handle must match.
/// Destroying bumps the slot's generation and returns the slot to a
/// free list, so every outstanding handle to it is dead forever.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    /// Current generation per slot.
    generations: Vec<u32>,
    /// Free slot indices, reused LIFO.
    free: Vec<u32>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Issues a new live handle.
    ///
    /// Reuses a freed slot when one is available (its generation was
    /// already bumped on destroy), otherwise appends a slot at generation 1.
    pub fn create(&mut self) -> Handle {
        if let Some(index) = self.free.pop() {
            return Handle::new(index, self.generations[index as usize]);
        }

        let index = u32::try_from(self.generations.len())
            .unwrap_or_else(|_| panic!("entity registry exhausted the u32 index space"));
        self.generations.push(FIRST_GENERATION);
        Handle::new(index, FIRST_GENERATION)
    }

    /// O(1) validity check.
    #[inline]
    #[must_use]
    pub fn alive(&self, handle: Handle) -> bool {
        self.generations
            .get(handle.index() as usize)
            .is_some_and(|&generation| generation == handle.generation())
    }

    /// Invalidates `handle` and frees its slot for reuse.
    ///
    /// No-op if the handle is already dead.
    ///
    /// # Returns
    ///
    /// `true` if the handle was alive.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        if !self.alive(handle) {
            return false;
        }

        let slot = &mut self.generations[handle.index() as usize];
        *slot = next_generation(*slot);
        self.free.push(handle.index());
        true
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len() - self.free.len()
    }

    /// Returns `true` if no entity is alive.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated. Every issued handle indexes below this.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }
}

/// Bumps a generation, skipping the reserved value 0 on wrap.
#[inline]
const fn next_generation(generation: u32) -> u32 {
    match generation.wrapping_add(1) {
        0 => FIRST_GENERATION,
        next => next,
    }
}
