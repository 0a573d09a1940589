//! Solidity rules.
//!
//! Physics and lighting both ask the world whether a tile is solid; neither
//! hard-codes the answer. Swapping the rule on a [`TileWorld`](crate::TileWorld)
//! changes collision and light blocking together.

use crate::chunk::Tile;

/// Decides whether a tile blocks movement and attenuates light as solid.
pub trait SolidityRule: Send + Sync {
    /// Returns true if `tile` is solid.
    fn is_solid(&self, tile: Tile) -> bool;
}

/// Every non-empty tile is solid.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonZeroSolid;

impl SolidityRule for NonZeroSolid {
    #[inline]
    fn is_solid(&self, tile: Tile) -> bool {
        !tile.is_empty()
    }
}

/// Per-code table: non-empty tiles are solid unless marked passable.
///
/// The empty tile is never solid.
#[derive(Clone, Debug, Default)]
pub struct TileTable {
    passable: Vec<bool>,
}

impl TileTable {
    /// Creates a table where every non-empty code is solid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`TileTable::set_passable`].
    #[must_use]
    pub fn with_passable(mut self, tile: Tile) -> Self {
        self.set_passable(tile, true);
        self
    }

    /// Marks a code as passable (not solid) or restores it to solid.
    pub fn set_passable(&mut self, tile: Tile, passable: bool) {
        let code = usize::from(tile.code());
        if code >= self.passable.len() {
            if !passable {
                return;
            }
            self.passable.resize(code + 1, false);
        }
        self.passable[code] = passable;
    }

    /// Returns true if the code was marked passable.
    #[must_use]
    pub fn is_passable(&self, tile: Tile) -> bool {
        self.passable
            .get(usize::from(tile.code()))
            .copied()
            .unwrap_or(false)
    }
}

impl SolidityRule for TileTable {
    #[inline]
    fn is_solid(&self, tile: Tile) -> bool {
        !tile.is_empty() && !self.is_passable(tile)
    }
}
