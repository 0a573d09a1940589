//! # Tile World
//!
//! An unbounded 2D grid of tiles, stored as lazily generated chunks keyed
//! by packed chunk coordinates.
//!
//! ## Lifecycle
//!
//! A chunk is generated the first time any of its tiles is read or written
//! through [`TileWorld::get`] / [`TileWorld::set`], then cached forever.
//! Memory grows with the explored area; there is no eviction.
//!
//! ## Threading
//!
//! `TileWorld` itself is single-threaded (`get` takes `&mut self` because it
//! may insert). Callers that share a world across threads use
//! [`SharedTileWorld`], which serialises every access, lazy creation included.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::chunk::{Chunk, ChunkCoord, Tile};
use crate::generator::{ChunkGenerator, TerrainGenerator};
use crate::rules::{NonZeroSolid, SolidityRule};

/// Default world pixels per tile.
pub const DEFAULT_TILE_PX: i32 = 32;

/// Axis-aligned rectangle in world pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge (exclusive).
    pub right: f32,
    /// Bottom edge (exclusive).
    pub bottom: f32,
}

/// Infinite chunked tile grid.
pub struct TileWorld {
    /// Loaded chunks by [`ChunkCoord::key`].
    chunks: HashMap<u64, Chunk>,
    /// World pixels per tile.
    tile_px: i32,
    generator: Box<dyn ChunkGenerator>,
    rule: Box<dyn SolidityRule>,
}

impl TileWorld {
    /// Creates a world with sine terrain and the non-zero solidity rule.
    ///
    /// # Panics
    ///
    /// Panics if `tile_px` is not positive.
    #[must_use]
    pub fn new(tile_px: i32) -> Self {
        Self::with_generator(tile_px, TerrainGenerator::new())
    }

    /// Creates a world that fills new chunks with `generator`.
    ///
    /// # Panics
    ///
    /// Panics if `tile_px` is not positive.
    #[must_use]
    pub fn with_generator(tile_px: i32, generator: impl ChunkGenerator + 'static) -> Self {
        assert!(tile_px > 0, "tile pixel scale must be positive, got {tile_px}");
        tracing::debug!("Tile world created: {} px per tile", tile_px);
        Self {
            chunks: HashMap::new(),
            tile_px,
            generator: Box::new(generator),
            rule: Box::new(NonZeroSolid),
        }
    }

    /// Replaces the solidity rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl SolidityRule + 'static) -> Self {
        self.rule = Box::new(rule);
        self
    }

    /// World pixels per tile.
    #[inline]
    #[must_use]
    pub const fn tile_px(&self) -> i32 {
        self.tile_px
    }

    /// Number of loaded chunks.
    #[inline]
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the chunk has been generated.
    #[inline]
    #[must_use]
    pub fn is_chunk_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord.key())
    }

    /// Loaded chunk at `coord`, without generating it.
    #[inline]
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord.key())
    }

    /// Loaded chunk at `coord`, generating it on first access.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let generator = &self.generator;
        let chunk = self.chunks.entry(coord.key()).or_insert_with(|| {
            tracing::trace!("Generating chunk ({}, {})", coord.x, coord.y);
            generator.generate(coord)
        });
        debug_assert_eq!(chunk.coord, coord, "chunk stored under a foreign key");
        chunk
    }

    /// Tile at a world tile coordinate. Generates the chunk if needed.
    pub fn get(&mut self, tile_x: i32, tile_y: i32) -> Tile {
        let (coord, local_x, local_y) = ChunkCoord::locate(tile_x, tile_y);
        self.ensure_chunk(coord).get(local_x, local_y)
    }

    /// Writes a tile. Generates the chunk first if needed.
    pub fn set(&mut self, tile_x: i32, tile_y: i32, tile: Tile) {
        let (coord, local_x, local_y) = ChunkCoord::locate(tile_x, tile_y);
        self.ensure_chunk(coord).set(local_x, local_y, tile);
    }

    /// Tile at a world tile coordinate if its chunk is loaded.
    #[must_use]
    pub fn peek(&self, tile_x: i32, tile_y: i32) -> Option<Tile> {
        let (coord, local_x, local_y) = ChunkCoord::locate(tile_x, tile_y);
        self.chunk(coord).map(|chunk| chunk.get(local_x, local_y))
    }

    /// Applies the world's solidity rule to a tile code.
    #[inline]
    #[must_use]
    pub fn solid(&self, tile: Tile) -> bool {
        self.rule.is_solid(tile)
    }

    /// Returns true if the tile at a world coordinate is solid.
    pub fn is_solid_at(&mut self, tile_x: i32, tile_y: i32) -> bool {
        let tile = self.get(tile_x, tile_y);
        self.solid(tile)
    }

    /// Clears a non-empty tile.
    ///
    /// # Returns
    ///
    /// `true` if a tile was removed.
    pub fn dig(&mut self, tile_x: i32, tile_y: i32) -> bool {
        if self.get(tile_x, tile_y).is_empty() {
            return false;
        }
        self.set(tile_x, tile_y, Tile::EMPTY);
        true
    }

    /// Fills an empty tile with `tile`.
    ///
    /// # Returns
    ///
    /// `true` if the tile was placed.
    pub fn place(&mut self, tile_x: i32, tile_y: i32, tile: Tile) -> bool {
        if tile.is_empty() || !self.get(tile_x, tile_y).is_empty() {
            return false;
        }
        self.set(tile_x, tile_y, tile);
        true
    }

    /// World tile containing a world pixel position (floor division).
    #[inline]
    #[must_use]
    pub fn tile_at_pixel(&self, px: f32, py: f32) -> (i32, i32) {
        let size = self.tile_px as f32;
        ((px / size).floor() as i32, (py / size).floor() as i32)
    }

    /// Pixel bounds of a world tile.
    #[inline]
    #[must_use]
    pub fn tile_rect_px(&self, tile_x: i32, tile_y: i32) -> PixelRect {
        let size = self.tile_px as f32;
        let left = (tile_x * self.tile_px) as f32;
        let top = (tile_y * self.tile_px) as f32;
        PixelRect {
            left,
            top,
            right: left + size,
            bottom: top + size,
        }
    }
}

impl Default for TileWorld {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_PX)
    }
}

impl std::fmt::Debug for TileWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileWorld")
            .field("tile_px", &self.tile_px)
            .field("chunks", &self.chunks.len())
            .finish_non_exhaustive()
    }
}

/// Thread-safe handle to a [`TileWorld`].
///
/// Clones share the same world. Every call takes the lock, so concurrent
/// first touches of a chunk generate it exactly once.
#[derive(Clone, Debug)]
pub struct SharedTileWorld {
    inner: Arc<Mutex<TileWorld>>,
}

impl SharedTileWorld {
    /// Wraps a world for shared access.
    #[must_use]
    pub fn new(world: TileWorld) -> Self {
        Self {
            inner: Arc::new(Mutex::new(world)),
        }
    }

    /// Locks the world for a batch of operations.
    pub fn lock(&self) -> MutexGuard<'_, TileWorld> {
        self.inner.lock()
    }

    /// See [`TileWorld::get`].
    pub fn get(&self, tile_x: i32, tile_y: i32) -> Tile {
        self.inner.lock().get(tile_x, tile_y)
    }

    /// See [`TileWorld::set`].
    pub fn set(&self, tile_x: i32, tile_y: i32, tile: Tile) {
        self.inner.lock().set(tile_x, tile_y, tile);
    }

    /// See [`TileWorld::peek`].
    #[must_use]
    pub fn peek(&self, tile_x: i32, tile_y: i32) -> Option<Tile> {
        self.inner.lock().peek(tile_x, tile_y)
    }

    /// See [`TileWorld::is_solid_at`].
    pub fn is_solid_at(&self, tile_x: i32, tile_y: i32) -> bool {
        self.inner.lock().is_solid_at(tile_x, tile_y)
    }

    /// See [`TileWorld::chunk_count`].
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.inner.lock().chunk_count()
    }

    /// Unwraps the world if this is the last handle.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged while other clones are alive.
    pub fn try_into_inner(self) -> Result<TileWorld, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EmptyGenerator;
    use crate::rules::TileTable;

    #[test]
    fn test_lazy_generation() {
        let mut world = TileWorld::new(32);
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.peek(0, 0), None);

        let _ = world.get(0, 0);
        assert_eq!(world.chunk_count(), 1);
        assert!(world.is_chunk_loaded(ChunkCoord::new(0, 0)));

        let _ = world.get(31, 31);
        assert_eq!(world.chunk_count(), 1, "same chunk");

        let _ = world.get(-1, 0);
        assert_eq!(world.chunk_count(), 2);
        assert!(world.is_chunk_loaded(ChunkCoord::new(-1, 0)));
    }

    #[test]
    fn test_set_get_negative_coordinates() {
        let mut world = TileWorld::with_generator(32, EmptyGenerator);
        world.set(-1, -1, Tile::STONE);
        world.set(-33, 64, Tile::GRASS);

        assert_eq!(world.get(-1, -1), Tile::STONE);
        assert_eq!(world.get(-33, 64), Tile::GRASS);
        assert_eq!(world.get(31, 31), Tile::EMPTY, "no aliasing across zero");
        assert_eq!(world.peek(-1, -1), Some(Tile::STONE));
        assert_eq!(
            world.chunk(ChunkCoord::new(-1, -1)).map(|c| c.get(31, 31)),
            Some(Tile::STONE)
        );
    }

    #[test]
    fn test_dig_and_place() {
        let mut world = TileWorld::with_generator(32, EmptyGenerator);
        assert!(!world.dig(4, 4), "nothing to dig");
        assert!(world.place(4, 4, Tile::DIRT));
        assert!(!world.place(4, 4, Tile::STONE), "occupied");
        assert!(!world.place(5, 4, Tile::EMPTY), "placing empty is not a placement");
        assert!(world.dig(4, 4));
        assert_eq!(world.get(4, 4), Tile::EMPTY);
    }

    #[test]
    fn test_solidity_rule_is_pluggable() {
        let vine = Tile::new(7);
        let mut world = TileWorld::with_generator(32, EmptyGenerator)
            .with_rule(TileTable::new().with_passable(vine));
        world.set(0, 0, vine);
        world.set(1, 0, Tile::STONE);

        assert!(!world.is_solid_at(0, 0));
        assert!(world.is_solid_at(1, 0));
        assert!(!world.is_solid_at(2, 0));
    }

    #[test]
    fn test_pixel_conversions() {
        let world = TileWorld::with_generator(32, EmptyGenerator);
        assert_eq!(world.tile_at_pixel(0.0, 31.9), (0, 0));
        assert_eq!(world.tile_at_pixel(-0.5, 32.0), (-1, 1));

        let rect = world.tile_rect_px(-1, 2);
        assert_eq!(
            rect,
            PixelRect {
                left: -32.0,
                top: 64.0,
                right: 0.0,
                bottom: 96.0
            }
        );
    }

    #[test]
    #[should_panic(expected = "tile pixel scale must be positive")]
    fn test_zero_tile_px_rejected() {
        let _ = TileWorld::new(0);
    }

    #[test]
    fn test_shared_world_generates_each_chunk_once() {
        let shared = SharedTileWorld::new(TileWorld::new(32));

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let shared = shared.clone();
                scope.spawn(move || {
                    for x in -64..64 {
                        let _ = shared.get(x, worker * 8);
                    }
                });
            }
        });

        // 4 chunk columns, all workers stay in chunk row 0
        assert_eq!(shared.chunk_count(), 4);
        shared.set(3, 3, Tile::STONE);
        assert!(shared.is_solid_at(3, 3));

        let world = shared.try_into_inner().expect("last handle");
        assert_eq!(world.peek(3, 3), Some(Tile::STONE));
    }
}
