//! # Chunk System
//!
//! The tile world is stored as fixed 32x32 chunks, created lazily on first
//! access and cached forever.
//!
//! ## Addressing
//!
//! World tile coordinates are split with floor division, never truncation:
//! tile `-1` lives in chunk `-1` at local offset `31`. Local offsets are
//! therefore always in `[0, 32)`.

use bytemuck::{Pod, Zeroable};

/// Chunk width and height in tiles.
pub const CHUNK_SIZE: usize = 32;

/// Total tiles per chunk.
pub const TILES_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE;

const CHUNK_SPAN: i32 = CHUNK_SIZE as i32;

/// A single tile: a 16-bit code.
///
/// `0` is empty. Any other code is a material; whether it blocks movement
/// and light is decided by a [`SolidityRule`](crate::SolidityRule).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct Tile(pub u16);

impl Tile {
    /// Empty tile.
    pub const EMPTY: Self = Self(0);
    /// Dirt.
    pub const DIRT: Self = Self(1);
    /// Stone.
    pub const STONE: Self = Self(2);
    /// Grass (surface layer).
    pub const GRASS: Self = Self(4);

    /// Creates a tile from its code.
    #[inline]
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the tile code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Returns true for the empty tile.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not tiles).
    pub x: i32,
    /// Y coordinate (in chunks, not tiles).
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing world tile `(tile_x, tile_y)`.
    #[inline]
    #[must_use]
    pub const fn from_tile(tile_x: i32, tile_y: i32) -> Self {
        Self {
            x: tile_x.div_euclid(CHUNK_SPAN),
            y: tile_y.div_euclid(CHUNK_SPAN),
        }
    }

    /// Splits a world tile coordinate into its chunk and local offset.
    ///
    /// The offsets are always in `[0, CHUNK_SIZE)`.
    #[inline]
    #[must_use]
    pub const fn locate(tile_x: i32, tile_y: i32) -> (Self, usize, usize) {
        (
            Self::from_tile(tile_x, tile_y),
            tile_x.rem_euclid(CHUNK_SPAN) as usize,
            tile_y.rem_euclid(CHUNK_SPAN) as usize,
        )
    }

    /// Packs both signed coordinates into one map key.
    ///
    /// X occupies the high 32 bits and Y the low 32 bits, each as its
    /// two's-complement bit pattern, so distinct coordinates never collide.
    #[inline]
    #[must_use]
    pub const fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    /// Inverse of [`ChunkCoord::key`].
    #[inline]
    #[must_use]
    pub const fn from_key(key: u64) -> Self {
        Self {
            x: (key >> 32) as u32 as i32,
            y: key as u32 as i32,
        }
    }

    /// World tile X of the chunk's top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin_x(self) -> i32 {
        self.x * CHUNK_SPAN
    }

    /// World tile Y of the chunk's top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin_y(self) -> i32 {
        self.y * CHUNK_SPAN
    }
}

/// A 32x32 block of tiles plus its coordinates.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk position in the world.
    pub coord: ChunkCoord,
    /// Tile data, row-major (`[y * CHUNK_SIZE + x]`).
    tiles: Box<[Tile; TILES_PER_CHUNK]>,
}

impl Chunk {
    /// Creates an all-empty chunk at the given coordinates.
    #[must_use]
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            tiles: Box::new([Tile::EMPTY; TILES_PER_CHUNK]),
        }
    }

    #[inline]
    fn offset(local_x: usize, local_y: usize) -> usize {
        debug_assert!(
            local_x < CHUNK_SIZE && local_y < CHUNK_SIZE,
            "local offset ({local_x}, {local_y}) outside chunk"
        );
        local_y * CHUNK_SIZE + local_x
    }

    /// Gets a tile at local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either offset is not below [`CHUNK_SIZE`].
    #[inline]
    #[must_use]
    pub fn get(&self, local_x: usize, local_y: usize) -> Tile {
        self.tiles[Self::offset(local_x, local_y)]
    }

    /// Sets a tile at local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either offset is not below [`CHUNK_SIZE`].
    #[inline]
    pub fn set(&mut self, local_x: usize, local_y: usize, tile: Tile) {
        self.tiles[Self::offset(local_x, local_y)] = tile;
    }

    /// All tiles, row-major.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        self.tiles.as_slice()
    }

    /// Number of non-empty tiles.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_empty()).count()
    }

    /// CRC32 of the tile bytes. Equal chunks have equal checksums.
    #[must_use]
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(bytemuck::cast_slice(self.tiles.as_slice()))
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("coord", &self.coord)
            .field("filled", &self.filled_count())
            .field("checksum", &format_args!("{:08x}", self.checksum()))
            .finish()
    }
}
