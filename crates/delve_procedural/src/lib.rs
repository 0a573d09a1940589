//! # DELVE Procedural World
//!
//! The unbounded tile grid that physics collides with and light travels through.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same chunk coordinates always generate the same tiles
//! 2. **Lazy**: chunks are generated on first touch and cached
//! 3. **Exact addressing**: floor division for negative coordinates
//! 4. **Pluggable rules**: solidity is a [`SolidityRule`], not a hard-coded check
//!
//! ## Example
//!
//! ```rust
//! use delve_procedural::{Tile, TileWorld};
//!
//! let mut world = TileWorld::new(32);
//! world.set(-1, -1, Tile::STONE);
//! assert_eq!(world.get(-1, -1), Tile::STONE);
//! assert!(world.is_solid_at(-1, -1));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod generator;
pub mod rules;
pub mod tile_world;

pub use chunk::{Chunk, ChunkCoord, Tile, CHUNK_SIZE, TILES_PER_CHUNK};
pub use generator::{ChunkGenerator, EmptyGenerator, TerrainGenerator, TerrainParams};
pub use rules::{NonZeroSolid, SolidityRule, TileTable};
pub use tile_world::{PixelRect, SharedTileWorld, TileWorld, DEFAULT_TILE_PX};
