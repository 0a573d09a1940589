//! # Chunk Generators
//!
//! A generator is a pure function from chunk coordinates to chunk contents.
//! [`TileWorld`](crate::TileWorld) calls it exactly once per coordinate,
//! the first time any tile of that chunk is touched.

use crate::chunk::{Chunk, ChunkCoord, Tile, CHUNK_SIZE};

/// Produces the initial contents of a chunk.
///
/// Implementations must be deterministic: the same coordinates always
/// yield identical tiles.
pub trait ChunkGenerator: Send + Sync {
    /// Generates the chunk at `coord`.
    fn generate(&self, coord: ChunkCoord) -> Chunk;
}

/// Terrain shape parameters.
///
/// Ground height for world column `x` is
/// `trunc(base + sin(x * high_freq) * high_amp + sin(x * low_freq) * low_amp)`.
/// Y grows downward, so rows with a larger Y are deeper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainParams {
    /// Frequency of the detail wave.
    pub high_freq: f32,
    /// Amplitude of the detail wave, in tiles.
    pub high_amp: f32,
    /// Frequency of the hill wave.
    pub low_freq: f32,
    /// Amplitude of the hill wave, in tiles.
    pub low_amp: f32,
    /// Mean ground row.
    pub base: f32,
    /// Rows of dirt below the surface before stone starts.
    pub stone_depth: i32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            high_freq: 0.08,
            high_amp: 4.0,
            low_freq: 0.02,
            low_amp: 10.0,
            base: 18.0,
            stone_depth: 10,
        }
    }
}

/// Rolling sine-wave terrain: grass surface, dirt beneath, stone deeper.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainGenerator {
    params: TerrainParams,
}

impl TerrainGenerator {
    /// Creates a generator with the default terrain shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with custom parameters.
    #[must_use]
    pub const fn with_params(params: TerrainParams) -> Self {
        Self { params }
    }

    /// The terrain parameters.
    #[must_use]
    pub const fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Surface row for world column `tile_x`.
    #[must_use]
    pub fn ground_height(&self, tile_x: i32) -> i32 {
        let p = &self.params;
        let x = tile_x as f32;
        let h = (x * p.high_freq).sin() * p.high_amp + (x * p.low_freq).sin() * p.low_amp;
        (p.base + h) as i32
    }

    /// Tile at a world coordinate, ignoring any edits.
    #[must_use]
    pub fn natural_tile(&self, tile_x: i32, tile_y: i32) -> Tile {
        classify(tile_y, self.ground_height(tile_x), self.params.stone_depth)
    }
}

fn classify(tile_y: i32, ground: i32, stone_depth: i32) -> Tile {
    if tile_y > ground + stone_depth {
        Tile::STONE
    } else if tile_y > ground {
        Tile::DIRT
    } else if tile_y == ground {
        Tile::GRASS
    } else {
        Tile::EMPTY
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);

        for local_x in 0..CHUNK_SIZE {
            // Column height depends on x only
            let ground = self.ground_height(coord.origin_x() + local_x as i32);
            for local_y in 0..CHUNK_SIZE {
                let tile_y = coord.origin_y() + local_y as i32;
                chunk.set(local_x, local_y, classify(tile_y, ground, self.params.stone_depth));
            }
        }

        chunk
    }
}

/// Generates all-empty chunks. Scenes build their geometry with `set`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&self, coord: ChunkCoord) -> Chunk {
        Chunk::new(coord)
    }
}
