//! # Tile Lighting
//!
//! Flood-fill light propagation over the visible tile region.
//!
//! ## Algorithm
//!
//! 1. Every cell of the grid starts at the ambient floor
//! 2. Each light raises its own tile's cell to its intensity
//! 3. A FIFO worklist spreads light to the 4 orthogonal neighbours, losing a
//!    fixed step per tile (more when leaving a solid tile)
//!
//! A neighbour is written and queued only when the candidate value exceeds
//! what it already holds. Cells never get darker during a build, which makes
//! overlapping lights correct in any order and bounds the work by the number
//! of raises.
//!
//! The grid is rebuilt from scratch on every call; nothing carries over
//! between frames except allocations.

use std::collections::VecDeque;

use delve_core::Vec2;
use delve_procedural::TileWorld;

use crate::camera::{Camera2D, TileRect};
use crate::config::LightingConfig;

/// Darkest overlay alpha the renderer applies.
pub const MAX_DARKNESS_ALPHA: u8 = 220;

/// A light to propagate, in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    /// Position in world pixels.
    pub pos_px: Vec2,
    /// Radius hint in tiles (informational).
    pub radius_tiles: i32,
    /// Intensity at the source tile.
    pub intensity: u8,
}

impl LightSource {
    /// Creates a light at a world pixel position.
    #[must_use]
    pub const fn new(pos_px: Vec2, intensity: u8) -> Self {
        Self {
            pos_px,
            radius_tiles: 10,
            intensity,
        }
    }
}

/// Counters from one [`LightMap::build`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightStats {
    /// Lights that raised their own cell.
    pub seeded: usize,
    /// Neighbour cells raised during propagation.
    pub raises: usize,
    /// Cells in the grid.
    pub cells: usize,
}

/// Rectangular grid of light levels over world tiles.
#[derive(Clone, Debug)]
pub struct LightMap {
    /// Tiles covered; `x0, y0` is the origin of cell `(0, 0)`.
    bounds: TileRect,
    /// Light levels, row-major.
    cells: Vec<u8>,
    ambient: u8,
    open_decay: u8,
    solid_decay: u8,
    margin: i32,
    /// Reused between builds.
    queue: VecDeque<(i32, i32, u8)>,
    warned_dim_lights: bool,
}

impl Default for LightMap {
    fn default() -> Self {
        Self::new(&LightingConfig::default())
    }
}

impl LightMap {
    /// Creates an empty map. Every sample reads ambient until the first build.
    #[must_use]
    pub fn new(config: &LightingConfig) -> Self {
        Self {
            bounds: TileRect::new(0, 0, -1, -1),
            cells: Vec::new(),
            ambient: config.ambient,
            open_decay: config.open_decay,
            solid_decay: config.solid_decay,
            margin: config.grid_margin,
            queue: VecDeque::with_capacity(4096),
            warned_dim_lights: false,
        }
    }

    /// Ambient floor.
    #[inline]
    #[must_use]
    pub const fn ambient(&self) -> u8 {
        self.ambient
    }

    /// Changes the ambient floor. Takes effect on the next build.
    pub fn set_ambient(&mut self, ambient: u8) {
        self.ambient = ambient;
        self.warned_dim_lights = false;
    }

    /// Tiles covered by the last build.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> TileRect {
        self.bounds
    }

    /// Light levels from the last build, row-major over [`LightMap::bounds`].
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Rebuilds over the camera's view plus the configured margin.
    pub fn build_visible(
        &mut self,
        world: &mut TileWorld,
        camera: &Camera2D,
        lights: &[LightSource],
    ) -> LightStats {
        let rect = camera.visible_tiles(world.tile_px(), self.margin);
        self.build(world, rect, lights)
    }

    /// Rebuilds the grid over `rect` from `lights`.
    ///
    /// An empty `rect` leaves an empty grid; every sample then reads ambient.
    pub fn build(&mut self, world: &mut TileWorld, rect: TileRect, lights: &[LightSource]) -> LightStats {
        self.queue.clear();
        if rect.is_empty() {
            self.bounds = TileRect::new(0, 0, -1, -1);
            self.cells.clear();
            return LightStats::default();
        }

        self.bounds = rect;
        self.cells.clear();
        self.cells.resize(rect.area(), self.ambient);
        self.warn_if_lights_too_dim(lights);

        let mut stats = LightStats {
            cells: self.cells.len(),
            ..LightStats::default()
        };

        for light in lights {
            let (tile_x, tile_y) = world.tile_at_pixel(light.pos_px.x, light.pos_px.y);
            if self.raise(tile_x - rect.x0, tile_y - rect.y0, light.intensity) {
                stats.seeded += 1;
            }
        }

        while let Some((x, y, level)) = self.queue.pop_front() {
            if level <= 1 {
                continue;
            }

            let decay = if world.is_solid_at(rect.x0 + x, rect.y0 + y) {
                self.solid_decay
            } else {
                self.open_decay
            };
            let next = level.saturating_sub(decay);

            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                if self.raise(x + dx, y + dy, next) {
                    stats.raises += 1;
                }
            }
        }

        tracing::trace!(
            "Light map rebuilt: {} cells, {} seeds, {} raises",
            stats.cells,
            stats.seeded,
            stats.raises
        );
        stats
    }

    /// Raises grid cell `(x, y)` to `level` and queues it, if that is brighter.
    fn raise(&mut self, x: i32, y: i32, level: u8) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        if level <= self.cells[index] {
            return false;
        }
        self.cells[index] = level;
        self.queue.push_back((x, y, level));
        true
    }

    /// Grid-local cell to vector index, if inside the grid.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        Some(y as usize * w as usize + x as usize)
    }

    /// Light level at a world tile. Outside the grid this is ambient.
    #[must_use]
    pub fn sample_tile(&self, tile_x: i32, tile_y: i32) -> u8 {
        let (Some(x), Some(y)) = (
            tile_x.checked_sub(self.bounds.x0),
            tile_y.checked_sub(self.bounds.y0),
        ) else {
            return self.ambient;
        };
        self.index(x, y).map_or(self.ambient, |index| self.cells[index])
    }

    fn warn_if_lights_too_dim(&mut self, lights: &[LightSource]) {
        if self.warned_dim_lights || lights.is_empty() {
            return;
        }
        if lights.iter().all(|light| light.intensity <= self.ambient) {
            tracing::warn!(
                "Ambient light {} is at least as bright as every light source; lights have no effect",
                self.ambient
            );
            self.warned_dim_lights = true;
        }
    }
}

/// Overlay alpha for a light level: fully lit is transparent, darkness caps at 220.
#[must_use]
pub fn darkness_alpha(level: u8) -> u8 {
    let missing = 255 - i32::from(level);
    let alpha = (missing * i32::from(MAX_DARKNESS_ALPHA) / 255).clamp(0, i32::from(MAX_DARKNESS_ALPHA));
    alpha as u8
}
