//! # Camera and Visibility
//!
//! The camera decides which tiles are on screen. The light grid and the tile
//! renderer share [`Camera2D::visible_tiles`], each with its own margin.

use delve_core::Vec2;
use delve_procedural::PixelRect;

/// Zoom multiplier per wheel step.
pub const ZOOM_STEP: f32 = 1.15;

/// Inclusive rectangle of world tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileRect {
    /// Leftmost column.
    pub x0: i32,
    /// Top row.
    pub y0: i32,
    /// Rightmost column (inclusive).
    pub x1: i32,
    /// Bottom row (inclusive).
    pub y1: i32,
}

impl TileRect {
    /// Creates a rectangle from inclusive bounds.
    #[inline]
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Columns covered. Zero or negative when empty.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    /// Rows covered. Zero or negative when empty.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    /// Returns true if the rectangle covers no tile.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Number of tiles covered.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    /// Returns true if the tile lies inside.
    #[inline]
    #[must_use]
    pub const fn contains(&self, tile_x: i32, tile_y: i32) -> bool {
        tile_x >= self.x0 && tile_x <= self.x1 && tile_y >= self.y0 && tile_y <= self.y1
    }

    /// Grows the rectangle by `margin` tiles on every side.
    #[inline]
    #[must_use]
    pub const fn expand(&self, margin: i32) -> Self {
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }

    /// Tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }
}

/// 2D camera: world position at the screen center, zoom, and viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    /// World pixel shown at the viewport center.
    pub pos: Vec2,
    /// Screen pixels per world pixel.
    pub zoom: f32,
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl Camera2D {
    /// Creates a camera at `pos` with zoom 1.
    #[must_use]
    pub fn new(pos: Vec2, viewport: Vec2) -> Self {
        Self {
            pos,
            zoom: 1.0,
            viewport,
        }
    }

    /// Zoom used for projection. A zero zoom is treated as 1.
    #[inline]
    fn effective_zoom(&self) -> f32 {
        if self.zoom == 0.0 {
            1.0
        } else {
            self.zoom
        }
    }

    /// World pixel rectangle covered by the viewport.
    #[must_use]
    pub fn view_bounds_px(&self) -> PixelRect {
        let inv_zoom = 1.0 / self.effective_zoom();
        let half_w = self.viewport.x * 0.5 * inv_zoom;
        let half_h = self.viewport.y * 0.5 * inv_zoom;
        PixelRect {
            left: self.pos.x - half_w,
            top: self.pos.y - half_h,
            right: self.pos.x + half_w,
            bottom: self.pos.y + half_h,
        }
    }

    /// Tiles touched by the view, grown by `margin` tiles on each side.
    #[must_use]
    pub fn visible_tiles(&self, tile_px: i32, margin: i32) -> TileRect {
        let bounds = self.view_bounds_px();
        let size = tile_px as f32;
        TileRect {
            x0: (bounds.left / size).floor() as i32,
            y0: (bounds.top / size).floor() as i32,
            x1: (bounds.right / size).floor() as i32,
            y1: (bounds.bottom / size).floor() as i32,
        }
        .expand(margin)
    }

    /// Projects a world pixel position to screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.pos) * self.effective_zoom() + self.viewport * 0.5
    }

    /// Inverse of [`Camera2D::world_to_screen`].
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport * 0.5) * (1.0 / self.effective_zoom()) + self.pos
    }

    /// Moves toward `target` with exponential smoothing at `rate` per second.
    pub fn follow(&mut self, target: Vec2, rate: f32, dt: f32) {
        let t = 1.0 - (-rate * dt).exp();
        self.pos = self.pos.lerp(target, t);
    }

    /// Applies mouse-wheel steps (`ZOOM_STEP` each) and clamps to `[min, max]`.
    pub fn apply_zoom_steps(&mut self, steps: f32, min: f32, max: f32) {
        self.zoom = (self.zoom * ZOOM_STEP.powf(steps)).clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        Camera2D::new(Vec2::new(0.0, 150.0), Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_visible_tiles_with_margins() {
        let cam = camera();
        // Pixel view: x in [-640, 640], y in [-210, 510]
        let exact = cam.visible_tiles(32, 0);
        assert_eq!(exact, TileRect::new(-20, -7, 20, 15));

        let lit = cam.visible_tiles(32, 4);
        assert_eq!(lit, TileRect::new(-24, -11, 24, 19));
        assert_eq!(lit.width(), 49);
        assert_eq!(lit.height(), 31);
        assert_eq!(cam.visible_tiles(32, 2), exact.expand(2));
    }

    #[test]
    fn test_zero_zoom_treated_as_one() {
        let mut cam = camera();
        let normal = cam.visible_tiles(32, 0);
        cam.zoom = 0.0;
        assert_eq!(cam.visible_tiles(32, 0), normal);
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let mut cam = camera();
        cam.zoom = 2.0;
        let center = cam.world_to_screen(cam.pos);
        assert_eq!(center, Vec2::new(640.0, 360.0));

        let world = Vec2::new(37.5, -12.25);
        let back = cam.screen_to_world(cam.world_to_screen(world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn test_follow_converges() {
        let mut cam = camera();
        let target = Vec2::new(100.0, 0.0);
        for _ in 0..600 {
            cam.follow(target, 6.0, 1.0 / 60.0);
        }
        assert!((cam.pos - target).length() < 0.01);

        let before = cam.pos;
        cam.follow(Vec2::new(500.0, 500.0), 6.0, 0.0);
        assert_eq!(cam.pos, before, "zero dt does not move");
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = camera();
        cam.apply_zoom_steps(1.0, 0.35, 4.0);
        assert!((cam.zoom - 1.15).abs() < 1e-6);
        cam.apply_zoom_steps(100.0, 0.35, 4.0);
        assert!((cam.zoom - 4.0).abs() < f32::EPSILON);
        cam.apply_zoom_steps(-100.0, 0.35, 4.0);
        assert!((cam.zoom - 0.35).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tile_rect_queries() {
        let rect = TileRect::new(-1, -1, 1, 0);
        assert_eq!(rect.area(), 6);
        assert!(rect.contains(-1, 0));
        assert!(!rect.contains(2, 0));
        assert_eq!(rect.iter().count(), 6);
        assert_eq!(rect.iter().next(), Some((-1, -1)));

        let empty = TileRect::new(3, 0, 2, 5);
        assert!(empty.is_empty());
        assert_eq!(empty.area(), 0);
        assert_eq!(empty.iter().count(), 0);
    }
}
