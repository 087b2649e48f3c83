//! Conversions between screen space and world space.
//!
//! A [`ViewTransform`] is the offset and scale of the world layer on screen.
//! World space here is in pixels; divide by the cell pixel size to get cells.

use tracing::trace;

use crate::{pos, ChunkPos, Pos, Vec2, CHUNK_SIZE};

/// zooming out stops at this scale.
pub const MIN_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub offset: Vec2,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::default(),
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset
    }

    /// cell under a screen point.
    pub fn cell_at_screen(&self, screen: Vec2, cell_pixel_size: f64) -> Pos {
        (self.screen_to_world(screen) / cell_pixel_size).floor()
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset = self.offset + delta;
    }

    /// Zooms by `1 - wheel_delta / 1000`, keeping the world point under
    /// `anchor` in place. Returns false when the zoom would drop below
    /// [`MIN_SCALE`], in which case the scale is clamped and the offset kept.
    pub fn zoom_at(&mut self, anchor: Vec2, wheel_delta: f64) -> bool {
        let before = self.screen_to_world(anchor);
        self.scale *= 1.0 - wheel_delta / 1000.0;
        if self.scale < MIN_SCALE {
            self.scale = MIN_SCALE;
            return false;
        }
        let after = self.screen_to_world(anchor);
        self.pan((after - before) * self.scale);
        trace!(scale = self.scale, offset = %self.offset, "zoomed");
        true
    }

    /// Inclusive range of chunks overlapping a `screen_size` viewport.
    pub fn visible_chunks(&self, screen_size: Vec2, cell_pixel_size: f64) -> ChunkRange {
        let chunk_pixels = CHUNK_SIZE as f64 * cell_pixel_size;
        let min = self.screen_to_world(Vec2::default()) / chunk_pixels;
        let max = self.screen_to_world(screen_size) / chunk_pixels;
        ChunkRange {
            min: min.floor(),
            max: max.ceil(),
        }
    }
}

/// rectangle of chunk positions, both corners included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub min: Pos,
    pub max: Pos,
}

impl ChunkRange {
    pub fn iter(self) -> impl Iterator<Item = ChunkPos> {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| ChunkPos(pos!(x, y))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(x: f64, y: f64, scale: f64) -> ViewTransform {
        ViewTransform {
            offset: Vec2::new(x, y),
            scale,
        }
    }

    #[test]
    fn screen_world_round_trip() {
        let view = transform(30.0, -12.0, 2.5);
        let screen = Vec2::new(130.0, 88.0);
        let world = view.screen_to_world(screen);
        assert_eq!(world, Vec2::new(40.0, 40.0));
        assert_eq!(view.world_to_screen(world), screen);
    }

    #[test]
    fn cell_at_screen_floors_negative() {
        let view = transform(100.0, 100.0, 1.0);
        assert_eq!(view.cell_at_screen(Vec2::new(99.0, 100.0), 20.0), pos!(-1, 0));
        assert_eq!(view.cell_at_screen(Vec2::new(140.0, 139.0), 20.0), pos!(2, 1));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut view = transform(10.0, 20.0, 1.0);
        let anchor = Vec2::new(200.0, 100.0);
        let before = view.screen_to_world(anchor);

        assert!(view.zoom_at(anchor, -500.0));
        assert_eq!(view.scale, 1.5);
        let after = view.screen_to_world(anchor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_clamps_at_min_scale() {
        let mut view = transform(5.0, 5.0, 0.2);
        assert!(!view.zoom_at(Vec2::new(50.0, 50.0), 800.0));
        assert_eq!(view.scale, MIN_SCALE);
        assert_eq!(view.offset, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn visible_chunks_cover_viewport() {
        let view = transform(-64.0, 10.0, 1.0);
        let range = view.visible_chunks(Vec2::new(100.0, 50.0), 1.0);
        assert_eq!(
            range,
            ChunkRange {
                min: pos!(1, -1),
                max: pos!(3, 1),
            }
        );
        assert_eq!(range.iter().count(), 9);
        assert_eq!(range.iter().next(), Some(ChunkPos(pos!(1, -1))));
    }
}
