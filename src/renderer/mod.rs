//! Pointer rendering boundary
//!
//! The game draws the pointer as a scrolling dashed line. The core only hands
//! over points plus the two animation knobs; drawing is the engine's job.

pub mod shapes;

use glam::Vec2;

pub use shapes::{dashed_segments, line_strip};

/// Surface that draws the pointer polyline
pub trait PathRenderer {
    /// Replace the drawn polyline
    fn set_path(&mut self, points: &[Vec2]);

    /// Scroll the dash texture (negative time moves dashes along the path)
    fn set_animation_offset(&mut self, _offset: f32) {}

    /// Stretch the dash texture to the path length so dashes keep their size
    fn set_tile_scale(&mut self, _length: f32) {}
}

/// Renderer that just keeps the last frame (headless runs, tests)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingRenderer {
    pub points: Vec<Vec2>,
    pub animation_offset: f32,
    pub tile_scale: f32,
    /// Number of `set_path` calls so far
    pub frames: u32,
}

impl PathRenderer for RecordingRenderer {
    fn set_path(&mut self, points: &[Vec2]) {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.frames += 1;
    }

    fn set_animation_offset(&mut self, offset: f32) {
        self.animation_offset = offset;
    }

    fn set_tile_scale(&mut self, length: f32) {
        self.tile_scale = length;
    }
}

impl<R: PathRenderer + ?Sized> PathRenderer for &mut R {
    fn set_path(&mut self, points: &[Vec2]) {
        (**self).set_path(points);
    }

    fn set_animation_offset(&mut self, offset: f32) {
        (**self).set_animation_offset(offset);
    }

    fn set_tile_scale(&mut self, length: f32) {
        (**self).set_tile_scale(length);
    }
}
