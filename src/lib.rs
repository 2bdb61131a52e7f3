//! Rock Sling - slingshot arcade game, trajectory pointer core
//!
//! Core modules:
//! - `sim`: Deterministic pointer prediction (ray queries, reflections, shortening)
//! - `renderer`: Polyline renderer boundary and dash animation parameters
//! - `pointer`: Per-tick driver that feeds the predicted path to a renderer
//! - `settings`: Data-driven pointer and screen configuration

pub mod pointer;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use pointer::Pointer;
pub use settings::{ScreenBounds, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Rock collider radius in world units
    pub const ROCK_RADIUS: f32 = 0.25;
    /// Spring anchor the rock is dragged back from
    pub const ANCHOR_X: f32 = 0.0;
    pub const ANCHOR_Y: f32 = -3.0;

    /// Play area half extents (walls sit at ±SCREEN_HALF_WIDTH)
    pub const SCREEN_HALF_WIDTH: f32 = 2.8;
    pub const SCREEN_HALF_HEIGHT: f32 = 5.0;

    /// Caterpillars crossing this line are out of reach
    pub const FINISH_LINE: f32 = -1.5;

    /// Shots after which the pointer has fully shrunk away
    pub const SHOTS_WITH_POINTER: u32 = 5;

    /// Cap on wall reflections per prediction (guards cyclic geometry)
    pub const MAX_REFLECTIONS: usize = 64;

    /// Normals with |y| below this count as vertical walls
    pub const NORMAL_EPSILON: f32 = 1e-6;
}

/// X coordinate where the line through `point` along `dir` crosses `y`
///
/// Uses the two-point form `x = (y - c) / m`. A vertical line (`dir.x == 0`)
/// crosses every `y` at `point.x`; a horizontal line has no unique crossing, so
/// `point.x` is returned there as well.
#[inline]
pub fn line_x_at(point: Vec2, dir: Vec2, y: f32) -> f32 {
    let p2 = point + dir;
    let dx = p2.x - point.x;
    let dy = p2.y - point.y;
    if dx.abs() <= f32::EPSILON || dy.abs() <= f32::EPSILON {
        return point.x;
    }
    let m = dy / dx;
    let c = point.y - m * point.x;
    (y - c) / m
}

/// Total length of a polyline
#[inline]
pub fn path_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
