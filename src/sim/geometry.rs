//! Reflection and thickness geometry for the pointer
//!
//! The rendered pointer follows the rock's center, but what touches a wall is
//! the rock's edge. These helpers turn raw ray contacts into rock positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NORMAL_EPSILON;

/// Which velocity component a surface flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReflectionAxis {
    /// Vertical wall: horizontal velocity flips
    X,
    /// Horizontal or angled surface: vertical velocity flips
    Y,
}

impl ReflectionAxis {
    /// Axis for a surface normal. Only a normal with no y component is a wall.
    #[inline]
    pub fn from_normal(normal: Vec2) -> Self {
        if normal.y.abs() <= NORMAL_EPSILON {
            ReflectionAxis::X
        } else {
            ReflectionAxis::Y
        }
    }

    /// Flip the matching component of `dir`
    #[inline]
    pub fn reflect(self, dir: Vec2) -> Vec2 {
        match self {
            ReflectionAxis::X => Vec2::new(-dir.x, dir.y),
            ReflectionAxis::Y => Vec2::new(dir.x, -dir.y),
        }
    }

    #[inline]
    fn component(self, v: Vec2) -> f32 {
        match self {
            ReflectionAxis::X => v.x,
            ReflectionAxis::Y => v.y,
        }
    }
}

/// Distance from the rock's center to the edge rays, split into axes
///
/// `(radius * sin, radius * cos)` of the travel angle, both non-negative.
#[inline]
pub fn ray_offsets(dir: Vec2, radius: f32) -> Vec2 {
    let len = dir.length();
    if len <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let sin = dir.y.abs() / len;
    let cos = dir.x.abs() / len;
    Vec2::new(radius * sin, radius * cos)
}

/// Origins of the `(top, bottom)` edge rays for a rock centered at `center`
///
/// Both sit on the rock's rim perpendicular to travel; "top" is the one on
/// the upper side of the path.
pub fn edge_ray_origins(center: Vec2, dir: Vec2, radius: f32) -> (Vec2, Vec2) {
    let offsets = ray_offsets(dir, radius);
    let sx = if dir.x > 0.0 { -dir.y.signum() } else { dir.y.signum() };
    let perp = Vec2::new(sx * offsets.x, offsets.y);
    (center + perp, center - perp)
}

/// Shift from a ray contact point back to the rock's center at contact
///
/// The rock touches the surface when its center is `radius` short of it
/// along `axis`; the other component follows the travel slope (`radius * tan`).
/// Returns zero when the ray runs parallel to the surface.
#[inline]
pub fn contact_offset(dir: Vec2, axis: ReflectionAxis, radius: f32) -> Vec2 {
    let along = axis.component(dir).abs();
    if along <= f32::EPSILON {
        return Vec2::ZERO;
    }
    -dir * (radius / along)
}
