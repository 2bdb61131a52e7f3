//! Ray query boundary
//!
//! The pointer never talks to a physics engine directly. Everything it knows
//! about the scene comes through [`RayCaster::cast_all`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque collider handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// One ray-vs-collider intersection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Contact point in world space
    pub point: Vec2,
    /// Surface normal at the contact (facing the ray)
    pub normal: Vec2,
    /// Collider that was hit
    pub collider: ColliderId,
    /// Lowest y of the collider's axis-aligned bounds
    pub bounds_min_y: f32,
    /// Distance from the ray origin, in units of the normalized direction
    pub distance: f32,
}

/// Scene query capability: every intersection along an unbounded ray
pub trait RayCaster {
    /// All hits along `origin + t * direction` for `t >= 0`, one per collider,
    /// sorted by ascending distance. Empty when nothing is intersected.
    ///
    /// `RayHit::distance` is measured along the normalized direction, so hits
    /// from parallel rays can be compared with each other.
    fn cast_all(&self, origin: Vec2, direction: Vec2) -> Vec<RayHit>;
}

impl<T: RayCaster + ?Sized> RayCaster for &T {
    fn cast_all(&self, origin: Vec2, direction: Vec2) -> Vec<RayHit> {
        (**self).cast_all(origin, direction)
    }
}

/// Cast and drop every hit on `skip`
pub fn cast_excluding<C: RayCaster + ?Sized>(
    caster: &C,
    origin: Vec2,
    direction: Vec2,
    skip: Option<ColliderId>,
) -> Vec<RayHit> {
    let mut hits = caster.cast_all(origin, direction);
    if let Some(skip) = skip {
        hits.retain(|h| h.collider != skip);
    }
    hits
}
