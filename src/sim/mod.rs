//! Deterministic pointer simulation
//!
//! All trajectory logic lives here. This module must be pure and deterministic:
//! - Scene access only through `RayCaster`
//! - No state kept between predictions
//! - No rendering or platform dependencies

pub mod geometry;
pub mod predictor;
pub mod ray;
pub mod scene;
pub mod shorten;

#[cfg(test)]
mod proptest_pointer;

pub use geometry::{ReflectionAxis, contact_offset, edge_ray_origins, ray_offsets};
pub use predictor::{PointerPath, PointerRequest, compute_pointer};
pub use ray::{ColliderId, RayCaster, RayHit, cast_excluding};
pub use scene::{Collider, ColliderKind, Scene, Shape};
pub use shorten::{cutoff_y, shorten};
