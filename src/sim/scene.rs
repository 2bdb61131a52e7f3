//! Synthetic scene for ray queries
//!
//! A flat list of static colliders (boxes, circles, wall segments) that
//! answers [`RayCaster`] queries exactly. Used by the demo and by tests in
//! place of the engine's physics world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ray::{ColliderId, RayCaster, RayHit};

/// Below this a direction component counts as parallel to an axis
const PARALLEL_EPSILON: f32 = 1e-9;

/// Collider geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box
    Aabb { min: Vec2, max: Vec2 },
    /// Solid circle
    Circle { center: Vec2, radius: f32 },
    /// Two-sided line segment (edge collider)
    Segment { a: Vec2, b: Vec2 },
}

impl Shape {
    /// Lowest y of the shape's bounding box
    pub fn min_y(&self) -> f32 {
        match *self {
            Shape::Aabb { min, .. } => min.y,
            Shape::Circle { center, radius } => center.y - radius,
            Shape::Segment { a, b } => a.y.min(b.y),
        }
    }

    /// First intersection of a ray with this shape as `(distance, normal)`
    ///
    /// `dir` must be normalized. A ray that starts inside a solid shape hits
    /// at distance zero with the normal facing back along the ray.
    pub fn raycast(&self, origin: Vec2, dir: Vec2) -> Option<(f32, Vec2)> {
        match *self {
            Shape::Aabb { min, max } => ray_aabb(origin, dir, min, max),
            Shape::Circle { center, radius } => ray_circle(origin, dir, center, radius),
            Shape::Segment { a, b } => ray_segment(origin, dir, a, b),
        }
    }
}

fn ray_aabb(origin: Vec2, dir: Vec2, min: Vec2, max: Vec2) -> Option<(f32, Vec2)> {
    let inside = origin.x >= min.x && origin.x <= max.x && origin.y >= min.y && origin.y <= max.y;
    if inside {
        return Some((0.0, -dir));
    }

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            normal = Vec2::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(far);
    }

    if t_exit < t_enter || t_exit < 0.0 {
        return None;
    }
    Some((t_enter.max(0.0), normal))
}

fn ray_circle(origin: Vec2, dir: Vec2, center: Vec2, radius: f32) -> Option<(f32, Vec2)> {
    let f = origin - center;
    if f.length_squared() <= radius * radius {
        return Some((0.0, -dir));
    }
    let b = f.dot(dir);
    let c = f.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t < 0.0 {
        return None;
    }
    let point = origin + dir * t;
    Some((t, (point - center) / radius))
}

fn ray_segment(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<(f32, Vec2)> {
    let edge = b - a;
    let denom = dir.perp_dot(edge);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let to_a = a - origin;
    let t = to_a.perp_dot(edge) / denom;
    let u = to_a.perp_dot(dir) / denom;
    if t < 0.0 || !(0.0..=1.0).contains(&u) {
        return None;
    }
    let mut normal = Vec2::new(-edge.y, edge.x).normalize_or_zero();
    if normal.dot(dir) > 0.0 {
        normal = -normal;
    }
    Some((t, normal))
}

/// What a collider represents in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColliderKind {
    /// The player's projectile
    Rock,
    /// Side wall the rock bounces off
    Wall,
    /// Target descending toward the finish line
    Caterpillar,
    #[default]
    Obstacle,
}

/// A collider registered in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collider {
    pub id: ColliderId,
    pub kind: ColliderKind,
    pub shape: Shape,
}

/// Static collider set that answers ray queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with the two side walls fitted to the screen
    ///
    /// Walls are vertical edges at `x = ±half_width` spanning the full
    /// screen height.
    pub fn with_side_walls(half_width: f32, half_height: f32) -> Self {
        let mut scene = Self::new();
        scene.add_side_walls(half_width, half_height);
        scene
    }

    /// Add left and right walls; returns `(left, right)`
    pub fn add_side_walls(&mut self, half_width: f32, half_height: f32) -> (ColliderId, ColliderId) {
        let left = self.add(
            ColliderKind::Wall,
            Shape::Segment {
                a: Vec2::new(-half_width, half_height),
                b: Vec2::new(-half_width, -half_height),
            },
        );
        let right = self.add(
            ColliderKind::Wall,
            Shape::Segment {
                a: Vec2::new(half_width, half_height),
                b: Vec2::new(half_width, -half_height),
            },
        );
        (left, right)
    }

    /// Register a collider and return its handle
    pub fn add(&mut self, kind: ColliderKind, shape: Shape) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider { id, kind, shape });
        id
    }

    pub fn add_rock(&mut self, center: Vec2, radius: f32) -> ColliderId {
        self.add(ColliderKind::Rock, Shape::Circle { center, radius })
    }

    pub fn add_caterpillar(&mut self, min: Vec2, max: Vec2) -> ColliderId {
        self.add(ColliderKind::Caterpillar, Shape::Aabb { min, max })
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Mutable access to a collider's shape (e.g. to follow the dragged rock)
    pub fn shape_mut(&mut self, id: ColliderId) -> Option<&mut Shape> {
        self.colliders.iter_mut().find(|c| c.id == id).map(|c| &mut c.shape)
    }
}

impl RayCaster for Scene {
    fn cast_all(&self, origin: Vec2, direction: Vec2) -> Vec<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return Vec::new();
        }

        let mut hits: Vec<RayHit> = self
            .colliders
            .iter()
            .filter_map(|c| {
                let (distance, normal) = c.shape.raycast(origin, dir)?;
                Some(RayHit {
                    point: origin + dir * distance,
                    normal,
                    collider: c.id,
                    bounds_min_y: c.shape.min_y(),
                    distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
