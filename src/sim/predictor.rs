//! Trajectory pointer prediction
//!
//! Predicts the rock's path from the slingshot by casting three parallel rays
//! (center plus the rock's two edges), bouncing off vertical walls and
//! offsetting every contact by the rock's radius. The path stops when:
//! - nothing is left to hit (it exits the top/bottom of the screen), or
//! - the rock would be sent back vertically or clip an obstacle with its
//!   edge, which means the shot fails.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{ReflectionAxis, contact_offset, edge_ray_origins};
use super::ray::{ColliderId, RayCaster, RayHit, cast_excluding};
use crate::consts::MAX_REFLECTIONS;
use crate::line_x_at;

/// Inputs for one prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerRequest {
    /// Current (dragged) rock position
    pub origin: Vec2,
    /// Spring anchor; the shot travels along `anchor - origin`
    pub anchor: Vec2,
    /// Rock radius (> 0)
    pub radius: f32,
    /// Exit height for upward shots
    pub screen_top: f32,
    /// Exit height for downward shots
    pub screen_bottom: f32,
    /// Wall reflections allowed before the path is cut off
    pub max_reflections: usize,
}

impl PointerRequest {
    pub fn new(origin: Vec2, anchor: Vec2, radius: f32, screen_top: f32, screen_bottom: f32) -> Self {
        Self {
            origin,
            anchor,
            radius,
            screen_top,
            screen_bottom,
            max_reflections: MAX_REFLECTIONS,
        }
    }

    pub fn with_max_reflections(mut self, max_reflections: usize) -> Self {
        self.max_reflections = max_reflections;
        self
    }
}

/// Predicted pointer polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerPath {
    /// Rock positions in travel order, starting at the rock itself
    pub vertices: Vec<Vec2>,
    /// Still bouncing cleanly between walls at the end (a good shot)
    pub horizontal_reflection: bool,
    /// Wall reflections followed
    pub reflections: usize,
    /// Screen exit point, present only for good shots
    pub exit: Option<Vec2>,
}

impl PointerPath {
    fn degenerate(origin: Vec2) -> Self {
        Self {
            vertices: vec![origin],
            horizontal_reflection: false,
            reflections: 0,
            exit: None,
        }
    }

    /// True when the shot leaves the screen instead of failing
    pub fn is_clear_shot(&self) -> bool {
        self.horizontal_reflection
    }
}

/// Per-call working state
#[derive(Debug)]
struct PathState {
    ray_direction: Vec2,
    horizontal_reflection: bool,
    vertices: Vec<Vec2>,
    last_point: Vec2,
    axis: ReflectionAxis,
    reflections: usize,
}

impl PathState {
    fn new(ray_direction: Vec2, first: Vec2) -> Self {
        Self {
            ray_direction,
            horizontal_reflection: true,
            vertices: vec![first],
            last_point: first,
            axis: ReflectionAxis::X,
            reflections: 0,
        }
    }

    fn push(&mut self, point: Vec2) {
        self.vertices.push(point);
        self.last_point = point;
    }

    /// One-way: once terminated, a path never resumes
    fn terminate(&mut self) {
        self.horizontal_reflection = false;
    }

    fn into_path(self, exit: Option<Vec2>) -> PointerPath {
        PointerPath {
            vertices: self.vertices,
            horizontal_reflection: self.horizontal_reflection,
            reflections: self.reflections,
            exit,
        }
    }
}

/// Outcome of resolving one ray fan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Nothing ahead
    Clear,
    /// Center ray hit something; a vertex was added
    Hit,
    /// An edge ray caught an obstacle first; path ended
    Blocked,
}

/// The three rays cast from one rock position
struct RayFan {
    center: Vec<RayHit>,
    top: Vec<RayHit>,
    bottom: Vec<RayHit>,
}

impl RayFan {
    fn cast<C: RayCaster + ?Sized>(
        caster: &C,
        center: Vec2,
        dir: Vec2,
        radius: f32,
        skip: Option<ColliderId>,
    ) -> Self {
        let (top, bottom) = edge_ray_origins(center, dir, radius);
        Self {
            center: cast_excluding(caster, center, dir, skip),
            top: cast_excluding(caster, top, dir, skip),
            bottom: cast_excluding(caster, bottom, dir, skip),
        }
    }
}

/// Compute the pointer for the current aim
///
/// The first center-ray hit is taken to be the rock itself; its collider is
/// ignored by every later ray. An empty first query, or an aim of zero
/// length, yields the one-point path `[origin]`.
pub fn compute_pointer<C: RayCaster + ?Sized>(caster: &C, request: &PointerRequest) -> PointerPath {
    let d0 = request.anchor - request.origin;
    if d0.length_squared() <= f32::EPSILON {
        log::debug!("pointer: zero-length aim at {:?}", request.origin);
        return PointerPath::degenerate(request.origin);
    }

    let center = caster.cast_all(request.origin, d0);
    let Some(own) = center.first().copied() else {
        log::debug!("pointer: no hits from {:?}", request.origin);
        return PointerPath::degenerate(request.origin);
    };
    let rock = own.collider;

    let mut state = PathState::new(d0, own.point);

    // Edge rays may or may not see the rock, so it is always dropped
    let (top_origin, bottom_origin) = edge_ray_origins(request.origin, d0, request.radius);
    let top = cast_excluding(caster, top_origin, d0, Some(rock));
    let bottom = cast_excluding(caster, bottom_origin, d0, Some(rock));
    let next = center.iter().skip(1).find(|h| h.collider != rock);

    let first = advance(
        &mut state,
        next,
        top.first(),
        bottom.first(),
        request.origin,
        request.radius,
    );

    if first == Step::Hit {
        while state.horizontal_reflection {
            if state.reflections >= request.max_reflections {
                log::warn!(
                    "pointer: reflection cap ({}) reached at {:?}",
                    request.max_reflections,
                    state.last_point
                );
                state.terminate();
                break;
            }

            state.ray_direction = state.axis.reflect(state.ray_direction);
            state.reflections += 1;
            log::trace!(
                "pointer: reflection {} from {:?} toward {:?}",
                state.reflections,
                state.last_point,
                state.ray_direction
            );

            let from = state.last_point;
            let fan = RayFan::cast(caster, from, state.ray_direction, request.radius, Some(rock));
            let step = advance(
                &mut state,
                fan.center.first(),
                fan.top.first(),
                fan.bottom.first(),
                from,
                request.radius,
            );
            if step == Step::Clear {
                break;
            }
        }
    }

    let exit = if state.horizontal_reflection {
        let y = if state.ray_direction.y < 0.0 {
            request.screen_bottom
        } else {
            request.screen_top
        };
        let point = Vec2::new(line_x_at(state.last_point, state.ray_direction, y), y);
        state.push(point);
        Some(point)
    } else {
        None
    };

    log::debug!(
        "pointer: {} vertices, {} reflections, clear={}",
        state.vertices.len(),
        state.reflections,
        state.horizontal_reflection
    );
    state.into_path(exit)
}

/// Resolve one fan: edge collision first, then the center contact
fn advance(
    state: &mut PathState,
    next: Option<&RayHit>,
    top: Option<&RayHit>,
    bottom: Option<&RayHit>,
    from: Vec2,
    radius: f32,
) -> Step {
    if let Some(edge) = premature_edge_hit(next, top, bottom) {
        end_at_edge(state, &edge, from, radius);
        return Step::Blocked;
    }

    let Some(hit) = next else {
        return Step::Clear;
    };

    let axis = ReflectionAxis::from_normal(hit.normal);
    let point = hit.point + contact_offset(state.ray_direction, axis, radius);
    state.push(point);
    state.axis = axis;

    if point.y < hit.bounds_min_y {
        // Rock's center passes below the collider: it clips the corner
        state.terminate();
    } else if axis == ReflectionAxis::Y {
        // Floor, ceiling or slope: the shot turns back vertically
        state.terminate();
    }
    Step::Hit
}

/// Edge-ray hit the rock meets before the center ray's target, if any
///
/// Only colliders other than the center target count. With no center target
/// any edge hit counts. The three rays run parallel, so hit distances order
/// contacts along the direction of travel and the soonest one wins.
fn premature_edge_hit(next: Option<&RayHit>, top: Option<&RayHit>, bottom: Option<&RayHit>) -> Option<RayHit> {
    [top, bottom]
        .into_iter()
        .flatten()
        .filter(|edge| match next {
            None => true,
            Some(c) => edge.collider != c.collider && edge.distance < c.distance,
        })
        .fold(None, |best: Option<&RayHit>, edge| match best {
            Some(b) if b.distance <= edge.distance => Some(b),
            _ => Some(edge),
        })
        .copied()
}

/// Stop the path where the rock's edge meets `edge`
///
/// The rock's center is placed on the center line at the edge hit's travel
/// distance, backed off by one radius and never behind `from`.
fn end_at_edge(state: &mut PathState, edge: &RayHit, from: Vec2, radius: f32) {
    let dir = state.ray_direction.normalize_or_zero();
    let travel = (edge.distance - radius).max(0.0);
    let point = from + dir * travel;
    log::trace!("pointer: edge ray blocked by {:?} at {:?}", edge.collider, edge.point);
    state.push(point);
    state.terminate();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::{ColliderKind, Scene, Shape};
    use std::cell::RefCell;

    const R: f32 = 0.5;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn scene_with_rock(origin: Vec2) -> Scene {
        let mut scene = Scene::new();
        scene.add_rock(origin, R);
        scene
    }

    fn request(origin: Vec2, dir: Vec2) -> PointerRequest {
        PointerRequest::new(origin, origin + dir, R, 50.0, -50.0)
    }

    #[test]
    fn test_empty_scene_exits_top() {
        let origin = Vec2::new(0.0, -3.0);
        let scene = scene_with_rock(origin);
        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, 2.0)));

        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[0], origin));
        assert!(approx(path.vertices[1], Vec2::new(26.5, 50.0)));
        assert!(path.horizontal_reflection);
        assert_eq!(path.exit, Some(path.vertices[1]));
        assert_eq!(path.reflections, 0);
    }

    #[test]
    fn test_straight_up_exit_keeps_x() {
        let origin = Vec2::new(1.5, 0.0);
        let scene = scene_with_rock(origin);
        let path = compute_pointer(&scene, &request(origin, Vec2::Y));
        assert_eq!(path.vertices, vec![origin, Vec2::new(1.5, 50.0)]);
    }

    #[test]
    fn test_downward_shot_exits_bottom() {
        let origin = Vec2::ZERO;
        let scene = scene_with_rock(origin);
        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, -1.0)));
        let exit = path.exit.expect("clear downward shot has an exit");
        assert!(approx(exit, Vec2::new(50.0, -50.0)));
    }

    #[test]
    fn test_floor_straight_down_terminates() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        scene.add(
            ColliderKind::Obstacle,
            Shape::Aabb {
                min: Vec2::new(-10.0, -11.0),
                max: Vec2::new(10.0, -10.0),
            },
        );

        let path = compute_pointer(&scene, &request(origin, Vec2::new(0.0, -1.0)));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.exit, None);
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(0.0, -9.5)));
    }

    #[test]
    fn test_parallel_walls_zigzag() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);

        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, 1.0)));
        let expected = [
            Vec2::ZERO,
            Vec2::new(9.5, 9.5),
            Vec2::new(-9.5, 28.5),
            Vec2::new(9.5, 47.5),
            Vec2::new(7.0, 50.0),
        ];
        assert_eq!(path.vertices.len(), expected.len());
        for (v, e) in path.vertices.iter().zip(expected) {
            assert!(approx(*v, e), "{v:?} != {e:?}");
            assert!(v.x >= -10.0 && v.x <= 10.0);
        }
        // Consecutive wall contacts alternate sides
        for w in path.vertices[1..4].windows(2) {
            assert!(w[0].x.signum() != w[1].x.signum());
        }
        assert!(path.horizontal_reflection);
        assert_eq!(path.reflections, 3);
    }

    #[test]
    fn test_wall_contact_offset_is_radius_in_x() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        let path = compute_pointer(&scene, &request(origin, Vec2::new(0.3, 1.0)));
        let contact = path.vertices[1];
        assert!(((10.0 - contact.x) - R).abs() < 1e-4);
    }

    #[test]
    fn test_offset_below_collider_bounds_terminates() {
        let origin = Vec2::ZERO;
        let mut scene = scene_with_rock(origin);
        scene.add(
            ColliderKind::Obstacle,
            Shape::Aabb {
                min: Vec2::new(5.0, 4.8),
                max: Vec2::new(6.0, 20.0),
            },
        );

        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, 1.0)));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(4.5, 4.5)));
    }

    #[test]
    fn test_caterpillar_underside_terminates() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        scene.add_caterpillar(Vec2::new(-1.0, 8.0), Vec2::new(1.0, 9.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::Y));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(0.0, 7.5)));
    }

    #[test]
    fn test_edge_ray_catches_obstacle_center_misses() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        scene.add_caterpillar(Vec2::new(0.3, 5.0), Vec2::new(2.0, 6.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::Y));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.exit, None);
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(0.0, 4.5)));
    }

    #[test]
    fn test_lower_edge_hit_wins() {
        let origin = Vec2::ZERO;
        let mut scene = scene_with_rock(origin);
        // Top edge (x = +0.5) meets this one at y = 4
        scene.add_caterpillar(Vec2::new(0.3, 4.0), Vec2::new(2.0, 5.0));
        // Bottom edge (x = -0.5) meets this one at y = 3
        scene.add_caterpillar(Vec2::new(-2.0, 3.0), Vec2::new(-0.3, 4.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::Y));
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(0.0, 2.5)));
    }

    #[test]
    fn test_edge_hit_ahead_of_center_target() {
        let origin = Vec2::ZERO;
        let mut scene = scene_with_rock(origin);
        // Center target, far
        scene.add_caterpillar(Vec2::new(-0.2, 8.0), Vec2::new(0.2, 9.0));
        // Only the top edge sees this one, and sooner
        scene.add_caterpillar(Vec2::new(0.3, 4.0), Vec2::new(2.0, 5.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::Y));
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(0.0, 3.5)));
    }

    #[test]
    fn test_edge_hit_beyond_center_target_ignored() {
        let origin = Vec2::ZERO;
        let mut scene = scene_with_rock(origin);
        // Center target, near
        scene.add_caterpillar(Vec2::new(-0.2, 3.0), Vec2::new(0.2, 4.0));
        // Only the top edge sees this one, but later
        scene.add_caterpillar(Vec2::new(0.3, 6.0), Vec2::new(2.0, 7.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::Y));
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(0.0, 2.5)));
    }

    #[test]
    fn test_edge_stop_stays_ahead_of_rock_on_shallow_aim() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        // Only the bottom edge ray meets this box, below the rock's center
        scene.add_caterpillar(Vec2::new(3.0, -1.0), Vec2::new(4.0, -0.1));

        let aim = Vec2::new(1.0, 0.1);
        let path = compute_pointer(&scene, &request(origin, aim));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.exit, None);
        assert_eq!(path.vertices.len(), 2);

        let end = path.vertices[1];
        // On the aim line, short of the box, one radius before the edge contact
        assert!(end.perp_dot(aim).abs() < 1e-4);
        assert!(end.x > 0.0 && end.x < 3.0, "{end:?}");
        assert!(approx(end, Vec2::new(2.4526, 0.24526)), "{end:?}");
    }

    #[test]
    fn test_shallow_edge_obstacle_before_wall_blocks() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        // Top edge ray meets the box at y ~ 0.65, above the wall contact's y of 0.5
        scene.add_caterpillar(Vec2::new(3.0, 0.45), Vec2::new(4.0, 2.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, 0.05)));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.reflections, 0);
        assert_eq!(path.vertices.len(), 2);
        assert!(approx(path.vertices[1], Vec2::new(2.5256, 0.12628)), "{:?}", path.vertices[1]);
    }

    #[test]
    fn test_edge_stop_after_reflection_stays_inside_walls() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        // On the way back from the right wall only the top edge meets this
        scene.add_caterpillar(Vec2::new(-4.0, 1.4), Vec2::new(-3.0, 3.0));

        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, 0.05)));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.reflections, 1);
        assert_eq!(path.vertices.len(), 3);
        assert!(approx(path.vertices[1], Vec2::new(9.5, 0.475)));

        let end = path.vertices[2];
        assert!(end.x > -3.0 && end.x < 9.5, "{end:?}");
        assert!(approx(end, Vec2::new(-2.5257, 1.0763)), "{end:?}");
        for v in &path.vertices {
            assert!(v.x >= -10.0 && v.x <= 10.0, "{v:?}");
        }
    }

    #[test]
    fn test_same_collider_on_edge_not_premature() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 50.0);
        scene.add_rock(origin, R);
        // Bottom edge ray meets the right wall lower than the center ray does
        let path = compute_pointer(&scene, &request(origin, Vec2::new(1.0, 1.0)));
        assert!(path.horizontal_reflection);
        assert!(path.vertices.len() > 2);
    }

    #[test]
    fn test_reflection_cap_terminates() {
        let origin = Vec2::ZERO;
        let mut scene = Scene::with_side_walls(10.0, 10_000.0);
        scene.add_rock(origin, R);

        let req = request(origin, Vec2::new(1.0, 1.0)).with_max_reflections(3);
        let path = compute_pointer(&scene, &req);
        assert!(!path.horizontal_reflection);
        assert_eq!(path.reflections, 3);
        assert_eq!(path.vertices.len(), 5);
        assert_eq!(path.exit, None);
    }

    #[test]
    fn test_zero_aim_is_degenerate() {
        let origin = Vec2::new(1.0, 1.0);
        let scene = scene_with_rock(origin);
        let path = compute_pointer(&scene, &PointerRequest::new(origin, origin, R, 5.0, -5.0));
        assert_eq!(path.vertices, vec![origin]);
        assert!(!path.is_clear_shot());
    }

    /// Scripted caster: returns queued results in order, then nothing
    struct Scripted {
        calls: RefCell<Vec<Vec<RayHit>>>,
    }

    impl Scripted {
        fn new(mut script: Vec<Vec<RayHit>>) -> Self {
            script.reverse();
            Self {
                calls: RefCell::new(script),
            }
        }
    }

    impl RayCaster for Scripted {
        fn cast_all(&self, _origin: Vec2, _direction: Vec2) -> Vec<RayHit> {
            self.calls.borrow_mut().pop().unwrap_or_default()
        }
    }

    #[test]
    fn test_empty_first_query_is_degenerate() {
        let caster = Scripted::new(vec![]);
        let origin = Vec2::new(0.0, -2.0);
        let path = compute_pointer(&caster, &request(origin, Vec2::Y));
        assert_eq!(path.vertices, vec![origin]);
        assert_eq!(path.exit, None);
    }

    fn hit(x: f32, y: f32, normal: Vec2, id: u32, distance: f32) -> RayHit {
        RayHit {
            point: Vec2::new(x, y),
            normal,
            collider: ColliderId(id),
            bounds_min_y: -50.0,
            distance,
        }
    }

    #[test]
    fn test_terminated_path_never_resumes() {
        let own = hit(0.0, 0.0, Vec2::ZERO, 0, 0.0);
        let right_wall = hit(10.0, 10.0, Vec2::NEG_X, 1, 14.142);
        let left_wall = hit(-10.0, 29.5, Vec2::X, 2, 27.577);
        let blocker = hit(0.0, 19.0, Vec2::NEG_Y, 3, 5.0);
        let caster = Scripted::new(vec![
            // Initial fan: center, top, bottom
            vec![own, right_wall],
            vec![],
            vec![],
            // After the first reflection the top edge is blocked
            vec![left_wall],
            vec![blocker],
            vec![],
            // Would let the path carry on if it were ever cast
            vec![right_wall],
        ]);

        let path = compute_pointer(&caster, &request(Vec2::ZERO, Vec2::new(1.0, 1.0)));
        assert!(!path.horizontal_reflection);
        assert_eq!(path.exit, None);
        assert_eq!(path.reflections, 1);
        assert_eq!(path.vertices.len(), 3);
        assert!(approx(path.vertices[1], Vec2::new(9.5, 9.5)));
        // 4.5 along (-1, 1) from the wall contact
        assert!(approx(path.vertices[2], Vec2::new(6.318, 12.682)));
        assert_eq!(caster.calls.borrow().len(), 1);
    }

    #[test]
    fn test_first_vertex_is_first_hit() {
        let own = RayHit {
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            collider: ColliderId(0),
            bounds_min_y: 0.0,
            distance: 0.0,
        };
        // Center, top, bottom for the initial fan
        let caster = Scripted::new(vec![vec![own], vec![own], vec![]]);
        let path = compute_pointer(&caster, &request(Vec2::new(0.0, 0.1), Vec2::Y));
        assert_eq!(path.vertices[0], Vec2::ZERO);
        assert!(path.horizontal_reflection);
        assert_eq!(path.vertices.len(), 2);
    }
}
