//! Property-based tests for pointer prediction using proptest.
//!
//! Scenes are two side walls at x = ±10 spanning the screen, with the rock
//! somewhere between them.

use glam::Vec2;
use proptest::prelude::*;

use super::geometry::{ReflectionAxis, contact_offset};
use super::predictor::{PointerRequest, compute_pointer};
use super::scene::Scene;

const WALL_X: f32 = 10.0;
const TOP: f32 = 50.0;

fn walled_scene(origin: Vec2, radius: f32) -> Scene {
    let mut scene = Scene::with_side_walls(WALL_X, TOP);
    scene.add_rock(origin, radius);
    scene
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Reflecting twice about the same axis restores the direction.
    #[test]
    fn prop_double_reflection_is_identity(x in -100.0f32..100.0, y in -100.0f32..100.0) {
        let d = Vec2::new(x, y);
        for axis in [ReflectionAxis::X, ReflectionAxis::Y] {
            prop_assert_eq!(axis.reflect(axis.reflect(d)), d);
        }
    }

    /// The contact offset moves the rock exactly one radius off the surface.
    #[test]
    fn prop_contact_offset_is_radius_along_axis(
        angle in 0.05f32..(std::f32::consts::PI - 0.05),
        radius in 0.05f32..2.0,
    ) {
        let d = Vec2::new(angle.cos(), angle.sin());
        let off = contact_offset(d, ReflectionAxis::Y, radius);
        prop_assert!((off.y.abs() - radius).abs() < 1e-4);
        if d.x.abs() > 0.05 {
            let off = contact_offset(d, ReflectionAxis::X, radius);
            prop_assert!((off.x.abs() - radius).abs() < 1e-4);
        }
    }

    /// Upward shots between walls stay inside the walls, start at the rock,
    /// and only clear shots carry an exit on the screen top.
    #[test]
    fn prop_walled_shots_stay_inside(
        ox in -5.0f32..5.0,
        oy in -4.0f32..-2.0,
        angle_deg in 20.0f32..160.0,
        radius in 0.1f32..1.0,
    ) {
        let origin = Vec2::new(ox, oy);
        let angle = angle_deg.to_radians();
        let anchor = origin + Vec2::new(angle.cos(), angle.sin());
        let scene = walled_scene(origin, radius);
        let path = compute_pointer(&scene, &PointerRequest::new(origin, anchor, radius, TOP, -TOP));

        prop_assert!(!path.vertices.is_empty());
        prop_assert!((path.vertices[0] - origin).length() < 1e-4);
        for v in &path.vertices {
            prop_assert!(v.x >= -WALL_X - 1e-3 && v.x <= WALL_X + 1e-3, "vertex {:?} outside walls", v);
        }

        if path.horizontal_reflection {
            let exit = path.exit.expect("clear shot has an exit");
            prop_assert_eq!(path.vertices.last().copied(), Some(exit));
            prop_assert!((exit.y - TOP).abs() < 1e-4);
            // Every wall contact sits one radius off the wall, alternating sides
            let contacts = &path.vertices[1..path.vertices.len() - 1];
            prop_assert_eq!(contacts.len(), path.reflections);
            for c in contacts {
                prop_assert!((WALL_X - c.x.abs() - radius).abs() < 1e-3, "contact {:?}", c);
            }
            for w in contacts.windows(2) {
                prop_assert!(w[0].x * w[1].x < 0.0);
            }
        } else {
            prop_assert!(path.exit.is_none());
        }
    }
}
