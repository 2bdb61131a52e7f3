//! Rock Sling pointer demo
//!
//! Lays out a random caterpillar field, drags the rock to a few aiming
//! positions and prints each predicted pointer as one JSON line.
//!
//! Usage: `rock-sling [settings.json] [seed]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use rock_sling::renderer::{RecordingRenderer, dashed_segments};
use rock_sling::sim::{Scene, Shape};
use rock_sling::{Pointer, Settings};

const DEFAULT_SEED: u64 = 42;
const CATERPILLAR_COUNT: usize = 6;
const CATERPILLAR_LANES: i32 = 4;
const CATERPILLAR_SIZE: Vec2 = Vec2::new(0.5, 0.3);

/// One printed line
#[derive(Serialize)]
struct ShotReport {
    shot: u32,
    position: Vec2,
    clear: bool,
    reflections: usize,
    exit: Option<Vec2>,
    vertices: Vec<Vec2>,
    dashes: usize,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    log::info!("Rock Sling pointer demo starting (seed {})", seed);

    let mut rng = Pcg32::seed_from_u64(seed);
    let half_height = settings.screen.top.max(-settings.screen.bottom);
    let mut scene = Scene::with_side_walls(settings.screen.half_width, half_height);
    spawn_caterpillars(&mut scene, &settings, &mut rng);

    let start = settings.anchor - Vec2::new(0.0, 1.0);
    let rock = scene.add_rock(start, settings.radius);
    log::info!("Scene has {} colliders", scene.colliders().len());

    let (anchor, shots) = (settings.anchor, settings.shots_with_pointer + 1);
    let mut pointer = Pointer::new(settings, RecordingRenderer::default());

    for shot in 1..=shots {
        // Drag somewhere below and to the side of the anchor
        let position = anchor + Vec2::new(rng.random_range(-0.8..0.8), rng.random_range(-1.5..-0.5));
        if let Some(Shape::Circle { center, .. }) = scene.shape_mut(rock) {
            *center = position;
        }

        let time = shot as f32 * 0.5;
        let path = pointer.update(&scene, position, shot, time);
        let settings = pointer.settings();
        let offscreen = path.vertices.iter().filter(|v| !settings.screen.contains(**v)).count();
        if offscreen > 0 {
            log::warn!("shot {}: {} pointer vertices off screen", shot, offscreen);
        }
        let dashes = dashed_segments(
            &pointer.renderer().points,
            settings.dash_length,
            settings.dash_gap,
            time * settings.dash_speed,
        );

        let report = ShotReport {
            shot,
            position,
            clear: path.is_clear_shot(),
            reflections: path.reflections,
            exit: path.exit,
            vertices: path.vertices,
            dashes: dashes.len(),
        };
        match serde_json::to_string(&report) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize shot {}: {}", shot, e),
        }
    }

    pointer.clear();
    let renderer = pointer.into_renderer();
    log::info!("Done after {} pointer frames", renderer.frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Nothing to run without a host engine
}

/// Drop caterpillars into random lanes above the finish line
fn spawn_caterpillars(scene: &mut Scene, settings: &Settings, rng: &mut Pcg32) {
    let lane_width = 2.0 * settings.screen.half_width / CATERPILLAR_LANES as f32;
    let (low, high) = (settings.finish_line + 1.0, settings.screen.top - 0.5);

    for _ in 0..CATERPILLAR_COUNT {
        let lane = rng.random_range(-CATERPILLAR_LANES / 2..CATERPILLAR_LANES / 2);
        let x = (lane as f32 + 0.5) * lane_width;
        let y = if high > low { rng.random_range(low..high) } else { low };
        let center = Vec2::new(x, y);
        let id = scene.add_caterpillar(center - CATERPILLAR_SIZE / 2.0, center + CATERPILLAR_SIZE / 2.0);
        log::debug!("caterpillar {:?} in lane {} at {:?}", id, lane, center);
    }
}
