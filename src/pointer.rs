//! Aiming pointer
//!
//! Ties the predictor to a renderer: each frame the rock is dragged, the
//! path is recomputed, shortened for later shots and handed to the renderer
//! along with the dash animation parameters.

use glam::Vec2;

use crate::path_length;
use crate::renderer::PathRenderer;
use crate::settings::Settings;
use crate::sim::{PointerPath, RayCaster, compute_pointer, cutoff_y, shorten};

/// Pointer shown while the rock is being aimed
#[derive(Debug)]
pub struct Pointer<R: PathRenderer> {
    settings: Settings,
    renderer: R,
}

impl<R: PathRenderer> Pointer<R> {
    pub fn new(settings: Settings, renderer: R) -> Self {
        Self { settings, renderer }
    }

    /// Recompute and redraw the pointer for a rock at `position`
    ///
    /// `shot_number` is 1-based; from the second shot on the path is cut
    /// back toward the finish line. `time` drives the dash scroll.
    pub fn update<C: RayCaster + ?Sized>(
        &mut self,
        caster: &C,
        position: Vec2,
        shot_number: u32,
        time: f32,
    ) -> PointerPath {
        let mut path = compute_pointer(caster, &self.settings.request(position));

        if shot_number > 1 {
            let cutoff = cutoff_y(
                shot_number,
                self.settings.shots_with_pointer,
                self.settings.finish_line,
                self.settings.screen.top,
            );
            if shorten(&mut path.vertices, cutoff) {
                log::trace!("pointer: shot {} cut at y={}", shot_number, cutoff);
            }
        }

        let length = path_length(&path.vertices);
        self.renderer.set_animation_offset(-time);
        self.renderer.set_tile_scale(length);
        self.renderer.set_path(&path.vertices);
        path
    }

    /// Hide the pointer (rock released)
    pub fn clear(&mut self) {
        self.renderer.set_tile_scale(0.0);
        self.renderer.set_path(&[]);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
