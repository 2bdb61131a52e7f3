//! Pointer shortening
//!
//! The pointer reaches the top of the screen on the first shot and shrinks
//! toward the finish line with every shot after that, until it is gone.

use glam::Vec2;

use crate::line_x_at;

/// Highest y the pointer may reach on shot `shot_number` (1-based)
///
/// Shot 1 reaches `screen_top`; shot `shots_with_pointer + 1` stops at the
/// finish line; later shots keep dropping below it.
pub fn cutoff_y(shot_number: u32, shots_with_pointer: u32, finish_line: f32, screen_top: f32) -> f32 {
    let total = shots_with_pointer.max(1) as f32;
    let fraction = (1.0 - shot_number.saturating_sub(1) as f32 / total).min(1.0);
    finish_line + fraction * (screen_top - finish_line)
}

/// Cut the polyline where it first rises above `cutoff`
///
/// The remainder is replaced by one point on the crossing segment at
/// `cutoff`. If the first vertex is already above the cutoff the pointer is
/// cleared. Returns true when anything was cut.
pub fn shorten(vertices: &mut Vec<Vec2>, cutoff: f32) -> bool {
    let Some(i) = vertices.iter().position(|v| v.y > cutoff) else {
        return false;
    };
    if i == 0 {
        vertices.clear();
        return true;
    }

    let (prev, crossing) = (vertices[i - 1], vertices[i]);
    let x = line_x_at(crossing, crossing - prev, cutoff);
    vertices.truncate(i);
    vertices.push(Vec2::new(x, cutoff));
    true
}
