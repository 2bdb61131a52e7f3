//! Shape generation for the dashed pointer line

use glam::Vec2;

/// Split a polyline into dash segments
///
/// Dashes of length `dash` alternate with gaps of length `gap` along the
/// whole polyline (dashes carry over corners). `phase` shifts the pattern
/// forward, so advancing it each frame makes the dashes crawl along the path.
pub fn dashed_segments(points: &[Vec2], dash: f32, gap: f32, phase: f32) -> Vec<(Vec2, Vec2)> {
    let period = dash + gap;
    if points.len() < 2 || dash <= 0.0 || period <= 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    // Distance into the current period at the start of the polyline
    let mut cursor = (-phase).rem_euclid(period);

    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) / len;
        let mut t = 0.0;

        while t < len {
            if cursor < dash {
                // Inside a dash
                let end = (t + dash - cursor).min(len);
                segments.push((a + dir * t, a + dir * end));
                cursor += end - t;
                t = end;
            } else {
                // Inside a gap
                let end = (t + period - cursor).min(len);
                cursor += end - t;
                t = end;
            }
            if cursor >= period {
                cursor -= period;
            }
        }
    }

    segments
}

/// Triangle list for a polyline of constant width
pub fn line_strip(points: &[Vec2], width: f32) -> Vec<Vec2> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for w in points.windows(2) {
        let (p1, p2) = (w[0], w[1]);
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        // Two triangles
        vertices.extend_from_slice(&[v1a, v1b, v2a, v2a, v1b, v2b]);
    }

    vertices
}
