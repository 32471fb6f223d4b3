//! Arrow glyph geometry for a single grid cell.

use glam::Vec2;

use crate::field::MAGNITUDE_EPSILON;

/// Arrowhead length as a fraction of the shaft length.
pub const HEAD_LENGTH_RATIO: f32 = 0.3;
/// Arrowhead half-width as a fraction of the shaft length.
pub const HEAD_HALF_WIDTH_RATIO: f32 = 0.15;

/// A centered arrow: a shaft from `tail` to `tip` and a triangular head at `tip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub tail: Vec2,
    pub tip: Vec2,
    /// Unit direction from tail to tip.
    pub direction: Vec2,
    /// Shaft length in pixels.
    pub length: f32,
    /// Head triangle: tip, then the two barbs.
    pub head: [Vec2; 3],
}

impl Arrow {
    /// Builds the arrow for vector `v` centered on `center`.
    ///
    /// Length is `min(|v| / scale, 1) * max_length`. Returns `None` when
    /// `|v|` is below [`MAGNITUDE_EPSILON`].
    pub fn for_vector(center: Vec2, v: Vec2, scale: f32, max_length: f32) -> Option<Self> {
        let magnitude = v.length();
        if magnitude < MAGNITUDE_EPSILON {
            return None;
        }
        let direction = v / magnitude;
        let length = (magnitude / scale).min(1.0) * max_length;
        let half = direction * (length / 2.0);
        let tail = center - half;
        let tip = center + half;

        let perpendicular = Vec2::new(-direction.y, direction.x);
        let base = tip - direction * (length * HEAD_LENGTH_RATIO);
        let barb = perpendicular * (length * HEAD_HALF_WIDTH_RATIO);

        Some(Self {
            tail,
            tip,
            direction,
            length,
            head: [tip, base + barb, base - barb],
        })
    }
}
