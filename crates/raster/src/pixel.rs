//! Software [`Painter`] over an RGBA8 pixel buffer.
//!
//! Shapes are filled by testing each pixel center against the shape and
//! blending source-over with the color's alpha. There is no anti-aliasing and
//! no font rasterizer: text is skipped.

use std::ops::Range;

use force_fields_core::color::Rgba;
use force_fields_core::draw::Painter;
use force_fields_core::error::FieldError;
use force_fields_core::Vec2;

/// Row-major RGBA8 image, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelCanvas {
    /// Creates a transparent black canvas.
    ///
    /// Returns `FieldError::InvalidDimensions` if either side is zero or the
    /// buffer size overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.offset(x, y);
        let a = color.a.clamp(0.0, 1.0);
        if a >= 1.0 {
            self.data[i..i + 4].copy_from_slice(&color.to_rgba8());
            return;
        }
        if a <= 0.0 {
            return;
        }
        let src = color.to_rgba8();
        for c in 0..3 {
            let dst = self.data[i + c] as f32;
            self.data[i + c] = (src[c] as f32 * a + dst * (1.0 - a)).round() as u8;
        }
        let dst_a = self.data[i + 3] as f32 / 255.0;
        self.data[i + 3] = ((a + dst_a * (1.0 - a)) * 255.0).round() as u8;
    }

    /// Blends `color` into every pixel whose center lies in `[min, max]` and
    /// satisfies `inside`.
    fn fill_where(&mut self, min: Vec2, max: Vec2, color: Rgba, inside: impl Fn(Vec2) -> bool) {
        for y in span(min.y, max.y, self.height) {
            for x in span(min.x, max.x, self.width) {
                if inside(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

/// Pixel indices whose cells intersect `[lo, hi]`, clipped to `[0, limit)`.
fn span(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    let start = lo.floor().max(0.0) as u32;
    let end = (hi.ceil().max(0.0) as u32).min(limit);
    start..end.max(start)
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Painter for PixelCanvas {
    fn clear(&mut self, color: Rgba) {
        let rgba = color.to_rgba8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        let max = origin + size;
        self.fill_where(origin, max, color, |p| {
            p.x >= origin.x && p.x < max.x && p.y >= origin.y && p.y < max.y
        });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, thickness: f32, color: Rgba) {
        let t = thickness.max(1.0);
        let max = origin + size;
        let inner_min = origin + Vec2::splat(t);
        let inner_max = max - Vec2::splat(t);
        self.fill_where(origin, max, color, |p| {
            let outer = p.x >= origin.x && p.x < max.x && p.y >= origin.y && p.y < max.y;
            let inner =
                p.x >= inner_min.x && p.x < inner_max.x && p.y >= inner_min.y && p.y < inner_max.y;
            outer && !inner
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba) {
        let half = (thickness / 2.0).max(0.5);
        let pad = Vec2::splat(half);
        self.fill_where(from.min(to) - pad, from.max(to) + pad, color, |p| {
            distance_to_segment(p, from, to) <= half
        });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        let min = a.min(b).min(c);
        let max = a.max(b).max(c);
        self.fill_where(min, max, color, |p| {
            let e0 = edge(a, b, p);
            let e1 = edge(b, c, p);
            let e2 = edge(c, a, p);
            (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let r = Vec2::splat(radius);
        self.fill_where(center - r, center + r, color, |p| {
            p.distance_squared(center) <= radius * radius
        });
    }

    fn text(&mut self, text: &str, _position: Vec2, _font_size: f32, _color: Rgba) {
        tracing::trace!(text, "text skipped by software rasterizer");
    }
}
