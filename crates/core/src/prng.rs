//! Seedable Xorshift64 PRNG used for particle spawn positions and burst jitter.
//!
//! Same seed, same sequence, on every platform: the generator is pure integer
//! arithmetic, so a headless render with a fixed seed is reproducible.

use glam::Vec2;

/// Xorshift64 with shifts (13, 7, 17).
///
/// A seed of 0 is a fixed point of the algorithm and is replaced with a
/// non-zero fallback.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform `f32` in [0, 1), built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform `f32` in [min, max).
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform point in the axis-aligned box `[min, min + size)`.
    pub fn next_in_box(&mut self, min: Vec2, size: Vec2) -> Vec2 {
        let x = self.next_range(min.x, min.x + size.x);
        let y = self.next_range(min.y, min.y + size.y);
        Vec2::new(x, y)
    }

    /// Uniform offset in the square `[-radius, radius)` on both axes.
    pub fn next_jitter(&mut self, radius: f32) -> Vec2 {
        let x = self.next_range(-radius, radius);
        let y = self.next_range(-radius, radius);
        Vec2::new(x, y)
    }
}
