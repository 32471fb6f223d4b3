//! Color types and the magnitude-to-hue mapping.
//!
//! Field arrows are colored by normalized magnitude: blue (hue 240°) for the
//! weakest cells through to red (hue 0°) for the strongest, at fixed
//! saturation and value. Components are `f32` in [0, 1].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FieldError;

/// Saturation used for magnitude colors.
pub const MAGNITUDE_SATURATION: f32 = 0.9;
/// Value (brightness) used for magnitude colors.
pub const MAGNITUDE_VALUE: f32 = 0.9;
/// Hue in degrees for a normalized magnitude of 0.
pub const MAGNITUDE_HUE_SPAN: f32 = 240.0;

/// Opaque sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip quantizes to
/// 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// sRGB color with straight (non-premultiplied) alpha, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// HSV color: hue in degrees, saturation and value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `FieldError::InvalidConfig` if the input is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, FieldError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FieldError::InvalidConfig(format!(
                "expected a #rrggbb color, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|c| c as f32 / 255.0)
                .map_err(|e| FieldError::InvalidConfig(format!("invalid color {hex:?}: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Formats the color as `"#rrggbb"`, rounding each channel to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(to_u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Fully opaque version of this color.
    pub fn opaque(self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, 1.0)
    }

    /// This color with an 8-bit alpha.
    pub fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, alpha as f32 / 255.0)
    }
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Quantizes to `[r, g, b, a]` bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(to_u8)
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts HSV to sRGB. Hue wraps modulo 360; saturation and value are clamped.
pub fn hsv_to_srgb(c: Hsv) -> Srgb {
    let s = c.s.clamp(0.0, 1.0);
    let v = c.v.clamp(0.0, 1.0);
    let h = c.h.rem_euclid(360.0) / 60.0;
    let chroma = v * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - chroma;
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Srgb::new(r + m, g + m, b + m)
}

/// Color for a normalized magnitude `t`: hue `240 * (1 - t)`, clamped to [0, 1] first.
pub fn magnitude_color(t: f32) -> Srgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    hsv_to_srgb(Hsv {
        h: MAGNITUDE_HUE_SPAN * (1.0 - t),
        s: MAGNITUDE_SATURATION,
        v: MAGNITUDE_VALUE,
    })
}
