//! The five closed-form vector fields.
//!
//! Each [`FieldKind`] maps a normalized coordinate (roughly [-1, 1] on both
//! axes) to a 2D vector. Evaluation is pure and total; dispatch is a single
//! `match`, so adding a variant forces every name and formula to be updated.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Selector over the textbook vector fields.
///
/// Serializes as snake_case (`"uniform"`, `"radial"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Constant flow (1.0, 0.5).
    #[default]
    Uniform,
    /// Points away from the origin, growing linearly with distance.
    Radial,
    /// Rotation about the origin, perpendicular to the radius.
    Vortex,
    /// Radial plus vortex.
    Spiral,
    /// Expansion along x, contraction along y.
    Saddle,
}

impl FieldKind {
    /// Every variant in cycling order.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Uniform,
        FieldKind::Radial,
        FieldKind::Vortex,
        FieldKind::Spiral,
        FieldKind::Saddle,
    ];

    /// Number of variants.
    pub const COUNT: usize = Self::ALL.len();

    /// Evaluates the field at normalized position `p`.
    pub fn eval(self, p: Vec2) -> Vec2 {
        match self {
            FieldKind::Uniform => Vec2::new(1.0, 0.5),
            FieldKind::Radial => p,
            FieldKind::Vortex => Vec2::new(-p.y, p.x),
            FieldKind::Spiral => Vec2::new(p.x - p.y, p.y + p.x),
            FieldKind::Saddle => Vec2::new(p.x, -p.y),
        }
    }

    /// Human-readable name shown in the status overlay.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Uniform => "Uniform",
            FieldKind::Radial => "Radial",
            FieldKind::Vortex => "Vortex",
            FieldKind::Spiral => "Spiral",
            FieldKind::Saddle => "Saddle",
        }
    }

    /// Lowercase identifier used on the command line and in config files.
    pub fn slug(self) -> &'static str {
        match self {
            FieldKind::Uniform => "uniform",
            FieldKind::Radial => "radial",
            FieldKind::Vortex => "vortex",
            FieldKind::Spiral => "spiral",
            FieldKind::Saddle => "saddle",
        }
    }

    /// Position of this variant in [`FieldKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            FieldKind::Uniform => 0,
            FieldKind::Radial => 1,
            FieldKind::Vortex => 2,
            FieldKind::Spiral => 3,
            FieldKind::Saddle => 4,
        }
    }

    /// The next variant, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Parses a field kind by slug or display name, ignoring ASCII case.
    ///
    /// Returns `FieldError::UnknownField` if nothing matches.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }

    /// Slugs of every variant in cycling order.
    pub fn list_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.slug()).collect()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
