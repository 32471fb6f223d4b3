#![deny(unsafe_code)]
//! Core types for the force-fields vector field visualizer.
//!
//! Provides the analytic `FieldKind` set, the sampled `VectorField` grid,
//! `GridGeometry` (screen/normalized mapping), the fixed-capacity
//! `ParticlePool`, `Arrow` glyph geometry, the `Painter` drawing seam, and the
//! `Simulation` mode controller that ties them together per frame.

pub mod arrow;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod field;
pub mod field_kind;
pub mod geometry;
pub mod particles;
pub mod prng;
pub mod renderer;
pub mod simulation;

pub use arrow::Arrow;
pub use color::{magnitude_color, Rgba, Srgb};
pub use config::SimConfig;
pub use draw::{CommandList, DrawCommand, Painter};
pub use error::FieldError;
pub use field::{VectorField, MAGNITUDE_EPSILON};
pub use field_kind::FieldKind;
pub use geometry::GridGeometry;
pub use glam::Vec2;
pub use particles::{Particle, ParticlePool};
pub use prng::Xorshift64;
pub use simulation::{FrameInput, Layers, Simulation};
