#![deny(unsafe_code)]
//! Headless rendering for force-fields.
//!
//! Drives a [`Simulation`] with a fixed time step (no window, no clock) and
//! rasterizes the result into a [`PixelCanvas`]. With the `png` feature the
//! canvas can be written out via [`snapshot::write_png`].

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use force_fields_core::error::FieldError;
use force_fields_core::simulation::{FrameInput, Simulation};
use force_fields_core::Vec2;

pub use pixel::PixelCanvas;

/// Advances `sim` by `frames` frames of `dt` seconds.
///
/// When `hold` is set the pointer is held down there on every frame.
pub fn advance(sim: &mut Simulation, frames: usize, dt: f32, hold: Option<Vec2>) {
    let input = FrameInput {
        dt,
        pointer: hold.unwrap_or_default(),
        pointer_down: hold.is_some(),
        ..FrameInput::default()
    };
    for _ in 0..frames {
        sim.frame(&input);
    }
    tracing::debug!(
        frames,
        active = sim.pool().active_count(),
        field = %sim.field_kind(),
        "headless run finished"
    );
}

/// Rasterizes the current state of `sim` at its configured window size.
pub fn render_frame(sim: &Simulation) -> Result<PixelCanvas, FieldError> {
    let config = sim.config();
    let mut canvas = PixelCanvas::new(config.window_width, config.window_height)?;
    sim.render(&mut canvas, None);
    Ok(canvas)
}
