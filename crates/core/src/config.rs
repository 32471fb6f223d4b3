//! Simulation configuration.
//!
//! Every size, rate, and color the demo uses lives in [`SimConfig`]. The
//! `Default` impl reproduces the stock demo; a JSON document may override any
//! subset of keys (missing keys keep their default).

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::FieldError;
use crate::field_kind::FieldKind;
use crate::geometry::GridGeometry;

/// Complete configuration for one [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,

    pub rows: usize,
    pub cols: usize,
    /// Cell edge in pixels.
    pub cell_size: f32,
    /// Offset of the grid from the window's top-left corner, in pixels.
    pub padding: f32,
    /// Gap left between a full-length arrow and its cell edge, in pixels.
    pub arrow_margin: f32,
    pub arrow_thickness: f32,

    pub max_particles: usize,
    /// Particles spawned at random grid positions every frame.
    pub spawn_per_frame: usize,
    /// Particles spawned at the pointer every frame while the button is held.
    pub burst_count: usize,
    /// Maximum offset of burst particles from the pointer, in pixels.
    pub burst_jitter: f32,
    /// Pixels per second per unit of field magnitude.
    pub particle_speed: f32,
    /// Particle lifetime in seconds.
    pub particle_life: f32,
    pub particle_radius: f32,
    pub particle_color: Srgb,

    pub background: Srgb,
    pub grid_panel: Srgb,
    pub grid_outline: Srgb,
    pub text_color: Srgb,

    /// Seed for spawn positions.
    pub seed: u64,
    /// Field shown at startup.
    pub field: FieldKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            title: "force-fields".to_string(),
            window_width: 800,
            window_height: 600,
            target_fps: 60,
            rows: 20,
            cols: 28,
            cell_size: 25.0,
            padding: 50.0,
            arrow_margin: 6.0,
            arrow_thickness: 2.0,
            max_particles: 500,
            spawn_per_frame: 3,
            burst_count: 5,
            burst_jitter: 10.0,
            particle_speed: 120.0,
            particle_life: 3.0,
            particle_radius: 2.5,
            particle_color: Srgb::new(40.0 / 255.0, 40.0 / 255.0, 40.0 / 255.0),
            background: Srgb::new(245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0),
            grid_panel: Srgb::new(1.0, 1.0, 1.0),
            grid_outline: Srgb::new(0.0, 82.0 / 255.0, 172.0 / 255.0),
            text_color: Srgb::new(80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0),
            seed: 42,
            field: FieldKind::Uniform,
        }
    }
}

impl SimConfig {
    /// Parses a JSON document on top of the defaults and validates the result.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: SimConfig = serde_json::from_str(json)
            .map_err(|e| FieldError::InvalidConfig(format!("config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Grid placement derived from `rows`, `cols`, `cell_size`, and `padding`.
    pub fn geometry(&self) -> Result<GridGeometry, FieldError> {
        GridGeometry::new(self.rows, self.cols, self.cell_size, self.padding)
    }

    /// Longest arrow a cell can hold: `cell_size - arrow_margin`.
    pub fn max_arrow_length(&self) -> f32 {
        self.cell_size - self.arrow_margin
    }

    /// Checks that every value is usable.
    ///
    /// The grid must fit inside the window and cells must be at least one
    /// pixel, so the cell count is bounded by the window area.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let geometry = self.geometry()?;
        if self.cell_size < 1.0 {
            return Err(invalid("cell_size", "must be at least 1 pixel"));
        }
        let max = geometry.max();
        if max.x > self.window_width as f32 {
            return Err(FieldError::InvalidConfig(format!(
                "grid right edge {} exceeds window_width {}",
                max.x, self.window_width
            )));
        }
        if max.y > self.window_height as f32 {
            return Err(FieldError::InvalidConfig(format!(
                "grid bottom edge {} exceeds window_height {}",
                max.y, self.window_height
            )));
        }
        if self.max_particles == 0 {
            return Err(FieldError::InvalidCapacity);
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be positive"));
        }
        if !(self.arrow_margin >= 0.0 && self.arrow_margin < self.cell_size) {
            return Err(invalid("arrow_margin", "must be in [0, cell_size)"));
        }
        check_positive("arrow_thickness", self.arrow_thickness)?;
        check_positive("particle_life", self.particle_life)?;
        check_positive("particle_radius", self.particle_radius)?;
        if !(self.particle_speed.is_finite() && self.particle_speed >= 0.0) {
            return Err(invalid("particle_speed", "must be non-negative"));
        }
        if !(self.burst_jitter.is_finite() && self.burst_jitter >= 0.0) {
            return Err(invalid("burst_jitter", "must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> FieldError {
    FieldError::InvalidConfig(format!("{name} {reason}"))
}

fn check_positive(name: &str, value: f32) -> Result<(), FieldError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be positive"))
    }
}
