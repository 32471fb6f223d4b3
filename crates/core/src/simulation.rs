//! Frame loop state: current field, layer toggles, sampled grid, and particles.
//!
//! The windowing front end polls its input into a [`FrameInput`], calls
//! [`Simulation::frame`], then [`Simulation::render`] with its own [`Painter`].
//! Nothing here touches a window, a clock, or a thread.

use glam::Vec2;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SimConfig;
use crate::draw::Painter;
use crate::error::FieldError;
use crate::field::VectorField;
use crate::field_kind::FieldKind;
use crate::geometry::GridGeometry;
use crate::particles::ParticlePool;
use crate::prng::Xorshift64;
use crate::renderer::{draw_field, draw_grid_frame, draw_particles, draw_text_block, ArrowStyle};

const STATUS_FONT_SIZE: f32 = 16.0;
const HELP_LINE: &str = "[SPACE] next field   [G] grid   [P] particles   [mouse] emit";
/// Distance of the FPS indicator from the window's top-right corner.
const FPS_INSET: Vec2 = Vec2::new(70.0, 10.0);

/// Everything the front end observed since the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Key edge: advance to the next field.
    pub cycle_field: bool,
    /// Key edge: flip grid visibility.
    pub toggle_grid: bool,
    /// Key edge: flip particle visibility and simulation.
    pub toggle_particles: bool,
    /// Pointer position in screen pixels.
    pub pointer: Vec2,
    /// Whether the primary pointer button is held.
    pub pointer_down: bool,
}

/// Which layers are drawn (and, for particles, simulated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layers {
    /// Arrow grid drawn.
    pub grid: bool,
    /// Particles spawned, advected, and drawn.
    pub particles: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            grid: true,
            particles: true,
        }
    }
}

/// The mode controller and the state it drives.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    geometry: GridGeometry,
    kind: FieldKind,
    layers: Layers,
    grid: VectorField,
    pool: ParticlePool,
    rng: Xorshift64,
}

impl Simulation {
    /// Builds a simulation from a validated copy of `config`.
    pub fn new(config: SimConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let geometry = config.geometry()?;
        let grid = VectorField::sampled(config.rows, config.cols, config.field)?;
        let pool = ParticlePool::new(config.max_particles)?;
        Ok(Self {
            geometry,
            kind: config.field,
            layers: Layers::default(),
            grid,
            pool,
            rng: Xorshift64::new(config.seed),
            config,
        })
    }

    /// The validated configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Screen placement of the grid.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The active field.
    pub fn field_kind(&self) -> FieldKind {
        self.kind
    }

    /// Current layer visibility.
    pub fn layers(&self) -> Layers {
        self.layers
    }

    /// The grid as sampled on the last frame.
    pub fn grid(&self) -> &VectorField {
        &self.grid
    }

    /// The particle pool.
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Advances to the next field and clears every particle.
    pub fn cycle_field(&mut self) {
        let previous = self.kind;
        self.kind = self.kind.next();
        self.pool.reset();
        tracing::debug!(from = %previous, to = %self.kind, "field changed, particle pool reset");
    }

    /// Shows or hides the arrow grid.
    pub fn toggle_grid(&mut self) {
        self.layers.grid = !self.layers.grid;
        tracing::debug!(visible = self.layers.grid, "grid toggled");
    }

    /// Enables or disables particles; a disabled pool is frozen, not cleared.
    pub fn toggle_particles(&mut self) {
        self.layers.particles = !self.layers.particles;
        tracing::debug!(visible = self.layers.particles, "particles toggled");
    }

    /// Runs one frame: input, resample, then spawn and advect particles.
    pub fn frame(&mut self, input: &FrameInput) {
        if input.cycle_field {
            self.cycle_field();
        }
        if input.toggle_grid {
            self.toggle_grid();
        }
        if input.toggle_particles {
            self.toggle_particles();
        }

        self.grid.resample(self.kind);

        if self.layers.particles {
            self.spawn_ambient();
            if input.pointer_down {
                self.spawn_burst(input.pointer);
            }
            self.pool.update(
                input.dt,
                self.kind,
                &self.geometry,
                self.config.particle_speed,
            );
        }
    }

    /// Spawns `spawn_per_frame` particles at uniformly random grid positions.
    fn spawn_ambient(&mut self) {
        let origin = self.geometry.origin();
        let size = self.geometry.size();
        for _ in 0..self.config.spawn_per_frame {
            let position = self.rng.next_in_box(origin, size);
            self.pool.spawn(position, self.config.particle_life);
        }
    }

    /// Spawns `burst_count` particles jittered around `pointer`.
    fn spawn_burst(&mut self, pointer: Vec2) {
        for _ in 0..self.config.burst_count {
            let position = pointer + self.rng.next_jitter(self.config.burst_jitter);
            self.pool.spawn(position, self.config.particle_life);
        }
    }

    /// Status lines shown under the grid.
    pub fn status_lines(&self) -> Vec<String> {
        let particles = if self.layers.particles {
            format!(
                "{}/{}",
                self.pool.active_count(),
                self.pool.capacity()
            )
        } else {
            "off".to_string()
        };
        vec![
            format!(
                "Field: {}   Grid: {}   Particles: {particles}",
                self.kind.name(),
                if self.layers.grid { "on" } else { "off" },
            ),
            HELP_LINE.to_string(),
        ]
    }

    /// Draws the frame: background, grid, particles, status, and `fps` if given.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P, fps: Option<u32>) {
        let config = &self.config;
        painter.clear(config.background.opaque());
        draw_grid_frame(painter, &self.geometry, config.grid_panel, config.grid_outline);

        if self.layers.grid {
            let style = ArrowStyle {
                max_length: config.max_arrow_length(),
                thickness: config.arrow_thickness,
            };
            draw_field(painter, &self.grid, &self.geometry, style);
        }
        if self.layers.particles {
            draw_particles(painter, &self.pool, config.particle_radius, config.particle_color);
        }

        let status_origin = Vec2::new(self.geometry.padding(), self.geometry.max().y + 8.0);
        draw_text_block(
            painter,
            &self.status_lines(),
            status_origin,
            STATUS_FONT_SIZE,
            config.text_color.opaque(),
        );

        if let Some(fps) = fps {
            let position = Vec2::new(config.window_width as f32 - FPS_INSET.x, FPS_INSET.y);
            painter.fps(position, fps);
        }
    }

    /// Machine-readable snapshot of the controller state.
    pub fn status(&self) -> Value {
        json!({
            "field": self.kind.slug(),
            "layers": self.layers,
            "active_particles": self.pool.active_count(),
            "capacity": self.pool.capacity(),
            "max_magnitude": self.grid.max_magnitude(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandList, DrawCommand};

    fn small_config() -> SimConfig {
        SimConfig {
            rows: 4,
            cols: 4,
            cell_size: 10.0,
            padding: 0.0,
            arrow_margin: 2.0,
            max_particles: 16,
            spawn_per_frame: 2,
            burst_count: 3,
            burst_jitter: 1.0,
            particle_speed: 5.0,
            window_width: 100,
            window_height: 100,
            ..SimConfig::default()
        }
    }

    fn sim() -> Simulation {
        Simulation::new(small_config()).unwrap()
    }

    fn tick(dt: f32) -> FrameInput {
        FrameInput {
            dt,
            ..FrameInput::default()
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SimConfig {
            cols: 0,
            ..small_config()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn oversized_grid_is_an_error_not_an_allocation() {
        let config = SimConfig {
            rows: 200_000,
            cols: 200_000,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(FieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn fps_sits_seventy_pixels_from_the_right_edge() {
        let sim = sim();
        let mut list = CommandList::new();
        sim.render(&mut list, Some(30));
        let position = list
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { text, position, .. } if text == "30 FPS" => Some(*position),
                _ => None,
            })
            .unwrap();
        assert_eq!(position, Vec2::new(30.0, 10.0));
    }

    #[test]
    fn status_layers_follow_toggles() {
        let mut sim = sim();
        sim.toggle_particles();
        let status = sim.status();
        assert_eq!(status["layers"]["grid"], true);
        assert_eq!(status["layers"]["particles"], false);
    }

    #[test]
    fn starts_on_configured_field_with_everything_visible() {
        let sim = Simulation::new(SimConfig {
            field: FieldKind::Spiral,
            ..small_config()
        })
        .unwrap();
        assert_eq!(sim.field_kind(), FieldKind::Spiral);
        assert_eq!(sim.layers(), Layers::default());
        assert_eq!(sim.pool().active_count(), 0);
        assert_eq!(
            sim.grid(),
            &VectorField::sampled(4, 4, FieldKind::Spiral).unwrap()
        );
    }

    #[test]
    fn cycle_input_advances_and_wraps() {
        let mut sim = sim();
        let cycle = FrameInput {
            cycle_field: true,
            ..tick(0.016)
        };
        for expected in [
            FieldKind::Radial,
            FieldKind::Vortex,
            FieldKind::Spiral,
            FieldKind::Saddle,
            FieldKind::Uniform,
        ] {
            sim.frame(&cycle);
            assert_eq!(sim.field_kind(), expected);
            assert!(sim.status_lines()[0].contains(expected.name()));
        }
    }

    #[test]
    fn field_change_clears_every_particle() {
        let mut sim = sim();
        for _ in 0..5 {
            sim.frame(&tick(0.016));
        }
        assert!(sim.pool().active_count() > 0);
        sim.cycle_field();
        assert!(sim.pool().particles().iter().all(|p| !p.active));
    }

    #[test]
    fn grid_is_resampled_for_new_field_on_the_same_frame() {
        let mut sim = sim();
        sim.frame(&FrameInput {
            cycle_field: true,
            ..tick(0.016)
        });
        assert_eq!(
            sim.grid(),
            &VectorField::sampled(4, 4, FieldKind::Radial).unwrap()
        );
    }

    #[test]
    fn ambient_spawn_adds_configured_count_per_frame() {
        let mut sim = sim();
        sim.frame(&tick(0.0));
        assert_eq!(sim.pool().active_count(), 2);
        sim.frame(&tick(0.0));
        assert_eq!(sim.pool().active_count(), 4);
    }

    #[test]
    fn ambient_spawns_land_inside_the_grid() {
        let mut sim = sim();
        sim.frame(&tick(0.0));
        for p in sim.pool().iter_active() {
            assert!(sim.geometry().contains(p.position), "{:?}", p);
        }
    }

    #[test]
    fn pointer_burst_spawns_near_pointer() {
        let mut sim = sim();
        let pointer = Vec2::new(20.0, 20.0);
        sim.frame(&FrameInput {
            pointer,
            pointer_down: true,
            ..tick(0.0)
        });
        assert_eq!(sim.pool().active_count(), 5);
        let near = sim
            .pool()
            .iter_active()
            .filter(|p| p.position.distance(pointer) <= 2.0_f32.sqrt())
            .count();
        assert!(near >= 3, "only {near} particles near the pointer");
    }

    #[test]
    fn pool_saturates_at_capacity() {
        let mut sim = sim();
        for _ in 0..20 {
            sim.frame(&tick(0.0));
        }
        assert_eq!(sim.pool().active_count(), 16);
        assert!(sim.pool().is_full());
    }

    #[test]
    fn disabling_particles_freezes_the_pool() {
        let mut sim = sim();
        sim.frame(&tick(0.016));
        let before = sim.pool().particles().to_vec();
        sim.frame(&FrameInput {
            toggle_particles: true,
            pointer_down: true,
            ..tick(0.016)
        });
        assert!(!sim.layers().particles);
        assert_eq!(sim.pool().particles(), before.as_slice());
    }

    #[test]
    fn toggles_are_independent_of_field() {
        let mut sim = sim();
        sim.toggle_grid();
        assert_eq!(
            sim.layers(),
            Layers {
                grid: false,
                particles: true
            }
        );
        sim.cycle_field();
        assert!(!sim.layers().grid);
        sim.toggle_grid();
        assert!(sim.layers().grid);
    }

    #[test]
    fn same_seed_same_pool() {
        let mut a = sim();
        let mut b = sim();
        let input = FrameInput {
            pointer: Vec2::new(15.0, 25.0),
            pointer_down: true,
            ..tick(0.016)
        };
        for _ in 0..10 {
            a.frame(&input);
            b.frame(&input);
        }
        assert_eq!(a.pool().particles(), b.pool().particles());
    }

    #[test]
    fn particles_expire_after_their_life() {
        let mut sim = Simulation::new(SimConfig {
            spawn_per_frame: 1,
            particle_life: 0.05,
            particle_speed: 0.0,
            ..small_config()
        })
        .unwrap();
        sim.frame(&tick(0.0));
        assert_eq!(sim.pool().active_count(), 1);
        // Spawn-then-update: the new particle ages too, the old one expires.
        sim.frame(&tick(0.1));
        assert_eq!(sim.pool().active_count(), 0);
    }

    #[test]
    fn render_draws_layers_in_order() {
        let mut sim = sim();
        sim.frame(&tick(0.0));
        let mut list = CommandList::new();
        sim.render(&mut list, Some(60));

        let commands = list.commands();
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        let first_line = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        let first_circle = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { .. }))
            .unwrap();
        let first_text = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .unwrap();
        assert!(first_line < first_circle);
        assert!(first_circle < first_text);
        assert_eq!(list.texts().last(), Some("60 FPS"));
    }

    #[test]
    fn hidden_layers_are_not_drawn() {
        let mut sim = sim();
        sim.frame(&tick(0.016));
        sim.toggle_grid();
        sim.toggle_particles();
        let mut list = CommandList::new();
        sim.render(&mut list, None);
        assert_eq!(list.lines().count(), 0);
        assert_eq!(list.triangles().count(), 0);
        assert_eq!(list.circles().count(), 0);
        assert!(!list.texts().any(|t| t.ends_with("FPS")));
    }

    #[test]
    fn status_reports_state() {
        let mut sim = sim();
        sim.frame(&tick(0.0));
        let status = sim.status();
        assert_eq!(status["field"], "uniform");
        assert_eq!(status["layers"]["grid"], true);
        assert_eq!(status["layers"]["particles"], true);
        assert_eq!(status["active_particles"], 2);
        assert_eq!(status["capacity"], 16);
    }
}
