//! Interactive window: macroquad input polling, drawing, and frame pacing.

use std::time::{Duration, Instant};

use force_fields_core::color::Rgba;
use force_fields_core::draw::Painter;
use force_fields_core::simulation::{FrameInput, Simulation};
use force_fields_core::Vec2;
use macroquad::prelude::{
    clear_background, draw_circle, draw_line, draw_rectangle, draw_rectangle_lines, draw_text,
    draw_triangle, get_fps, get_frame_time, is_key_pressed, is_mouse_button_down,
    mouse_position, next_frame, vec2, Color, Conf, KeyCode, MouseButton,
};

/// Longest step fed to the simulation; longer stalls (window drag, breakpoint)
/// are clamped so particles do not jump across the grid.
const MAX_FRAME_DT: f32 = 0.1;
/// Distance from the top of a text line to its baseline, as a fraction of font size.
const BASELINE_RATIO: f32 = 0.8;

/// Builds the macroquad window configuration for `sim`.
pub fn window_conf(sim: &Simulation) -> Conf {
    let config = sim.config();
    Conf {
        window_title: config.title.clone(),
        window_width: i32::try_from(config.window_width).unwrap_or(i32::MAX),
        window_height: i32::try_from(config.window_height).unwrap_or(i32::MAX),
        window_resizable: false,
        ..Default::default()
    }
}

/// Opens the window and runs `sim` until it is closed or Escape is pressed.
pub fn run(sim: Simulation) {
    let conf = window_conf(&sim);
    macroquad::Window::from_config(conf, event_loop(sim));
}

async fn event_loop(mut sim: Simulation) {
    let target = Duration::from_secs_f64(1.0 / f64::from(sim.config().target_fps));
    let mut painter = MacroquadPainter;
    tracing::info!(field = %sim.field_kind(), "window opened");

    loop {
        let started = Instant::now();
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        sim.frame(&poll_input());
        let fps = u32::try_from(get_fps()).unwrap_or(0);
        sim.render(&mut painter, Some(fps));

        next_frame().await;

        if let Some(remaining) = target.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    tracing::info!(status = %sim.status(), "window closed");
}

fn poll_input() -> FrameInput {
    let (x, y) = mouse_position();
    FrameInput {
        dt: get_frame_time().min(MAX_FRAME_DT),
        cycle_field: is_key_pressed(KeyCode::Space),
        toggle_grid: is_key_pressed(KeyCode::G),
        toggle_particles: is_key_pressed(KeyCode::P),
        pointer: Vec2::new(x, y),
        pointer_down: is_mouse_button_down(MouseButton::Left),
    }
}

fn to_color(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

/// [`Painter`] backed by macroquad's immediate-mode shape API.
struct MacroquadPainter;

impl Painter for MacroquadPainter {
    fn clear(&mut self, color: Rgba) {
        clear_background(to_color(color));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        draw_rectangle(origin.x, origin.y, size.x, size.y, to_color(color));
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, thickness: f32, color: Rgba) {
        draw_rectangle_lines(origin.x, origin.y, size.x, size.y, thickness, to_color(color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba) {
        draw_line(from.x, from.y, to.x, to.y, thickness, to_color(color));
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        // macroquad carries its own glam; convert component-wise.
        draw_triangle(
            vec2(a.x, a.y),
            vec2(b.x, b.y),
            vec2(c.x, c.y),
            to_color(color),
        );
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        draw_circle(center.x, center.y, radius, to_color(color));
    }

    fn text(&mut self, text: &str, position: Vec2, font_size: f32, color: Rgba) {
        draw_text(
            text,
            position.x,
            position.y + font_size * BASELINE_RATIO,
            font_size,
            to_color(color),
        );
    }
}
