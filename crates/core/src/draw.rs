//! The drawing seam between the simulation and whatever puts pixels on screen.
//!
//! [`Painter`] is implemented by the windowed front end, by the headless
//! rasterizer, and by [`CommandList`], which records calls for inspection.

use glam::Vec2;

use crate::color::Rgba;

/// Color of the frames-per-second indicator.
pub const FPS_COLOR: Rgba = Rgba::new(0.0, 0.46, 0.17, 1.0);
/// Font size of the frames-per-second indicator.
pub const FPS_FONT_SIZE: f32 = 20.0;

/// Immediate-mode 2D drawing primitives. Coordinates are screen pixels with
/// y pointing down.
pub trait Painter {
    /// Fills the whole target with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fills the axis-aligned rectangle `[origin, origin + size)`.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    /// Outlines the rectangle with a border `thickness` pixels wide.
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, thickness: f32, color: Rgba);

    /// Draws a straight segment `thickness` pixels wide.
    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba);

    /// Fills the triangle `abc`, either winding.
    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba);

    /// Fills a disc.
    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Draws `text` with its top-left corner at `position`.
    fn text(&mut self, text: &str, position: Vec2, font_size: f32, color: Rgba);

    /// Draws a frames-per-second indicator with its top-left corner at `position`.
    fn fps(&mut self, position: Vec2, fps: u32) {
        self.text(&format!("{fps} FPS"), position, FPS_FONT_SIZE, FPS_COLOR);
    }
}

/// One recorded [`Painter`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
    StrokeRect {
        origin: Vec2,
        size: Vec2,
        thickness: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Rgba,
    },
    Triangle {
        points: [Vec2; 3],
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Text {
        text: String,
        position: Vec2,
        font_size: f32,
        color: Rgba,
    },
}

/// A [`Painter`] that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded line commands as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    /// Recorded triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Triangle { points, .. } => Some(*points),
            _ => None,
        })
    }

    /// Recorded circles as `(center, radius, color)`.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    /// Recorded text strings.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Painter for CommandList {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands
            .push(DrawCommand::FillRect { origin, size, color });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, thickness: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect {
            origin,
            size,
            thickness,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Triangle {
            points: [a, b, c],
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, text: &str, position: Vec2, font_size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
    }
}
