//! Turns the sampled grid and the particle pool into [`Painter`] calls.

use glam::Vec2;

use crate::arrow::Arrow;
use crate::color::{magnitude_color, Rgba, Srgb};
use crate::draw::Painter;
use crate::field::VectorField;
use crate::geometry::GridGeometry;
use crate::particles::ParticlePool;

/// Stroke and sizing for field arrows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    /// Longest arrow, reached by the strongest cell.
    pub max_length: f32,
    pub thickness: f32,
}

/// Draws one arrow per grid cell, colored and scaled by normalized magnitude.
///
/// Cells whose vector is below the magnitude epsilon are skipped.
pub fn draw_field<P: Painter + ?Sized>(
    painter: &mut P,
    field: &VectorField,
    geometry: &GridGeometry,
    style: ArrowStyle,
) {
    let scale = field.display_scale();
    for (row, col, v) in field.iter() {
        let Some(arrow) = Arrow::for_vector(geometry.cell_center(row, col), v, scale, style.max_length)
        else {
            continue;
        };
        let t = (v.length() / scale).min(1.0);
        let color = magnitude_color(t).opaque();
        painter.line(arrow.tail, arrow.tip, style.thickness, color);
        let [a, b, c] = arrow.head;
        painter.triangle(a, b, c, color);
    }
}

/// Draws the white panel and outline behind the grid.
pub fn draw_grid_frame<P: Painter + ?Sized>(
    painter: &mut P,
    geometry: &GridGeometry,
    panel: Srgb,
    outline: Srgb,
) {
    painter.fill_rect(geometry.origin(), geometry.size(), panel.opaque());
    painter.stroke_rect(geometry.origin(), geometry.size(), 1.0, outline.opaque());
}

/// Draws every active particle as a circle fading out with age.
pub fn draw_particles<P: Painter + ?Sized>(
    painter: &mut P,
    pool: &ParticlePool,
    radius: f32,
    color: Srgb,
) {
    for p in pool.iter_active() {
        painter.circle(p.position, radius, color.with_alpha(p.fade_alpha()));
    }
}

/// Draws lines of text top-down starting at `origin`.
pub fn draw_text_block<P: Painter + ?Sized>(
    painter: &mut P,
    lines: &[String],
    origin: Vec2,
    font_size: f32,
    color: Rgba,
) {
    let step = Vec2::new(0.0, font_size * 1.2);
    for (i, line) in lines.iter().enumerate() {
        painter.text(line, origin + step * i as f32, font_size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CommandList;
    use crate::field_kind::FieldKind;

    const STYLE: ArrowStyle = ArrowStyle {
        max_length: 19.0,
        thickness: 2.0,
    };

    fn geometry(rows: usize, cols: usize) -> GridGeometry {
        GridGeometry::new(rows, cols, 25.0, 50.0).unwrap()
    }

    #[test]
    fn uniform_two_by_two_draws_four_identical_red_arrows() {
        let g = geometry(2, 2);
        let field = VectorField::sampled(2, 2, FieldKind::Uniform).unwrap();
        let mut list = CommandList::new();
        draw_field(&mut list, &field, &g, STYLE);

        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(list.triangles().count(), 4);

        let red = magnitude_color(1.0).opaque();
        let first_delta = lines[0].1 - lines[0].0;
        for (from, to, color) in &lines {
            assert_eq!(*color, red);
            let delta = *to - *from;
            assert!((delta - first_delta).length() < 1e-4);
            // Right and slightly down in screen space.
            assert!(delta.x > 0.0 && delta.y > 0.0 && delta.y < delta.x);
            assert!((delta.length() - STYLE.max_length).abs() < 1e-4);
        }
    }

    #[test]
    fn arrows_never_exceed_max_length_and_strongest_reaches_it() {
        let g = geometry(6, 9);
        for kind in FieldKind::ALL {
            let field = VectorField::sampled(6, 9, kind).unwrap();
            let scale = field.display_scale();
            let mut longest: f32 = 0.0;
            for (row, col, v) in field.iter() {
                if let Some(arrow) = Arrow::for_vector(g.cell_center(row, col), v, scale, STYLE.max_length) {
                    assert!(arrow.length <= STYLE.max_length);
                    longest = longest.max(arrow.length);
                }
            }
            assert_eq!(longest, STYLE.max_length, "{kind}");
        }
    }

    #[test]
    fn arrows_are_centered_on_their_cells() {
        let g = geometry(3, 3);
        let field = VectorField::sampled(3, 3, FieldKind::Vortex).unwrap();
        let mut list = CommandList::new();
        draw_field(&mut list, &field, &g, STYLE);
        let centers: Vec<Vec2> = list.lines().map(|(a, b, _)| (a + b) / 2.0).collect();
        for c in centers {
            let local = (c - g.origin()) / g.cell_size() - Vec2::splat(0.5);
            assert!((local - local.round()).length() < 1e-3, "{c} not at a cell center");
        }
    }

    #[test]
    fn zero_vectors_are_skipped() {
        // The 3x3 radial grid has no cell at the exact origin, but a 2x2 saddle
        // grid does: cell (1, 1) samples (0, 0).
        let g = geometry(2, 2);
        let field = VectorField::sampled(2, 2, FieldKind::Saddle).unwrap();
        let mut list = CommandList::new();
        draw_field(&mut list, &field, &g, STYLE);
        assert_eq!(list.lines().count(), 3);
        assert_eq!(list.triangles().count(), 3);
    }

    #[test]
    fn all_zero_grid_draws_nothing() {
        let g = geometry(3, 3);
        let field = VectorField::new(3, 3).unwrap();
        let mut list = CommandList::new();
        draw_field(&mut list, &field, &g, STYLE);
        assert!(list.is_empty());
    }

    #[test]
    fn weaker_cells_are_bluer() {
        let g = geometry(4, 4);
        let field = VectorField::sampled(4, 4, FieldKind::Radial).unwrap();
        let mut list = CommandList::new();
        draw_field(&mut list, &field, &g, STYLE);
        // Cell (0, 0) is the strongest; (2, 1) samples (-0.5, 0) and is weaker.
        let colors: Vec<Rgba> = list.lines().map(|(_, _, c)| c).collect();
        let strongest = colors[0];
        assert_eq!(strongest, magnitude_color(1.0).opaque());
        let weaker = colors.iter().find(|c| c.b > strongest.b).copied();
        assert!(weaker.is_some());
    }

    #[test]
    fn particles_fade_with_age() {
        let mut pool = ParticlePool::new(3).unwrap();
        pool.spawn(Vec2::new(60.0, 60.0), 2.0);
        pool.spawn(Vec2::new(70.0, 70.0), 2.0);
        let g = geometry(4, 4);
        pool.update(1.0, FieldKind::Uniform, &g, 0.0);
        pool.spawn(Vec2::new(80.0, 80.0), 2.0);

        let mut list = CommandList::new();
        draw_particles(&mut list, &pool, 2.5, Srgb::BLACK);
        let circles: Vec<_> = list.circles().collect();
        assert_eq!(circles.len(), 3);
        assert_eq!(circles[0].2.to_rgba8()[3], 127);
        assert_eq!(circles[2].2.to_rgba8()[3], 255);
        assert!(circles.iter().all(|(_, r, _)| *r == 2.5));
    }

    #[test]
    fn inactive_particles_are_not_drawn() {
        let pool = ParticlePool::new(10).unwrap();
        let mut list = CommandList::new();
        draw_particles(&mut list, &pool, 2.0, Srgb::BLACK);
        assert!(list.is_empty());
    }

    #[test]
    fn grid_frame_is_panel_then_outline() {
        let g = geometry(2, 2);
        let mut list = CommandList::new();
        draw_grid_frame(&mut list, &g, Srgb::WHITE, Srgb::BLACK);
        assert_eq!(list.len(), 2);
        assert!(matches!(
            list.commands()[0],
            crate::draw::DrawCommand::FillRect { .. }
        ));
        assert!(matches!(
            list.commands()[1],
            crate::draw::DrawCommand::StrokeRect { .. }
        ));
    }

    #[test]
    fn text_block_stacks_lines() {
        let mut list = CommandList::new();
        let lines = vec!["one".to_string(), "two".to_string()];
        draw_text_block(&mut list, &lines, Vec2::new(10.0, 10.0), 20.0, Srgb::BLACK.opaque());
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["one", "two"]);
        let positions: Vec<Vec2> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                crate::draw::DrawCommand::Text { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert!((positions[1].y - positions[0].y - 24.0).abs() < 1e-3);
    }
}
