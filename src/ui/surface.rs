//! Paints a drawing surface into a ratatui canvas

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle},
        Block,
    },
    Frame,
};

use crate::scene::Surface;
use crate::theme::parse_hex_color;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Upper bound on rings painted per circle
const MAX_RINGS: usize = 256;

/// Radii of the concentric rings that approximate a filled disc
fn ring_radii(radius: f64, dot: f64) -> impl Iterator<Item = f64> {
    let rings = if radius.is_finite() && radius > 0.0 && dot > 0.0 {
        ((radius / dot).ceil() as usize).clamp(1, MAX_RINGS)
    } else {
        0
    };
    let spacing = if rings > 0 { radius / rings as f64 } else { 0.0 };
    (0..rings).map(move |i| radius - i as f64 * spacing)
}

/// Canvas bounds that show the whole surface with round circles
///
/// Surface y grows downward, canvas y grows upward; callers flip `cy`.
pub fn fit_bounds(width: f64, height: f64, cols: u16, rows: u16) -> ([f64; 2], [f64; 2]) {
    if cols == 0 || rows == 0 {
        return ([0.0, width], [0.0, height]);
    }

    // Height in surface units that keeps x and y on the same physical scale
    let y_span = width * (rows as f64 * CELL_ASPECT) / cols as f64;
    if y_span >= height {
        let pad = (y_span - height) / 2.0;
        ([0.0, width], [-pad, height + pad])
    } else {
        let x_span = height * cols as f64 / (rows as f64 * CELL_ASPECT);
        let pad = (x_span - width) / 2.0;
        ([-pad, width + pad], [0.0, height])
    }
}

pub fn draw_surface(f: &mut Frame, surface: &Surface, now: Instant, block: Block, area: Rect) {
    let inner = block.inner(area);
    let (x_bounds, y_bounds) = fit_bounds(surface.width, surface.height, inner.width, inner.height);

    // Braille gives 2 dots per cell horizontally
    let dot = (x_bounds[1] - x_bounds[0]) / (inner.width.max(1) as f64 * 2.0);

    let circles: Vec<(f64, f64, f64, Color)> = surface
        .circles()
        .iter()
        .map(|c| {
            let color = parse_hex_color(&c.fill).unwrap_or(Color::Magenta);
            (c.cx, surface.height - c.cy, c.radius_at(now), color)
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for &(x, y, radius, color) in &circles {
                for r in ring_radii(radius, dot) {
                    ctx.draw(&Circle { x, y, radius: r, color });
                }
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal_pads_x() {
        // 200 cols x 5 rows: 75 units down means 1500 units across
        let (x, y) = fit_bounds(500.0, 75.0, 200, 5);
        assert_eq!(y, [0.0, 75.0]);
        assert_eq!(x, [-500.0, 1000.0]);
    }

    #[test]
    fn test_tall_terminal_pads_y() {
        let (x, y) = fit_bounds(500.0, 75.0, 100, 40);
        assert_eq!(x, [0.0, 500.0]);
        // 40 rows * 2 / 100 cols * 500 = 400 units of height
        assert!((y[1] - y[0] - 400.0).abs() < 1e-9);
        assert!((y[0] + y[1] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_count_is_bounded() {
        assert_eq!(ring_radii(5.0, 1.0).collect::<Vec<_>>(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(ring_radii(1e20, 1.5).count(), MAX_RINGS);
        assert_eq!(ring_radii(0.2, 1.0).collect::<Vec<_>>(), vec![0.2]);
        assert_eq!(ring_radii(0.0, 1.0).count(), 0);
        assert_eq!(ring_radii(f64::INFINITY, 1.0).count(), 0);
        assert_eq!(ring_radii(5.0, 0.0).count(), 0);
    }

    #[test]
    fn test_huge_radius_draws_in_finite_time() {
        use crate::scene::CircleElement;
        use crate::transition::Animated;
        use ratatui::{backend::TestBackend, Terminal};

        let mut surface = Surface::new(500.0, 75.0);
        surface.append(CircleElement {
            cx: 250.0,
            cy: 37.5,
            fill: "#663399".to_string(),
            r: Animated::Fixed(1e20),
        });

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_surface(f, &surface, Instant::now(), Block::default(), area)
            })
            .unwrap();
    }

    #[test]
    fn test_zero_area() {
        assert_eq!(fit_bounds(500.0, 75.0, 0, 0), ([0.0, 500.0], [0.0, 75.0]));
    }
}
