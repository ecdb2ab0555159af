//! SVG output

use std::time::Instant;

use super::fmt_num;
use crate::scene::{CircleElement, Surface};

fn circle_to_svg(circle: &CircleElement, now: Instant) -> String {
    format!(
        "<circle cx=\"{}\" cy=\"{}\" fill=\"{}\" r=\"{}\"/>",
        fmt_num(circle.cx),
        fmt_num(circle.cy),
        circle.fill,
        fmt_num(circle.radius_at(now))
    )
}

/// Render the surface as a standalone SVG document, sampled at `now`
pub fn to_svg(surface: &Surface, now: Instant) -> String {
    let mut svg = String::new();

    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
        fmt_num(surface.width),
        fmt_num(surface.height)
    ));

    for circle in surface.circles() {
        svg.push_str("  ");
        svg.push_str(&circle_to_svg(circle, now));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}
