//! Vector illustration of the gallows and the hanged figure.
//!
//! Coordinates use a y-up frame where the ground sits at `y = 0` and the top
//! beam at `y = 13`; [`render_svg`] flips it for SVG output.

use std::fmt::Write;

use crate::hangman::MAX_LIVES;

const SVG_STROKE_SCALE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Line,
    Circle,
}

/// A plotted shape: a segment from `(x0, y0)` to `(x1, y1)`, or a circle
/// inscribed in that bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub width: f64,
}

const fn line(x0: f64, y0: f64, x1: f64, y1: f64, width: f64) -> Shape {
    Shape {
        kind: ShapeKind::Line,
        x0,
        y0,
        x1,
        y1,
        width,
    }
}

const fn circle(x0: f64, y0: f64, x1: f64, y1: f64, width: f64) -> Shape {
    Shape {
        kind: ShapeKind::Circle,
        x0,
        y0,
        x1,
        y1,
        width,
    }
}

pub const GALLOWS: [Shape; 4] = [
    line(-1.0, 0.0, 6.0, 0.0, 20.0),   // ground
    line(5.0, 0.0, 5.0, 13.0, 6.0),    // post
    line(5.0, 13.0, 0.0, 13.0, 12.0),  // beam
    line(0.0, 13.0, 0.0, 11.0, 6.0),   // rope
];

/// Figure parts in the order they appear as lives are lost
pub const FIGURE: [Shape; MAX_LIVES as usize] = [
    circle(-1.0, 9.0, 1.0, 11.0, 4.0), // head
    line(0.0, 9.0, 0.0, 5.0, 4.0),     // body
    line(0.0, 8.0, -2.0, 6.0, 4.0),    // left arm
    line(0.0, 8.0, 2.0, 6.0, 4.0),     // right arm
    line(0.0, 5.0, -2.0, 3.0, 4.0),    // left leg
    line(0.0, 5.0, 2.0, 3.0, 4.0),     // right leg
];

pub fn figure_parts(lives_remaining: u8) -> &'static [Shape] {
    let lost = MAX_LIVES.saturating_sub(lives_remaining) as usize;
    &FIGURE[..lost]
}

pub fn shapes(lives_remaining: u8) -> Vec<Shape> {
    GALLOWS
        .iter()
        .chain(figure_parts(lives_remaining))
        .copied()
        .collect()
}

pub fn render_svg(lives_remaining: u8) -> String {
    let mut svg = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-3 -14 10 15" role="img" aria-label="Pendu">"#,
    );
    svg.push_str(
        r#"<g transform="scale(1,-1)" stroke="black" fill="none" stroke-linecap="round">"#,
    );

    for shape in shapes(lives_remaining) {
        let stroke = shape.width * SVG_STROKE_SCALE;
        // Writing into a String cannot fail
        let _ = match shape.kind {
            ShapeKind::Line => write!(
                svg,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}"/>"#,
                shape.x0, shape.y0, shape.x1, shape.y1, stroke
            ),
            ShapeKind::Circle => write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" stroke-width="{}"/>"#,
                (shape.x0 + shape.x1) / 2.0,
                (shape.y0 + shape.y1) / 2.0,
                (shape.x1 - shape.x0).abs() / 2.0,
                stroke
            ),
        };
    }

    svg.push_str("</g></svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lives_draws_only_gallows() {
        assert!(figure_parts(MAX_LIVES).is_empty());
        assert_eq!(shapes(MAX_LIVES), GALLOWS.to_vec());
    }

    #[test]
    fn test_parts_appear_head_first() {
        let parts = figure_parts(MAX_LIVES - 1);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].kind, ShapeKind::Circle);

        let parts = figure_parts(MAX_LIVES - 2);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1], FIGURE[1]);
    }

    #[test]
    fn test_no_lives_draws_everything() {
        assert_eq!(figure_parts(0).len(), FIGURE.len());
        assert_eq!(shapes(0).len(), GALLOWS.len() + FIGURE.len());
    }

    #[test]
    fn test_svg_output() {
        let svg = render_svg(MAX_LIVES);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 4);
        assert!(!svg.contains("<circle"));

        let svg = render_svg(0);
        assert_eq!(svg.matches("<line").count(), 9);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains(r#"<circle cx="0" cy="10" r="1""#));
    }
}
