use crate::path::{Path, Point};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Rgba { a, ..self }
    }

    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Pixel-addressed drawing operations. Sizes and coordinates are surface
/// pixels; text is laid out in whatever glyph cells the surface has.
pub trait Canvas {
    fn size(&self) -> (f64, f64);

    /// Covers the whole surface with a diagonal gradient.
    fn fill_gradient(&mut self, from: Rgba, to: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn fill_round_rect(&mut self, origin: Point, size: (f64, f64), radius: f64, color: Rgba);

    /// Strokes a path with round caps and joins.
    fn stroke_path(&mut self, path: &Path, width: f64, color: Rgba);

    /// Draws text with its top-left corner at `at`.
    fn text(&mut self, at: Point, text: &str, color: Rgba);

    fn text_width(&self, text: &str) -> f64;

    fn line_height(&self) -> f64;
}
