//! Software framebuffer for character-cell terminals.
//!
//! Every terminal cell shows two stacked pixels through the upper half block
//! glyph: the foreground paints the top pixel, the background the bottom
//! one. A separate text layer overrides whole cells.
use crate::canvas::{Canvas, Rgba};
use crate::path::{Path, Point};

pub const HALF_BLOCK: char = '\u{2580}';
const CURVE_STEPS: usize = 6;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    fn blend(self, src: Rgba) -> Rgb {
        let a = src.a as u32;
        let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
        Rgb {
            r: mix(self.r, src.r),
            g: mix(self.g, src.g),
            b: mix(self.b, src.b),
        }
    }

    fn average(self, other: Rgb) -> Rgb {
        let avg = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Rgb {
            r: avg(self.r, other.r),
            g: avg(self.g, other.g),
            b: avg(self.b, other.b),
        }
    }
}

/// What a terminal cell should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

// Fills at least this opaque hide text underneath them.
const TEXT_COVER_ALPHA: u8 = 128;

pub struct Framebuffer {
    cols: usize,
    rows: usize,
    pixels: Vec<Rgb>,
    text: Vec<Option<(char, Rgb)>>,
}

impl Framebuffer {
    /// A buffer for `cols` x `rows` terminal cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Framebuffer {
            cols,
            rows,
            pixels: vec![Rgb::default(); cols * rows * 2],
            text: vec![None; cols * rows],
        }
    }

    pub fn cells(&self) -> (u16, u16) {
        (self.cols as u16, self.rows as u16)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.cells() != (cols, rows) {
            *self = Framebuffer::new(cols, rows);
        }
    }

    fn width(&self) -> usize {
        self.cols
    }

    fn height(&self) -> usize {
        self.rows * 2
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.cols + x]
    }

    pub fn glyph(&self, col: usize, row: usize) -> Glyph {
        let top = self.pixel(col, row * 2);
        let bottom = self.pixel(col, row * 2 + 1);
        match self.text[row * self.cols + col] {
            Some((ch, fg)) => Glyph { ch, fg, bg: top.average(bottom) },
            None => Glyph { ch: HALF_BLOCK, fg: top, bg: bottom },
        }
    }

    pub fn text_at(&self, col: usize, row: usize) -> Option<char> {
        self.text[row * self.cols + col].map(|(ch, _)| ch)
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let i = y * self.cols + x;
        self.pixels[i] = self.pixels[i].blend(color);
        if color.a >= TEXT_COVER_ALPHA {
            self.text[(y / 2) * self.cols + x] = None;
        }
    }

    /// Clamped pixel range covering `[lo, hi]` on an axis of `len` pixels.
    fn span(lo: f64, hi: f64, len: usize) -> std::ops::Range<usize> {
        let start = lo.floor().max(0.0) as usize;
        let end = (hi.ceil().max(0.0) as usize).min(len);
        start.min(end)..end
    }

    /// Blends `color` into every pixel whose center passes `inside`, within
    /// the given bounding box.
    fn fill_where<F>(&mut self, min: Point, max: Point, color: Rgba, inside: F) -> bool
    where
        F: Fn(Point) -> bool,
    {
        let mut hit = false;
        for y in Self::span(min.y, max.y, self.height()) {
            for x in Self::span(min.x, max.x, self.width()) {
                if inside(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.blend(x, y, color);
                    hit = true;
                }
            }
        }
        hit
    }

    fn plot(&mut self, p: Point, color: Rgba) {
        if p.x >= 0.0 && p.y >= 0.0 && (p.x as usize) < self.width() && (p.y as usize) < self.height() {
            self.blend(p.x as usize, p.y as usize, color);
        }
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 == 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

impl Canvas for Framebuffer {
    fn size(&self) -> (f64, f64) {
        (self.width() as f64, self.height() as f64)
    }

    fn fill_gradient(&mut self, from: Rgba, to: Rgba) {
        let (w, h) = (self.width(), self.height());
        for y in 0..h {
            for x in 0..w {
                let t = (x as f64 / w.max(1) as f64 + y as f64 / h.max(1) as f64) / 2.0;
                self.blend(x, y, from.lerp(to, t));
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let r = radius.max(0.0);
        let min = Point::new(center.x - r, center.y - r);
        let max = Point::new(center.x + r, center.y + r);
        if !self.fill_where(min, max, color, |p| (p - center).length() <= r) {
            self.plot(center, color);
        }
    }

    fn fill_round_rect(&mut self, origin: Point, size: (f64, f64), radius: f64, color: Rgba) {
        let (w, h) = size;
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let max = Point::new(origin.x + w, origin.y + h);
        self.fill_where(origin, max, color, |p| {
            let cx = p.x.clamp(origin.x + r, max.x - r);
            let cy = p.y.clamp(origin.y + r, max.y - r);
            (p - Point::new(cx, cy)).length() <= r
        });
    }

    fn stroke_path(&mut self, path: &Path, width: f64, color: Rgba) {
        let line = path.flatten(CURVE_STEPS);
        if line.is_empty() {
            return;
        }
        let r = (width / 2.0).max(0.5);

        let mut min = line[0];
        let mut max = line[0];
        for p in &line {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        let pad = Point::new(r, r);

        // One coverage pass so overlapping pieces do not double-blend.
        let pieces: Vec<(Point, Point)> = if line.len() == 1 {
            vec![(line[0], line[0])]
        } else {
            line.windows(2).map(|w| (w[0], w[1])).collect()
        };
        self.fill_where(min - pad, max + pad, color, |p| {
            pieces.iter().any(|&(a, b)| segment_distance(p, a, b) <= r)
        });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba) {
        if at.y < 0.0 || at.x.is_nan() {
            return;
        }
        let row = (at.y / 2.0).floor() as usize;
        if row >= self.rows {
            return;
        }
        let fg = Rgb::default().blend(color.with_alpha(255));
        let start = at.x.floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 || col as usize >= self.cols {
                continue;
            }
            let slot = &mut self.text[row * self.cols + col as usize];
            *slot = if ch == ' ' { None } else { Some((ch, fg)) };
        }
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64
    }

    fn line_height(&self) -> f64 {
        2.0
    }
}
