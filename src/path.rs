use std::ops::{Add, Mul, Sub};

use crate::Coords;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Tile size and board offset for one surface size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    pub tile: f64,
    pub offset: Point,
    pub dims: Coords,
}

impl Layout {
    /// Largest whole tile that fits the board, but never below `min_tile`;
    /// the board is centered.
    pub fn fit(surface: (f64, f64), dims: Coords, min_tile: f64) -> Self {
        let (w, h) = surface;
        let fit = (w / dims.0 as f64).floor().min((h / dims.1 as f64).floor());
        let tile = fit.max(min_tile);
        let offset = Point::new(
            ((w - dims.0 as f64 * tile) / 2.0).floor(),
            ((h - dims.1 as f64 * tile) / 2.0).floor(),
        );
        Layout { tile, offset, dims }
    }

    /// Center of a (possibly fractional) grid position.
    pub fn to_screen(&self, grid: Point) -> Point {
        self.offset + Point::new(grid.x + 0.5, grid.y + 0.5) * self.tile
    }

    pub fn cell_origin(&self, cell: Coords) -> Point {
        self.offset + Point::new(cell.0 as f64, cell.1 as f64) * self.tile
    }

    pub fn board_size(&self) -> (f64, f64) {
        (self.dims.0 as f64 * self.tile, self.dims.1 as f64 * self.tile)
    }
}

/// Breaks a point run wherever consecutive points are more than `threshold`
/// apart on either axis. Every input point lands in exactly one segment;
/// single-point segments are kept.
pub fn split_segments<I>(points: I, threshold: f64) -> Vec<Vec<Point>>
where
    I: IntoIterator<Item = Point>,
{
    let mut segments = Vec::new();
    let mut cur: Vec<Point> = Vec::new();

    for p in points {
        if let Some(&last) = cur.last() {
            let dx = (p.x - last.x).abs();
            let dy = (p.y - last.y).abs();
            if dx > threshold || dy > threshold {
                segments.push(std::mem::take(&mut cur));
            }
        }
        cur.push(p);
    }

    if !cur.is_empty() {
        segments.push(cur);
    }
    segments
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve with a control point and an end point.
    QuadTo(Point, Point),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

const COLLINEAR_EPS: f64 = 1e-3;
const DEGENERATE_EPS: f64 = 1e-6;

impl Path {
    /// Polyline through `points` with every real corner replaced by a
    /// quadratic arc. The trim on each side is `corner_radius`, capped at
    /// half the shorter adjacent edge. `None` for fewer than two points.
    pub fn rounded(points: &[Point], corner_radius: f64) -> Option<Path> {
        let (first, rest) = points.split_first()?;
        let last = *rest.last()?;

        let mut cmds = vec![PathCmd::MoveTo(*first)];

        for w in points.windows(3) {
            let (p0, p1, p2) = (w[0], w[1], w[2]);
            let v1 = p1 - p0;
            let v2 = p2 - p1;
            let len1 = v1.length();
            let len2 = v2.length();

            if len1 < DEGENERATE_EPS || len2 < DEGENERATE_EPS {
                cmds.push(PathCmd::LineTo(p1));
                continue;
            }

            let u1 = v1 * (1.0 / len1);
            let u2 = v2 * (1.0 / len2);
            if (u1.dot(u2) - 1.0).abs() < COLLINEAR_EPS {
                cmds.push(PathCmd::LineTo(p1));
                continue;
            }

            let r = corner_radius.min(len1.min(len2) * 0.5);
            cmds.push(PathCmd::LineTo(p1 - u1 * r));
            cmds.push(PathCmd::QuadTo(p1, p1 + u2 * r));
        }

        cmds.push(PathCmd::LineTo(last));
        Some(Path { cmds })
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Polyline approximation; each curve becomes `curve_steps` segments.
    pub fn flatten(&self, curve_steps: usize) -> Vec<Point> {
        let steps = curve_steps.max(1);
        let mut out: Vec<Point> = Vec::with_capacity(self.cmds.len() + steps);

        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => out.push(p),
                PathCmd::QuadTo(ctrl, end) => {
                    let start = out.last().copied().unwrap_or(ctrl);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        let mt = 1.0 - t;
                        out.push(start * (mt * mt) + ctrl * (2.0 * mt * t) + end * (t * t));
                    }
                }
            }
        }
        out
    }
}

/// Rounded paths for every segment that has something to draw.
pub fn build_paths(segments: &[Vec<Point>], corner_radius: f64) -> Vec<Path> {
    segments
        .iter()
        .filter_map(|seg| Path::rounded(seg, corner_radius))
        .collect()
}
