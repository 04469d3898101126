use crate::path::Point;
use crate::{Coords, GridInt};

/// Blends one axis from `a` to `b` on a ring of `size` cells. A move of
/// more than half the ring is taken as a wrap, so the blend goes through the
/// edge instead of across the board. The result is in `[0, size)`.
pub fn interp_wrap(a: GridInt, b: GridInt, size: GridInt, t: f64) -> f64 {
    let (mut a, mut b) = (a, b);
    let d = b - a;
    if d.abs() * 2 > size {
        if d > 0 {
            a += size;
        } else {
            b += size;
        }
    }

    let (a, b) = (a as f64, b as f64);
    (a + (b - a) * t).rem_euclid(size as f64)
}

/// Interpolated grid-space position of every cell. `alpha` is clamped to
/// `[0, 1]`; 0 gives `previous`, 1 gives `current`.
pub fn interpolate<'a>(
    previous: &'a [Coords],
    current: &'a [Coords],
    dims: Coords,
    alpha: f64,
) -> impl Iterator<Item = Point> + 'a {
    let t = alpha.clamp(0.0, 1.0);
    previous.iter().zip(current).map(move |(p, c)| {
        Point::new(interp_wrap(p.0, c.0, dims.0, t), interp_wrap(p.1, c.1, dims.1, t))
    })
}
