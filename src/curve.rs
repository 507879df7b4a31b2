use rand::Rng;
use rand::distr::Distribution;

use crate::gauss::Normal;

/// Horizontal extent below which a segment is no longer subdivided.
/// Relative to the domain scale chosen by the caller; the built-in
/// series use unit-interval endpoints.
pub const SUBDIVISION_LIMIT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Parameters for one generated curve: endpoints, initial midpoint
/// noise variance, and the roughness exponent H. H near 1 gives a
/// smooth curve, H near 0 a rough one; values outside (0, 1) are not
/// rejected but degrade the variance decay pathologically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParameters {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub var: f64,
    pub h: f64,
}

/// Generate a fractional-Brownian-motion-like curve by recursive
/// midpoint displacement.
///
/// The returned polyline starts at `(x0, y0)`, ends at `(x1, y1)`, and
/// has non-decreasing x-coordinates. Only the y-coordinates depend on
/// the random stream; the subdivision pattern, and therefore the point
/// count, is fixed by the horizontal extent.
pub fn generate<R: Rng + ?Sized>(params: CurveParameters, rng: &mut R) -> Vec<Point> {
    let mut points = Vec::new();
    points.push(Point::new(params.x0, params.y0));

    // Midpoint noise variance decays by 2^(2H) per subdivision level.
    let s = f64::powf(2.0, 2.0 * params.h);
    subdivide(
        params.x0, params.y0, params.x1, params.y1, params.var, s, rng, &mut points,
    );
    points
}

#[allow(clippy::too_many_arguments)]
fn subdivide<R: Rng + ?Sized>(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    var: f64,
    s: f64,
    rng: &mut R,
    points: &mut Vec<Point>,
) {
    if x1 - x0 < SUBDIVISION_LIMIT {
        points.push(Point::new(x1, y1));
        return;
    }

    let xm = (x0 + x1) / 2.0;
    let ym = (y0 + y1) / 2.0 + Normal::new(0.0, var.sqrt()).sample(rng);
    subdivide(x0, y0, xm, ym, var / s, s, rng, points);
    subdivide(xm, ym, x1, y1, var / s, s, rng, points);
}
