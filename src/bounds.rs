use itertools::{Itertools, MinMaxResult};

use crate::curve::Point;
use crate::frame::Viewport;

/// Fraction of the raw extent added as margin on each side of the
/// bounding box before mapping into pixel space.
pub const MARGIN_RATIO: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    #[inline]
    pub fn size(self) -> f64 {
        self.max - self.min
    }

    /// Expand by `ratio` of the extent on each side. Both margins come
    /// from the pre-expansion extent, so the expansion is symmetric and
    /// remapping an already-mapped interval reproduces it.
    #[inline]
    pub fn expanded(self, ratio: f64) -> Self {
        let margin = self.size() * ratio;
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Extent used when mapping into pixel space. A degenerate axis
    /// (all points equal) is treated as extent 1 so the division stays
    /// finite.
    #[inline]
    fn span(self) -> f64 {
        let size = self.size();
        if size > 0.0 { size } else { 1.0 }
    }

    fn from_minmax(minmax: MinMaxResult<f64>) -> Option<Self> {
        match minmax {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(a) => Some(Self { min: a, max: a }),
            MinMaxResult::MinMax(min, max) => Some(Self { min, max }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: Interval,
    pub y: Interval,
}

impl Bounds {
    /// Joint axis-aligned bounding box over every point of every curve,
    /// so all curves share one coordinate frame after normalization.
    /// `None` when there are no points at all.
    pub fn enclosing(curves: &[Vec<Point>]) -> Option<Self> {
        let x = Interval::from_minmax(curves.iter().flatten().map(|p| p.x).minmax())?;
        let y = Interval::from_minmax(curves.iter().flatten().map(|p| p.y).minmax())?;
        Some(Self { x, y })
    }

    pub fn expanded(self, ratio: f64) -> Self {
        Self {
            x: self.x.expanded(ratio),
            y: self.y.expanded(ratio),
        }
    }
}

/// Map every point of every curve into the target rectangle, in place.
///
/// All curves are scaled against their joint bounding box expanded by
/// [`MARGIN_RATIO`] per axis. The x and y axes scale independently to
/// fill the rectangle, and y is flipped so increasing y in data space
/// moves upward on screen. Curve count and per-curve point counts are
/// unchanged.
pub fn normalize(curves: &mut [Vec<Point>], viewport: Viewport) {
    let Some(bounds) = Bounds::enclosing(curves) else {
        return;
    };
    let bounds = bounds.expanded(MARGIN_RATIO);
    let (x_span, y_span) = (bounds.x.span(), bounds.y.span());

    for point in curves.iter_mut().flatten() {
        let x = (point.x - bounds.x.min) / x_span * viewport.width;
        let y = (point.y - bounds.y.min) / y_span * viewport.height;
        *point = Point::new(x, viewport.height - y);
    }
}
