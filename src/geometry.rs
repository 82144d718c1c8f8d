//! Closed-form area and intersection primitives.
//!
//! Everything here works in the first quadrant of a circle centred on the
//! origin. Radial cuts are straight lines through an apex at `(0, -depth)`, so
//! pieces are bounded by circular arcs, cut lines and (optionally) horizontal
//! lines, and each boundary has an exact antiderivative.

use crate::float_types::{Real, tolerance};
use nalgebra::Point2;
use serde::Serialize;

/// **Mathematical Foundation: Area Under a Circular Arc**
///
/// Returns ∫√(r² − x²) dx from `x1` to `x2`, i.e. the area of a vertical slice of
/// the quarter disk of radius `radius`.
///
/// Substituting `x = r·cos θ` gives the antiderivative
/// ```text
/// F(θ) = −½·r²·(θ − sin θ · cos θ),   θ = acos(x / r)
/// ```
///
/// `x2` is clamped to `radius` so `acos` never leaves its domain. Reversed bounds
/// (`x1 > x2`) give a negative area; callers composite pieces by signed
/// subtraction.
pub fn vertical_cut_area(radius: Real, x1: Real, x2: Real) -> Real {
    if x1 == x2 {
        return 0.0;
    }
    let x2 = x2.min(radius);

    let theta = |x: Real| (x / radius).acos();
    let antiderivative =
        |theta: Real| -0.5 * radius.powi(2) * (theta - theta.sin() * theta.cos());

    antiderivative(theta(x2)) - antiderivative(theta(x1))
}

/// Area of an annular wedge centred on the origin:
/// ∫∫ r dr dθ = ½·(r₂² − r₁²)·(θ₂ − θ₁).
///
/// Only meaningful for radial cuts whose apex sits at the centre.
pub fn radial_cut_area_polar(radius1: Real, radius2: Real, theta1: Real, theta2: Real) -> Real {
    0.5 * (radius2.powi(2) - radius1.powi(2)) * (theta2 - theta1)
}

/// Signed area under `y = slope·x + y_intercept` from `x1` to `x2`.
pub fn area_under_line(slope: Real, y_intercept: Real, x1: Real, x2: Real) -> Real {
    0.5 * slope * (x2.powi(2) - x1.powi(2)) + y_intercept * (x2 - x1)
}

/// Outcome of substituting a line into `x² + y² = r²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCircleIntersection {
    pub discriminant: Real,
    /// Tangency does not count as an intersection.
    pub does_intersect: bool,
}

/// Discriminant test for `y = slope·x + y_intercept` against a circle of `radius`.
pub fn line_circle_intersection(slope: Real, y_intercept: Real, radius: Real) -> LineCircleIntersection {
    let discriminant = y_intercept.powi(2) * slope.powi(2)
        - (slope.powi(2) + 1.0) * (y_intercept.powi(2) - radius.powi(2));

    LineCircleIntersection {
        discriminant,
        does_intersect: discriminant > 0.0,
    }
}

/// `true` only when `value` sits strictly inside `(min, max)` by more than the
/// crate [`tolerance`] on both sides.
///
/// Heights computed through `acos`/`sqrt` chains drift by ~1e-14, and a
/// horizontal line that lands on a piece's edge must not count as crossing it.
#[inline]
pub fn is_in_range(value: Real, min: Real, max: Real) -> bool {
    let tolerance = tolerance();
    value - min > tolerance && max - value > tolerance
}

/// Area between the arc of `layer_radius` and the horizontal line `y = cut_y`,
/// restricted to the column `cut_x..next_cut_x`.
///
/// The arc meets the line at `x* = √(r² − cut_y²)`; the column is truncated there
/// when the line leaves the circle before `next_cut_x`.
pub fn vertical_cut_area_above_horizontal_line(
    layer_radius: Real,
    cut_y: Real,
    cut_x: Real,
    next_cut_x: Real,
) -> Real {
    let x_star = (layer_radius.powi(2) - cut_y.powi(2)).sqrt().min(next_cut_x);

    vertical_cut_area(layer_radius, cut_x, x_star) - (x_star - cut_x) * cut_y
}

/// Polar coordinates with θ measured clockwise from the positive y-axis.
pub fn polar_to_cartesian(r: Real, theta: Real) -> Point2<Real> {
    Point2::new(r * theta.sin(), r * theta.cos())
}

/// A straight cut `y = slope·x + y_intercept`.
///
/// Radial cuts all pass through the apex `(0, -depth)`, so their intercept is
/// `-depth`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutLine {
    pub slope: Real,
    pub y_intercept: Real,
}

impl CutLine {
    pub const fn new(slope: Real, y_intercept: Real) -> Self {
        Self { slope, y_intercept }
    }

    /// The line through the apex `(0, -depth)` and the point at angle `theta`
    /// (measured from the x-axis) on the circle of `radius` centred at the origin.
    pub fn through_apex(depth: Real, radius: Real, theta: Real) -> Self {
        let slope = (depth + radius * theta.sin()) / (radius * theta.cos());
        Self::new(slope, -depth)
    }

    #[inline]
    pub fn y_at(&self, x: Real) -> Real {
        self.slope * x + self.y_intercept
    }

    /// The x where the line reaches height `y`.
    #[inline]
    pub fn x_at(&self, y: Real) -> Real {
        (y - self.y_intercept) / self.slope
    }

    /// Signed area under the line from `x1` to `x2`.
    #[inline]
    pub fn area_under(&self, x1: Real, x2: Real) -> Real {
        area_under_line(self.slope, self.y_intercept, x1, x2)
    }

    /// Where the line leaves the circle of `radius` in the first quadrant.
    ///
    /// Takes the `+√discriminant` root and keeps it only if both coordinates are
    /// positive; anything else (no intersection, tangency, or a crossing below the
    /// x-axis) returns `None`.
    pub fn circle_intersection(&self, radius: Real) -> Option<Point2<Real>> {
        let LineCircleIntersection {
            discriminant,
            does_intersect,
        } = line_circle_intersection(self.slope, self.y_intercept, radius);
        if !does_intersect {
            return None;
        }

        let x = (-self.y_intercept * self.slope + discriminant.sqrt()) / (self.slope.powi(2) + 1.0);
        let y = self.y_at(x);

        (x > 0.0 && y > 0.0).then(|| Point2::new(x, y))
    }
}

/// Height of the arc of `radius` at `x`, or 0 where the arc does not reach.
#[inline]
pub(crate) fn arc_height(radius: Real, x: Real) -> Real {
    let height = (radius.powi(2) - x.powi(2)).sqrt();
    if height.is_nan() { 0.0 } else { height }
}
