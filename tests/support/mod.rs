//! Test support library
//! Independent area estimates to check the closed-form integrals against.

#![allow(dead_code)]

use geo::{Area, LineString, Polygon};
use onion::float_types::Real;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Relative comparison for areas that may be large.
pub fn approx_eq_rel(a: Real, b: Real, rel: Real) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs())
}

/// Height of the circle of `radius` above `x`, 0 outside it.
pub fn arc_y(radius: Real, x: Real) -> Real {
    (radius * radius - x * x).max(0.0).sqrt()
}

/// Points along the circle of `radius` from `x_from` to `x_to`, sampled evenly in
/// angle so the vertical tangent at `x = radius` stays accurate.
pub fn arc_points(radius: Real, x_from: Real, x_to: Real, samples: usize) -> Vec<(Real, Real)> {
    let start = (x_from / radius).clamp(-1.0, 1.0).acos();
    let end = (x_to / radius).clamp(-1.0, 1.0).acos();
    (0..=samples)
        .map(|i| {
            let theta = start + (end - start) * i as Real / samples as Real;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Region of the column `[x_left, x_right]` between the circles `inner` (if any)
/// and `outer`, in the first quadrant.
pub fn column_polygon(inner: Option<Real>, outer: Real, x_left: Real, x_right: Real) -> Polygon<Real> {
    const SAMPLES: usize = 4096;
    let x_end = x_right.min(outer);
    let mut ring = arc_points(outer, x_left, x_end, SAMPLES);

    match inner {
        Some(inner) if inner >= x_end => ring.extend(arc_points(inner, x_end, x_left, SAMPLES)),
        Some(inner) if inner > x_left => {
            ring.push((x_end, 0.0));
            ring.extend(arc_points(inner, inner, x_left, SAMPLES));
        },
        _ => {
            ring.push((x_end, 0.0));
            ring.push((x_left, 0.0));
        },
    }

    Polygon::new(LineString::from(ring), vec![])
}

/// Annular sector between `inner` and `outer` and the angles `theta_low < theta_high`.
pub fn sector_polygon(inner: Real, outer: Real, theta_low: Real, theta_high: Real) -> Polygon<Real> {
    const SAMPLES: usize = 4096;
    let arc = |radius: Real, from: Real, to: Real| {
        (0..=SAMPLES).map(move |i| {
            let theta = from + (to - from) * i as Real / SAMPLES as Real;
            (radius * theta.cos(), radius * theta.sin())
        })
    };
    let mut ring: Vec<(Real, Real)> = arc(outer, theta_low, theta_high).collect();
    if inner > 0.0 {
        ring.extend(arc(inner, theta_high, theta_low));
    } else {
        ring.push((0.0, 0.0));
    }
    Polygon::new(LineString::from(ring), vec![])
}

pub fn polygon_area(polygon: &Polygon<Real>) -> Real {
    polygon.unsigned_area()
}

/// Midpoint-rule estimate of region areas on an `n × n` grid over the quadrant.
///
/// `classify` maps a point to a region id, or `None` to leave it out. Returns the
/// estimated area of every id seen.
pub fn sample_quadrant<F>(radius: Real, n: usize, mut classify: F) -> std::collections::BTreeMap<(usize, usize, usize), Real>
where
    F: FnMut(Real, Real) -> Option<(usize, usize, usize)>,
{
    let h = radius / n as Real;
    let cell = h * h;
    let mut areas = std::collections::BTreeMap::new();
    for i in 0..n {
        let x = (i as Real + 0.5) * h;
        for j in 0..n {
            let y = (j as Real + 0.5) * h;
            if x * x + y * y >= radius * radius {
                break;
            }
            if let Some(id) = classify(x, y) {
                *areas.entry(id).or_insert(0.0) += cell;
            }
        }
    }
    areas
}

/// Index of the layer containing `(x, y)`.
pub fn layer_of(layer_radii: &[Real], x: Real, y: Real) -> Option<usize> {
    let r2 = x * x + y * y;
    layer_radii.iter().position(|&radius| r2 < radius * radius)
}
