// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized boundary tolerance used by [`crate::geometry::is_in_range`].
/// Chained `acos`/`sqrt` subtractions land boundary values ~1e-14 away from where
/// they belong, so comparisons against cut lines need a little slack. Can be overridden:
///  1) **Build-time**: set env var `ONION_TOLERANCE` (e.g. `ONION_TOLERANCE=1e-12 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    3e-14
}

/// Returns the current boundary tolerance.
/// If not set yet, it tries `ONION_TOLERANCE` (parsed as `Real`) and
/// falls back to `3e-14`.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("ONION_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `onion::float_types::set_tolerance(1e-12);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// Area of one quadrant of a disk of the given radius.
#[inline]
pub fn quadrant_area(radius: Real) -> Real {
    PI * radius * radius / 4.0
}
