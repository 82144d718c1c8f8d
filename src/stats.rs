//! Evenness statistics over piece areas.
//!
//! The evenness score of a configuration is the relative standard deviation
//! (RSD) of its leaf piece areas: sample standard deviation over mean, as a
//! percentage. Lower is more even.

use crate::float_types::Real;
use crate::partition::LeafAreas;
use core::cmp::Ordering::Equal;
use serde::{Deserialize, Serialize};

/// Flattens a partition into one list of leaf areas, sub-pieces substituted
/// for the pieces they split.
pub fn flatten<P: LeafAreas + ?Sized>(partition: &P) -> Vec<Real> {
    partition.leaf_areas()
}

/// Arithmetic mean; 0 for an empty list.
pub fn mean(values: &[Real]) -> Real {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<Real>() / values.len() as Real
}

/// Sample standard deviation `√(Σ(x − mean)² / (n − 1))`.
///
/// Fewer than two values have no spread and give 0.
pub fn standard_deviation(values: &[Real]) -> Real {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let sum_of_squares: Real = values.iter().map(|value| (value - mean).powi(2)).sum();
    (sum_of_squares / (n - 1) as Real).sqrt()
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: Real, decimals: u32) -> Real {
    let factor = (10.0 as Real).powi(decimals as i32);
    (value * factor).round() / factor
}

/// Unrounded RSD in percent. 0 when the mean is 0.
pub fn relative_standard_deviation_exact(values: &[Real]) -> Real {
    let mean = mean(values);
    if mean == 0.0 {
        return 0.0;
    }
    standard_deviation(values) / mean * 100.0
}

/// RSD in percent, rounded to `decimals` places (1 for display, 3 for tables).
pub fn relative_standard_deviation(values: &[Real], decimals: u32) -> Real {
    round_to(relative_standard_deviation_exact(values), decimals)
}

/// Five-number summary of a set of RSD values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min: Real,
    pub q1: Real,
    pub median: Real,
    pub q3: Real,
    pub max: Real,
}

/// Coarse evenness bucket relative to a [`Summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evenness {
    VeryEven,
    Even,
    Uneven,
    VeryUneven,
}

impl Summary {
    /// Summarizes `values`, ignoring non-finite entries. `None` when nothing is left.
    pub fn from_values(values: &[Real]) -> Option<Self> {
        let mut sorted: Vec<Real> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));

        Some(Self {
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Buckets are closed on the right: a value equal to Q1 is still very even.
    pub fn classify(&self, rsd: Real) -> Evenness {
        if rsd <= self.q1 {
            Evenness::VeryEven
        } else if rsd <= self.median {
            Evenness::Even
        } else if rsd <= self.q3 {
            Evenness::Uneven
        } else {
            Evenness::VeryUneven
        }
    }
}

/// Linear-interpolation quantile of already sorted values: rank `(n − 1)·p`.
pub fn quantile_sorted(sorted: &[Real], p: Real) -> Real {
    match sorted.len() {
        0 => Real::NAN,
        1 => sorted[0],
        n => {
            let rank = (n - 1) as Real * p.clamp(0.0, 1.0);
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as Real;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}
