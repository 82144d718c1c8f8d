//! Continuous linear scales.
//!
//! Every derived quantity of an onion (layer radii, cut boundaries, cut angles,
//! horizontal cut heights) is a linear map from an integer index domain onto a
//! geometric range.

use crate::float_types::Real;

/// Maps `domain[0]..domain[1]` linearly onto `range[0]..range[1]`.
///
/// Values outside the domain extrapolate; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [Real; 2],
    pub range: [Real; 2],
}

impl LinearScale {
    pub const fn new(domain: [Real; 2], range: [Real; 2]) -> Self {
        Self { domain, range }
    }

    /// Maps `value` from the domain into the range.
    ///
    /// A degenerate domain (both ends equal) maps everything to the start of the
    /// range, matching `t = 0`.
    pub fn apply(&self, value: Real) -> Real {
        let [d0, d1] = self.domain;
        let [a, b] = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.0 } else { (value - d0) / span };
        a * (1.0 - t) + b * t
    }

    /// Convenience for integer indices.
    #[inline]
    pub fn at(&self, index: usize) -> Real {
        self.apply(index as Real)
    }
}
