//! Partition builders.
//!
//! A partition is the piece tree of one quadrant of an onion: every layer is
//! intersected with every cut, and pieces crossed by horizontal lines carry their
//! top-to-bottom sub-piece areas.

pub mod radial;
pub mod vertical;

pub use radial::{RadialLayer, RadialPartition, RadialPiece};
pub use vertical::{VerticalColumn, VerticalPartition, VerticalPiece};

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::onion::MAX_HORIZONTAL_CUTS;
use serde::Serialize;

/// Absolute heights of the horizontal lines, highest first.
///
/// Holds at most [`MAX_HORIZONTAL_CUTS`] lines, the most one piece can be split by.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizontalCuts {
    ys: [Real; MAX_HORIZONTAL_CUTS],
    len: usize,
}

impl HorizontalCuts {
    pub const fn none() -> Self {
        Self {
            ys: [0.0; MAX_HORIZONTAL_CUTS],
            len: 0,
        }
    }

    /// Fails with [`ValidationError::TooManyHorizontalCuts`] past the cap.
    pub fn new(ys: &[Real]) -> Result<Self, ValidationError> {
        if ys.len() > MAX_HORIZONTAL_CUTS {
            return Err(ValidationError::TooManyHorizontalCuts {
                got: ys.len(),
                max: MAX_HORIZONTAL_CUTS,
            });
        }
        let mut cuts = Self::none();
        cuts.ys[..ys.len()].copy_from_slice(ys);
        cuts.len = ys.len();
        Ok(cuts)
    }

    /// For heights already bounded by a validated configuration.
    pub(crate) fn from_validated(ys: impl IntoIterator<Item = Real>) -> Self {
        let mut cuts = Self::none();
        for (slot, y) in cuts.ys.iter_mut().zip(ys) {
            *slot = y;
            cuts.len += 1;
        }
        cuts
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.ys[..self.len]
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Ordered sub-areas of a piece that horizontal lines cross, top first.
///
/// At most two lines cross any one piece, so a piece has one, two or three
/// leaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "split", rename_all = "snake_case")]
pub enum SubPieces {
    Whole,
    Halves { top: Real, bottom: Real },
    Thirds { top: Real, middle: Real, bottom: Real },
}

impl SubPieces {
    /// Splits a piece of `area` given, for every horizontal line that crosses it
    /// (highest line first), the part of the piece lying above that line.
    ///
    /// The second line's "above" area already contains the top sub-piece, so the
    /// middle is the difference of the two and the bottom is what remains. The
    /// builders take [`HorizontalCuts`], so no piece sees more than two lines.
    pub fn split(area: Real, areas_above: &[Real]) -> Self {
        debug_assert!(areas_above.len() <= 2, "pieces are split by at most two lines");
        match *areas_above {
            [] => Self::Whole,
            [above] => Self::Halves {
                top: above,
                bottom: area - above,
            },
            [top, above, ..] => Self::Thirds {
                top,
                middle: above - top,
                bottom: area - above,
            },
        }
    }

    /// Number of leaves this piece contributes (1 when unsplit).
    pub const fn leaf_count(&self) -> usize {
        match self {
            Self::Whole => 1,
            Self::Halves { .. } => 2,
            Self::Thirds { .. } => 3,
        }
    }

    pub const fn is_whole(&self) -> bool {
        matches!(self, Self::Whole)
    }

    /// Pushes this piece's leaves onto `out`, substituting sub-pieces for the
    /// parent's `area` when it was split.
    pub fn extend_leaves(&self, area: Real, out: &mut Vec<Real>) {
        match *self {
            Self::Whole => out.push(area),
            Self::Halves { top, bottom } => out.extend([top, bottom]),
            Self::Thirds { top, middle, bottom } => out.extend([top, middle, bottom]),
        }
    }

    /// Sub-piece areas top to bottom; empty when unsplit.
    pub fn areas(&self) -> Vec<Real> {
        match *self {
            Self::Whole => Vec::new(),
            Self::Halves { top, bottom } => vec![top, bottom],
            Self::Thirds { top, middle, bottom } => vec![top, middle, bottom],
        }
    }
}

/// Anything that can be flattened into one list of leaf piece areas.
pub trait LeafAreas {
    /// Every leaf area, with sub-pieces substituted for split parents.
    fn leaf_areas(&self) -> Vec<Real>;

    /// Sum of all leaf areas.
    fn total_area(&self) -> Real {
        self.leaf_areas().iter().sum()
    }
}

/// Result of running whichever builder a configuration selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cut_type", rename_all = "snake_case")]
pub enum Partition {
    Vertical(VerticalPartition),
    Radial(RadialPartition),
}

impl LeafAreas for Partition {
    fn leaf_areas(&self) -> Vec<Real> {
        match self {
            Partition::Vertical(partition) => partition.leaf_areas(),
            Partition::Radial(partition) => partition.leaf_areas(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_into_halves_and_thirds() {
        assert_eq!(SubPieces::split(10.0, &[]), SubPieces::Whole);
        assert_eq!(
            SubPieces::split(10.0, &[4.0]),
            SubPieces::Halves { top: 4.0, bottom: 6.0 }
        );
        assert_eq!(
            SubPieces::split(10.0, &[3.0, 7.0]),
            SubPieces::Thirds {
                top: 3.0,
                middle: 4.0,
                bottom: 3.0
            }
        );
    }

    #[test]
    fn horizontal_cuts_are_capped() {
        let two = HorizontalCuts::new(&[6.0, 3.0]).expect("two lines fit");
        assert_eq!(two.as_slice(), &[6.0, 3.0]);
        assert_eq!(two.len(), 2);
        assert!(HorizontalCuts::none().is_empty());
        assert!(HorizontalCuts::none().as_slice().is_empty());
        assert_eq!(
            HorizontalCuts::new(&[9.0, 6.0, 3.0]),
            Err(ValidationError::TooManyHorizontalCuts { got: 3, max: 2 })
        );
    }

    #[test]
    fn leaves_substitute_parent() {
        let mut out = Vec::new();
        SubPieces::Whole.extend_leaves(5.0, &mut out);
        SubPieces::split(5.0, &[1.0, 2.0]).extend_leaves(5.0, &mut out);
        assert_eq!(out, vec![5.0, 1.0, 1.0, 3.0]);
        assert_eq!(SubPieces::split(5.0, &[1.0]).leaf_count(), 2);
        assert!(SubPieces::Whole.areas().is_empty());
    }
}
