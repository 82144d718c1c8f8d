//! Pieces cut by lines fanning out from an apex below the centre.
//!
//! Every radial cut passes through the apex `(0, -depth)` and the point of the
//! outer circle at its cut angle. With the apex at the centre this is an ordinary
//! set of wedges; as the apex moves down, shallow cuts stop reaching the inner
//! layers above the x-axis and those layers simply have fewer pieces.
//!
//! Piece areas are assembled from signed integrals:
//! ```text
//! area =   ∫ outer arc               over [left intersection, right edge]
//!        + ∫ left cut line           over [lower bound, left intersection]   (not for the first piece)
//!        − ∫ right cut line          over [lower bound of next, right edge]   (not for the last piece)
//!        − ∫ previous layer's arc    over the previous same-index piece       (when it reaches in)
//! ```

use super::{HorizontalCuts, LeafAreas, SubPieces};
use crate::float_types::Real;
use crate::geometry::{
    CutLine, arc_height, is_in_range, vertical_cut_area, vertical_cut_area_above_horizontal_line,
};
use nalgebra::Point2;
use serde::Serialize;
use tracing::debug;

/// One piece of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialPiece {
    pub layer_index: usize,
    pub piece_index: usize,
    /// Index of the cut forming this piece's left edge.
    pub cut_index: usize,
    pub left_cut: CutLine,
    /// Where the left cut leaves this layer's arc.
    pub left_intersection: [Real; 2],
    pub x_range: [Real; 2],
    pub y_range: [Real; 2],
    pub area: Real,
    pub sub_pieces: SubPieces,
}

impl RadialPiece {
    /// Slope of the cut bounding this piece on the left.
    pub fn left_cut_slope(&self) -> Real {
        self.left_cut.slope
    }
}

/// Pieces of one layer, ordered by decreasing cut angle (increasing x).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialLayer {
    pub layer_index: usize,
    pub layer_radius: Real,
    pub pieces: Vec<RadialPiece>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialPartition {
    pub cut_target_depth: Real,
    pub layers: Vec<RadialLayer>,
}

/// A cut that survived pruning for some layer.
#[derive(Debug, Clone, Copy)]
struct Intercept {
    cut_index: usize,
    line: CutLine,
    point: Point2<Real>,
}

/// Pass-one view of a layer: its radius and surviving cuts.
struct LayerIntercepts {
    radius: Real,
    intercepts: Vec<Intercept>,
}

impl LayerIntercepts {
    /// Right edge of piece `index`: the next cut's intersection, or the layer's
    /// radius for the last piece.
    fn right_x(&self, index: usize) -> Option<Real> {
        if index >= self.intercepts.len() {
            return None;
        }
        Some(
            self.intercepts
                .get(index + 1)
                .map_or(self.radius, |next| next.point.x),
        )
    }
}

impl RadialPartition {
    /// Builds every layer.
    ///
    /// # Parameters
    /// - `radius`: the disk radius the cut angles are aimed at
    /// - `layer_radii`: strictly increasing layer radii
    /// - `cut_angles`: one angle per cut in `[0, π/2]`, decreasing (cut 0 is vertical)
    /// - `cut_target_depth`: how far below the centre the apex sits, `0..=radius`
    /// - `horizontal_cuts`: the horizontal lines, highest first
    pub fn build(
        radius: Real,
        layer_radii: &[Real],
        cut_angles: &[Real],
        cut_target_depth: Real,
        horizontal_cuts: &HorizontalCuts,
    ) -> Self {
        let horizontal_cut_ys = horizontal_cuts.as_slice();
        let cut_lines: Vec<CutLine> = cut_angles
            .iter()
            .map(|&theta| CutLine::through_apex(cut_target_depth, radius, theta))
            .collect();

        // pass one: which cuts reach each layer above the x-axis
        let intercepts: Vec<LayerIntercepts> = layer_radii
            .iter()
            .enumerate()
            .map(|(layer_index, &layer_radius)| {
                let intercepts: Vec<Intercept> = cut_lines
                    .iter()
                    .enumerate()
                    .filter_map(|(cut_index, &line)| {
                        line.circle_intersection(layer_radius).map(|point| Intercept {
                            cut_index,
                            line,
                            point,
                        })
                    })
                    .collect();

                if intercepts.len() < cut_lines.len() {
                    debug!(
                        layer_index,
                        kept = intercepts.len(),
                        pruned = cut_lines.len() - intercepts.len(),
                        "radial cuts miss layer above the x-axis"
                    );
                }

                LayerIntercepts {
                    radius: layer_radius,
                    intercepts,
                }
            })
            .collect();

        // pass two: piece areas
        let layers = intercepts
            .iter()
            .enumerate()
            .map(|(layer_index, layer)| {
                let previous = layer_index.checked_sub(1).map(|i| &intercepts[i]);
                let builder = LayerBuilder {
                    layer_index,
                    layer,
                    previous,
                    depth: cut_target_depth,
                };
                RadialLayer {
                    layer_index,
                    layer_radius: layer.radius,
                    pieces: (0..layer.intercepts.len())
                        .map(|piece_index| builder.piece(piece_index, horizontal_cut_ys))
                        .collect(),
                }
            })
            .collect();

        Self {
            cut_target_depth,
            layers,
        }
    }

    /// Number of pieces in each layer, inner layer first.
    pub fn piece_counts(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.pieces.len()).collect()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &RadialPiece> {
        self.layers.iter().flat_map(|layer| layer.pieces.iter())
    }
}

struct LayerBuilder<'a> {
    layer_index: usize,
    layer: &'a LayerIntercepts,
    previous: Option<&'a LayerIntercepts>,
    depth: Real,
}

impl LayerBuilder<'_> {
    /// Left boundary used where piece `index`'s left cut meets the layer below.
    ///
    /// Prefers the previous layer's intersection at the same piece index; when
    /// the previous layer has no such piece, falls back to where the cut crosses
    /// the x-axis (`depth / slope`). This keeps indexing consistent between layers
    /// with different piece counts.
    fn x_lower_bound(&self, index: usize) -> Real {
        self.previous
            .and_then(|previous| previous.intercepts.get(index))
            .map_or_else(
                || self.depth / self.layer.intercepts[index].line.slope,
                |intercept| intercept.point.x,
            )
    }

    fn piece(&self, index: usize, horizontal_cut_ys: &[Real]) -> RadialPiece {
        let intercepts = &self.layer.intercepts;
        let layer_radius = self.layer.radius;
        let left = intercepts[index];
        let next = intercepts.get(index + 1);
        let is_first_piece = index == 0;

        let x_range = [
            if is_first_piece {
                left.point.x
            } else {
                self.x_lower_bound(index)
            },
            next.map_or(layer_radius, |next| next.point.x),
        ];

        let y_range = [
            match (self.previous, next) {
                (Some(previous), Some(_)) => previous
                    .intercepts
                    .get(index + 1)
                    .map_or(0.0, |below| arc_height(previous.radius, below.point.x)),
                _ => 0.0,
            },
            arc_height(layer_radius, left.point.x),
        ];

        let mut area = vertical_cut_area(layer_radius, left.point.x, x_range[1]);
        if !is_first_piece {
            area += left.line.area_under(x_range[0], left.point.x);
        }
        if let Some(next) = next {
            area -= next.line.area_under(self.x_lower_bound(index + 1), x_range[1]);
        }
        if let Some((previous, below_left, below_right)) = self.piece_below(index) {
            if below_right > x_range[0] {
                area -= vertical_cut_area(previous.radius, below_left, below_right);
            }
        }

        let areas_above: Vec<Real> = horizontal_cut_ys
            .iter()
            .filter(|&&cut_y| is_in_range(cut_y, y_range[0], y_range[1]))
            .map(|&cut_y| self.area_above(index, x_range, cut_y))
            .collect();

        RadialPiece {
            layer_index: self.layer_index,
            piece_index: index,
            cut_index: left.cut_index,
            left_cut: left.line,
            left_intersection: [left.point.x, left.point.y],
            x_range,
            y_range,
            area,
            sub_pieces: SubPieces::split(area, &areas_above),
        }
    }

    /// The previous layer's same-index piece as `(layer, left x, right x)`.
    fn piece_below(&self, index: usize) -> Option<(&LayerIntercepts, Real, Real)> {
        let previous = self.previous?;
        let left = previous.intercepts.get(index)?;
        let right = previous.right_x(index)?;
        Some((previous, left.point.x, right))
    }

    /// Part of piece `index` lying above `y = cut_y`.
    ///
    /// Same composition as the piece area, with every term restricted to the
    /// band above the line: cut-line integrals lose the rectangle under `cut_y`.
    fn area_above(&self, index: usize, x_range: [Real; 2], cut_y: Real) -> Real {
        let intercepts = &self.layer.intercepts;
        let layer_radius = self.layer.radius;
        let left = intercepts[index];

        let mut above =
            vertical_cut_area_above_horizontal_line(layer_radius, cut_y, left.point.x, x_range[1]);

        if index > 0 {
            let x1 = left.line.x_at(cut_y).max(x_range[0]);
            above += left.line.area_under(x1, left.point.x) - (left.point.x - x1) * cut_y;
        }

        if let Some(previous) = self.previous {
            if cut_y < arc_height(previous.radius, x_range[0]) {
                let x_on_previous_arc = arc_height(previous.radius, cut_y);
                above -= vertical_cut_area_above_horizontal_line(
                    previous.radius,
                    cut_y,
                    x_range[0],
                    x_on_previous_arc,
                );
            }
        }

        if let Some(next) = intercepts.get(index + 1) {
            if cut_y < arc_height(layer_radius, x_range[1]) {
                let x1 = next.line.x_at(cut_y);
                above -= next.line.area_under(x1, x_range[1]) - (x_range[1] - x1) * cut_y;
            }
        }

        above
    }
}

impl LeafAreas for RadialPartition {
    fn leaf_areas(&self) -> Vec<Real> {
        let mut leaves = Vec::new();
        for piece in self.pieces() {
            piece.sub_pieces.extend_leaves(piece.area, &mut leaves);
        }
        leaves
    }
}
