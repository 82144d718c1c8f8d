//! Pieces cut by parallel vertical chords.
//!
//! Columns are the strips between consecutive cut boundaries. Within a column the
//! layers stack from the centre outward, so each piece is the column's area under
//! its own arc minus the area under the arc of the layer below.

use super::{HorizontalCuts, LeafAreas, SubPieces};
use crate::float_types::Real;
use crate::geometry::{
    arc_height, is_in_range, vertical_cut_area, vertical_cut_area_above_horizontal_line,
};
use serde::Serialize;

/// One layer's share of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalPiece {
    pub layer_index: usize,
    pub column_x_range: [Real; 2],
    /// Column area under this layer's arc, inner layers included.
    pub cumulative_area: Real,
    /// This piece alone.
    pub area: Real,
    /// `[arc of the layer below at the right edge, own arc at the left edge]`.
    pub y_range: [Real; 2],
    pub sub_pieces: SubPieces,
}

/// Pieces of one column, inner layer first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalColumn {
    pub cut_x: Real,
    pub next_cut_x: Real,
    pub pieces: Vec<VerticalPiece>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalPartition {
    pub columns: Vec<VerticalColumn>,
}

impl VerticalPartition {
    /// Builds every column.
    ///
    /// # Parameters
    /// - `layer_radii`: strictly increasing layer radii, the last one being the disk radius
    /// - `cut_boundaries`: `numCuts + 1` increasing x positions from 0 to the disk radius;
    ///   boundaries `i` and `i + 1` bound column `i`
    /// - `horizontal_cuts`: the horizontal lines, highest first
    pub fn build(layer_radii: &[Real], cut_boundaries: &[Real], horizontal_cuts: &HorizontalCuts) -> Self {
        let columns = cut_boundaries
            .windows(2)
            .map(|bounds| build_column(layer_radii, bounds[0], bounds[1], horizontal_cuts.as_slice()))
            .collect();

        Self { columns }
    }

    /// Iterates over every piece, column by column.
    pub fn pieces(&self) -> impl Iterator<Item = &VerticalPiece> {
        self.columns.iter().flat_map(|column| column.pieces.iter())
    }
}

fn build_column(
    layer_radii: &[Real],
    cut_x: Real,
    next_cut_x: Real,
    horizontal_cut_ys: &[Real],
) -> VerticalColumn {
    let mut pieces: Vec<VerticalPiece> = Vec::with_capacity(layer_radii.len());

    for (layer_index, &layer_radius) in layer_radii.iter().enumerate() {
        // layers that end before the column starts never reach it
        if layer_radius <= cut_x {
            continue;
        }
        let previous_layer_radius = layer_index.checked_sub(1).map(|i| layer_radii[i]);

        let cumulative_area = vertical_cut_area(layer_radius, cut_x, next_cut_x);
        let area = cumulative_area - pieces.last().map_or(0.0, |below| below.cumulative_area);

        let y_range = [
            previous_layer_radius.map_or(0.0, |radius| arc_height(radius, next_cut_x)),
            arc_height(layer_radius, cut_x),
        ];

        let areas_above: Vec<Real> = horizontal_cut_ys
            .iter()
            .filter(|&&cut_y| is_in_range(cut_y, y_range[0], y_range[1]))
            .map(|&cut_y| {
                let mut above =
                    vertical_cut_area_above_horizontal_line(layer_radius, cut_y, cut_x, next_cut_x);

                // the line also runs through the piece below; that part is not ours
                if let Some(previous) = previous_layer_radius {
                    if cut_y < arc_height(previous, cut_x) {
                        above -= vertical_cut_area_above_horizontal_line(
                            previous, cut_y, cut_x, next_cut_x,
                        );
                    }
                }
                above
            })
            .collect();

        pieces.push(VerticalPiece {
            layer_index,
            column_x_range: [cut_x, next_cut_x],
            cumulative_area,
            area,
            y_range,
            sub_pieces: SubPieces::split(area, &areas_above),
        });
    }

    VerticalColumn {
        cut_x,
        next_cut_x,
        pieces,
    }
}

impl LeafAreas for VerticalPartition {
    fn leaf_areas(&self) -> Vec<Real> {
        let mut leaves = Vec::new();
        for piece in self.pieces() {
            piece.sub_pieces.extend_leaves(piece.area, &mut leaves);
        }
        leaves
    }
}
