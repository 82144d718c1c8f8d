mod support;

use onion::float_types::{PI, Real};
use onion::geometry::{CutLine, is_in_range};
use onion::partition::radial::RadialPartition;
use onion::{LeafAreas, OnionConfiguration, Partition};
use std::collections::BTreeMap;
use support::{approx_eq, approx_eq_rel, column_polygon, layer_of, polygon_area, sample_quadrant, sector_polygon};

fn vertical_pieces(onion: &OnionConfiguration) -> onion::partition::vertical::VerticalPartition {
    match onion.partition() {
        Partition::Vertical(partition) => partition,
        Partition::Radial(_) => panic!("expected a vertical partition"),
    }
}

fn radial_pieces(onion: &OnionConfiguration) -> RadialPartition {
    match onion.partition() {
        Partition::Radial(partition) => partition,
        Partition::Vertical(_) => panic!("expected a radial partition"),
    }
}

#[test]
fn vertical_pieces_match_polygon_areas() {
    let onion = OnionConfiguration::vertical(240.0, 10, 3, 0).expect("valid");
    let radii = onion.layer_radii();
    let partition = vertical_pieces(&onion);

    let mut checked = 0;
    for piece in partition.pieces() {
        let inner = piece.layer_index.checked_sub(1).map(|i| radii[i]);
        let polygon = column_polygon(
            inner,
            radii[piece.layer_index],
            piece.column_x_range[0],
            piece.column_x_range[1],
        );
        let expected = polygon_area(&polygon);
        assert!(
            approx_eq_rel(piece.area, expected, 1e-6),
            "layer {} column {:?}: {} vs polygon {}",
            piece.layer_index,
            piece.column_x_range,
            piece.area,
            expected
        );
        checked += 1;
    }
    // columns start at 0, 80 and 160; layers reaching them: 10 + 7 + 4
    assert_eq!(checked, 21);
}

#[test]
fn vertical_sub_pieces_match_grid_sampling() {
    let onion = OnionConfiguration::vertical(1.0, 3, 2, 2).expect("valid");
    let radii = onion.layer_radii();
    let boundaries = onion.cut_boundaries();
    let ys = onion.horizontal_cut_ys();
    let partition = vertical_pieces(&onion);

    let column_of = |x: Real| boundaries.windows(2).position(|b| x >= b[0] && x < b[1]);

    let mut expected = BTreeMap::new();
    let mut y_ranges = BTreeMap::new();
    for (column_index, column) in partition.columns.iter().enumerate() {
        for piece in &column.pieces {
            let areas = if piece.sub_pieces.is_whole() {
                vec![piece.area]
            } else {
                piece.sub_pieces.areas()
            };
            for (sub, area) in areas.into_iter().enumerate() {
                expected.insert((piece.layer_index, column_index, sub), area);
            }
            y_ranges.insert((piece.layer_index, column_index), piece.y_range);
        }
    }

    let sampled = sample_quadrant(1.0, 2000, |x, y| {
        let layer = layer_of(&radii, x, y)?;
        let column = column_of(x)?;
        let y_range = y_ranges.get(&(layer, column))?;
        let sub = ys
            .iter()
            .filter(|&&line| is_in_range(line, y_range[0], y_range[1]) && line > y)
            .count();
        Some((layer, column, sub))
    });

    for (id, &area) in &expected {
        let estimate = sampled.get(id).copied().unwrap_or(0.0);
        assert!(
            approx_eq(area, estimate, 1e-3),
            "sub-piece {id:?}: {area} vs sampled {estimate}"
        );
    }
    for id in sampled.keys() {
        assert!(expected.contains_key(id), "sampled region {id:?} has no piece");
    }
}

#[test]
fn centred_radial_pieces_match_sector_polygons() {
    let onion = OnionConfiguration::radial(9.0, 3, 3, 0.0, 0).expect("valid");
    let radii = onion.layer_radii();
    let mut angles = onion.cut_angles();
    angles.push(0.0);
    let partition = radial_pieces(&onion);

    assert_eq!(partition.piece_counts(), vec![3, 3, 3]);
    for piece in partition.pieces() {
        let inner = if piece.layer_index == 0 { 0.0 } else { radii[piece.layer_index - 1] };
        let polygon = sector_polygon(
            inner,
            radii[piece.layer_index],
            angles[piece.piece_index + 1],
            angles[piece.piece_index],
        );
        let expected = polygon_area(&polygon);
        assert!(
            approx_eq_rel(piece.area, expected, 1e-6),
            "layer {} piece {}: {} vs polygon {}",
            piece.layer_index,
            piece.piece_index,
            piece.area,
            expected
        );
    }
}

fn check_offset_radial(depth: Real) {
    let onion = OnionConfiguration::radial(1.0, 4, 3, depth, 0).expect("valid");
    let radii = onion.layer_radii();
    let lines: Vec<CutLine> = onion
        .cut_angles()
        .iter()
        .map(|&theta| CutLine::through_apex(onion.cut_target_depth(), onion.radius(), theta))
        .collect();
    let partition = radial_pieces(&onion);

    let expected: BTreeMap<_, _> = partition
        .pieces()
        .map(|piece| ((piece.layer_index, piece.piece_index, 0), piece.area))
        .collect();

    let sampled = sample_quadrant(1.0, 2000, |x, y| {
        let layer = layer_of(&radii, x, y)?;
        let wedge = lines[1..].iter().filter(|line| y < line.y_at(x)).count();
        Some((layer, wedge, 0))
    });

    for (id, &area) in &expected {
        let estimate = sampled.get(id).copied().unwrap_or(0.0);
        assert!(
            approx_eq(area, estimate, 1e-3),
            "depth {depth}, piece {id:?}: {area} vs sampled {estimate}"
        );
    }
    for id in sampled.keys() {
        assert!(expected.contains_key(id), "depth {depth}: sampled region {id:?} has no piece");
    }
}

#[test]
fn offset_radial_pieces_match_grid_sampling() {
    for depth in [0.3, 0.6, 1.0] {
        check_offset_radial(depth);
    }
}

#[test]
fn radial_pruning_is_a_suffix_and_monotone() {
    for depth in [0.0, 0.2, 0.5, 0.8, 1.0] {
        let onion = OnionConfiguration::radial(240.0, 13, 10, depth, 0).expect("valid");
        let partition = radial_pieces(&onion);
        let counts = partition.piece_counts();

        assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]), "depth {depth}: {counts:?}");
        assert_eq!(*counts.last().expect("layers"), 10, "outer layer keeps every cut");
        for layer in &partition.layers {
            let cut_indices: Vec<usize> = layer.pieces.iter().map(|piece| piece.cut_index).collect();
            let prefix: Vec<usize> = (0..layer.pieces.len()).collect();
            assert_eq!(cut_indices, prefix, "depth {depth}: pruned cuts must be a suffix");
        }
    }
}

#[test]
fn every_piece_is_positive() {
    for onion in [
        OnionConfiguration::vertical(240.0, 10, 5, 0),
        OnionConfiguration::radial(240.0, 10, 5, 0.0, 0),
        OnionConfiguration::radial(240.0, 10, 5, 0.45, 0),
        OnionConfiguration::radial(240.0, 13, 10, 1.0, 0),
    ] {
        let onion = onion.expect("valid");
        for area in onion.partition().leaf_areas() {
            assert!(area > 0.0, "{}: piece area {area}", onion.storage_key());
        }
    }
}

#[test]
fn horizontal_cuts_leave_parent_areas_unchanged() {
    for depth in [0.0, 0.35, 1.0] {
        let plain = OnionConfiguration::radial(240.0, 8, 4, depth, 0).expect("valid");
        let split = OnionConfiguration::radial(240.0, 8, 4, depth, 2).expect("valid");
        let parents: Vec<Real> = radial_pieces(&plain).pieces().map(|piece| piece.area).collect();
        let split_parents: Vec<Real> = radial_pieces(&split).pieces().map(|piece| piece.area).collect();
        assert_eq!(split_parents, parents, "depth {depth}");
    }
    let total = OnionConfiguration::vertical(240.0, 8, 4, 2).expect("valid").partition().total_area();
    assert!(approx_eq_rel(total, PI * 240.0 * 240.0 / 4.0, 1e-12));
}

/// Samples every leaf of a radial partition: layer, wedge between cut lines, and
/// the number of crossing horizontal lines above the point.
fn check_radial_sub_pieces(num_layers: usize, num_cuts: usize, depth: Real, num_horizontal_cuts: usize) -> usize {
    let onion = OnionConfiguration::radial(1.0, num_layers, num_cuts, depth, num_horizontal_cuts).expect("valid");
    let key = onion.storage_key();
    let radii = onion.layer_radii();
    let ys = onion.horizontal_cut_ys();
    let lines: Vec<CutLine> = onion
        .cut_angles()
        .iter()
        .map(|&theta| CutLine::through_apex(onion.cut_target_depth(), onion.radius(), theta))
        .collect();
    let partition = radial_pieces(&onion);

    let mut expected = BTreeMap::new();
    let mut y_ranges = BTreeMap::new();
    let mut split = 0;
    for piece in partition.pieces() {
        let areas = if piece.sub_pieces.is_whole() {
            vec![piece.area]
        } else {
            split += 1;
            piece.sub_pieces.areas()
        };
        for (sub, area) in areas.into_iter().enumerate() {
            expected.insert((piece.layer_index, piece.piece_index, sub), area);
        }
        y_ranges.insert((piece.layer_index, piece.piece_index), piece.y_range);
    }

    let sampled = sample_quadrant(1.0, 1500, |x, y| {
        let layer = layer_of(&radii, x, y)?;
        let wedge = lines[1..].iter().filter(|line| y < line.y_at(x)).count();
        let sub = y_ranges.get(&(layer, wedge)).map_or(0, |y_range| {
            ys.iter()
                .filter(|&&line| is_in_range(line, y_range[0], y_range[1]) && line > y)
                .count()
        });
        Some((layer, wedge, sub))
    });

    for (id, &area) in &expected {
        let estimate = sampled.get(id).copied().unwrap_or(0.0);
        assert!(
            approx_eq(area, estimate, 1e-3),
            "{key}: sub-piece {id:?} is {area}, sampled {estimate}"
        );
    }
    for id in sampled.keys() {
        assert!(expected.contains_key(id), "{key}: sampled region {id:?} has no sub-piece");
    }
    split
}

#[test]
fn radial_sub_pieces_match_grid_sampling() {
    let mut split = 0;
    for (num_layers, num_cuts) in [(3, 3), (4, 3)] {
        for depth in [0.0, 0.3, 0.6, 1.0] {
            for num_horizontal_cuts in [1, 2] {
                split += check_radial_sub_pieces(num_layers, num_cuts, depth, num_horizontal_cuts);
            }
        }
    }
    split += check_radial_sub_pieces(7, 5, 0.45, 2);
    assert!(split > 0, "no piece was split by a horizontal line");
}
