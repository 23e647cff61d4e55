use narwhal::MatrixMode;
use narwhal::algo::mds::{
    DistanceMatrix, DistanceMatrixBuilder, DistanceOracle, MatrixShape, NeighborhoodIndex,
    PivotSampler, UNREACHABLE,
};

const HOP: f64 = 45.0;

fn cycle_with_chords(n: usize) -> NeighborhoodIndex {
    let mut edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    for i in (0..n).step_by(3) {
        edges.push((i, (i + n / 2) % n));
    }
    NeighborhoodIndex::from_edges(n, &edges).expect("graph")
}

#[test]
fn shape_follows_the_pivot_cap_in_auto_mode() {
    assert_eq!(MatrixShape::resolve(MatrixMode::Auto, 10, 50), MatrixShape::Full);
    assert_eq!(MatrixShape::resolve(MatrixMode::Auto, 49, 50), MatrixShape::Full);
    assert_eq!(MatrixShape::resolve(MatrixMode::Auto, 50, 50), MatrixShape::Landmark);
    assert_eq!(MatrixShape::resolve(MatrixMode::Full, 500, 50), MatrixShape::Full);
    assert_eq!(MatrixShape::resolve(MatrixMode::Landmark, 5, 50), MatrixShape::Landmark);
}

#[test]
fn full_matrix_is_symmetric_for_connected_graphs() {
    let index = cycle_with_chords(17);
    let oracle = DistanceOracle::new(&index, HOP);
    let matrix = DistanceMatrixBuilder::new(oracle).full(Vec::new()).expect("matrix");

    assert_eq!(matrix.shape(), MatrixShape::Full);
    assert_eq!(matrix.row_count(), 17);
    assert_eq!(matrix.node_count(), 17);
    assert!(!matrix.is_clamped());
    for i in 0..17 {
        assert_eq!(matrix.get(i, i), 0.0);
        for j in 0..17 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i), "asymmetric at ({i}, {j})");
            assert_eq!(matrix.get(i, j) % HOP, 0.0);
        }
    }
}

#[test]
fn star_leaves_are_two_hops_apart() {
    let edges: Vec<(usize, usize)> = (1..=6).map(|i| (0, i)).collect();
    let index = NeighborhoodIndex::from_edges(7, &edges).unwrap();
    let matrix = DistanceMatrixBuilder::new(DistanceOracle::new(&index, HOP))
        .full(Vec::new())
        .expect("matrix");

    for leaf in 1..=6 {
        assert_eq!(matrix.get(0, leaf), HOP);
        for other in 1..=6 {
            let expected = if other == leaf { 0.0 } else { 2.0 * HOP };
            assert_eq!(matrix.get(leaf, other), expected);
        }
    }
}

#[test]
fn full_matrix_reuses_pivot_rows() {
    let index = cycle_with_chords(12);
    let oracle = DistanceOracle::new(&index, HOP);
    let sampled = PivotSampler::new(oracle).sample(4, 5).expect("pivots");

    let reused = DistanceMatrixBuilder::new(oracle)
        .full(sampled.rows.clone())
        .expect("matrix");
    let fresh = DistanceMatrixBuilder::new(oracle).full(Vec::new()).expect("matrix");

    assert_eq!(reused.as_matrix(), fresh.as_matrix());
    assert_eq!(reused.sources(), (0..12).collect::<Vec<_>>().as_slice());
}

#[test]
fn landmark_matrix_has_one_row_per_pivot() {
    let index = cycle_with_chords(60);
    let oracle = DistanceOracle::new(&index, HOP);
    let sampled = PivotSampler::new(oracle).sample(8, 0).expect("pivots");
    let pivots = sampled.pivots.clone();

    let matrix = DistanceMatrixBuilder::new(oracle)
        .build(MatrixShape::Landmark, sampled.rows)
        .expect("matrix");

    assert_eq!(matrix.shape(), MatrixShape::Landmark);
    assert_eq!(matrix.row_count(), 8);
    assert_eq!(matrix.node_count(), 60);
    assert_eq!(matrix.sources(), pivots.as_slice());
    for (row, pivot) in pivots.iter().enumerate() {
        assert_eq!(matrix.get(row, pivot), 0.0);
    }
}

#[test]
fn unreachable_entries_are_clamped_to_a_finite_value() {
    let index = NeighborhoodIndex::from_edges(5, &[(0, 1), (1, 2), (3, 4)]).unwrap();
    let matrix = DistanceMatrixBuilder::new(DistanceOracle::new(&index, HOP))
        .full(Vec::new())
        .expect("matrix");

    assert!(matrix.is_clamped());
    let stand_in = 2.0 * HOP + HOP;
    assert_eq!(matrix.get(0, 3), stand_in);
    assert_eq!(matrix.get(4, 2), stand_in);
    assert_eq!(matrix.get(0, 2), 2.0 * HOP);
    for v in matrix.as_matrix().iter() {
        assert!(v.is_finite() && *v < UNREACHABLE);
    }
}

#[test]
fn rows_of_different_length_are_rejected() {
    let a = NeighborhoodIndex::from_edges(3, &[(0, 1)]).unwrap();
    let b = NeighborhoodIndex::from_edges(4, &[(0, 1)]).unwrap();
    let ra = DistanceOracle::new(&a, HOP).distances_from(0).unwrap();
    let rb = DistanceOracle::new(&b, HOP).distances_from(0).unwrap();
    assert!(DistanceMatrix::from_rows(MatrixShape::Landmark, &[ra, rb], HOP).is_err());
}

#[test]
fn large_edge_lengths_are_not_mistaken_for_unreachable() {
    let index = NeighborhoodIndex::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
    let matrix = DistanceMatrixBuilder::new(DistanceOracle::new(&index, 6.0e7))
        .full(Vec::new())
        .expect("matrix");

    assert!(!matrix.is_clamped());
    assert_eq!(matrix.get(0, 3), 1.8e8);
    assert_eq!(matrix.get(3, 1), 1.2e8);
}
