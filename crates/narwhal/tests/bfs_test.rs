use narwhal::Error;
use narwhal::algo::mds::{DistanceOracle, NeighborhoodIndex, UNREACHABLE};

const HOP: f64 = 45.0;

fn path(k: usize) -> NeighborhoodIndex {
    let edges: Vec<(usize, usize)> = (1..k).map(|i| (i - 1, i)).collect();
    NeighborhoodIndex::from_edges(k, &edges).expect("path")
}

fn star(leaves: usize) -> NeighborhoodIndex {
    let edges: Vec<(usize, usize)> = (1..=leaves).map(|i| (0, i)).collect();
    NeighborhoodIndex::from_edges(leaves + 1, &edges).expect("star")
}

#[test]
fn bfs_distance_to_self_is_zero_and_neighbors_one_hop() {
    let index = NeighborhoodIndex::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    let oracle = DistanceOracle::new(&index, HOP);
    for v in 0..4 {
        let row = oracle.distances_from(v).expect("row");
        assert_eq!(row.source, v);
        assert_eq!(row.get(v), 0.0);
        for &u in index.neighbors(v) {
            assert_eq!(row.get(u), HOP);
        }
    }
}

#[test]
fn bfs_on_path_scales_hops_linearly() {
    let index = path(8);
    let row = DistanceOracle::new(&index, HOP).distances_from(0).expect("row");
    for t in 0..8 {
        assert_eq!(row.get(t), HOP * t as f64);
    }
    assert_eq!(row.max_finite(), HOP * 7.0);
}

#[test]
fn bfs_on_star_reaches_leaves_in_one_hop_from_center() {
    let index = star(5);
    let oracle = DistanceOracle::new(&index, HOP);

    let center = oracle.distances_from(0).expect("row");
    for leaf in 1..=5 {
        assert_eq!(center.get(leaf), HOP);
    }

    let leaf = oracle.distances_from(1).expect("row");
    assert_eq!(leaf.get(0), HOP);
    for other in 2..=5 {
        assert_eq!(leaf.get(other), 2.0 * HOP);
    }
}

#[test]
fn bfs_marks_unreachable_nodes() {
    let index = NeighborhoodIndex::from_edges(5, &[(0, 1), (1, 2), (3, 4)]).unwrap();
    let row = DistanceOracle::new(&index, HOP).distances_from(0).expect("row");

    assert!(row.is_reachable(2));
    assert!(!row.is_reachable(3));
    assert_eq!(row.get(3), UNREACHABLE);
    assert_eq!(row.get(4), UNREACHABLE);
    assert!(row.has_unreachable());
    assert_eq!(row.max_finite(), 2.0 * HOP);
}

#[test]
fn bfs_uses_the_configured_edge_length() {
    let index = path(3);
    let row = DistanceOracle::new(&index, 10.0).distances_from(2).expect("row");
    assert_eq!(row.distances, vec![20.0, 10.0, 0.0]);
}

#[test]
fn bfs_rejects_out_of_range_source() {
    let index = path(3);
    let err = DistanceOracle::new(&index, HOP).distances_from(3).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[test]
fn large_edge_lengths_keep_far_nodes_reachable() {
    let index = path(4);
    let row = DistanceOracle::new(&index, 6.0e7).distances_from(0).expect("row");

    assert_eq!(row.distances, vec![0.0, 6.0e7, 1.2e8, 1.8e8]);
    assert!((0..4).all(|v| row.is_reachable(v)));
    assert!(!row.has_unreachable());
    assert_eq!(row.max_finite(), 1.8e8);
}
