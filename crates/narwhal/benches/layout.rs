use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::algo::mds;
use narwhal::{Graph, MatrixMode, MdsOptions};
use std::hint::black_box;
use std::time::Duration;

fn build_mesh(name: &str, node_count: usize, fanout: usize) -> Graph {
    let mut g = Graph::default();
    for i in 0..node_count {
        g.add_node(format!("{name}_n{i}"));
    }

    // A spine to guarantee connectivity.
    for i in 1..node_count {
        g.add_edge(format!("{name}_n{}", i - 1), format!("{name}_n{i}"));
    }

    // Short chords so hop distances stay well below the node count.
    for i in 0..node_count {
        for k in 1..=fanout {
            let to = i.saturating_add(k * 7);
            if to >= node_count {
                break;
            }
            g.add_edge(format!("{name}_n{i}"), format!("{name}_n{to}"));
        }
    }

    g
}

fn bench_mds(c: &mut Criterion) {
    let mut group = c.benchmark_group("mds");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("mesh_40_f2", 40usize, 2usize),
        ("mesh_200_f3", 200usize, 3usize),
        ("mesh_800_f3", 800usize, 3usize),
    ];

    for (name, nodes, fanout) in cases {
        let graph = build_mesh(name, nodes, fanout);
        for (mode_name, mode) in [("auto", MatrixMode::Auto), ("full", MatrixMode::Full)] {
            let opts = MdsOptions::default().with_seed(1).with_matrix_mode(mode);
            group.bench_with_input(
                BenchmarkId::new(format!("project/{mode_name}"), name),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        let projection = mds::project(black_box(graph), &opts).expect("layout");
                        black_box(projection.coordinates.len());
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_mds);
criterion_main!(benches);
