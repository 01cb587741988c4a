#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use roadgraph_lib::{load_road_map, GeoPoint, RouteGraph};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_graph() -> RouteGraph {
    let mut graph = RouteGraph::new();
    load_road_map(&fixtures_dir().join("simpletest.map"), &mut graph).expect("fixture loads");
    graph
}

/// A(0,0), B(3,0), C(3,4) with A->B 3, B->C 4 and a direct A->C of 10.
pub fn detour_triangle() -> (RouteGraph, GeoPoint, GeoPoint, GeoPoint) {
    let a = GeoPoint::new(0.0, 0.0);
    let b = GeoPoint::new(3.0, 0.0);
    let c = GeoPoint::new(3.0, 4.0);
    let mut graph = RouteGraph::new();
    for p in [a, b, c] {
        graph.add_vertex(p);
    }
    graph.add_edge(a, b, "AB", "residential", 3.0).unwrap();
    graph.add_edge(b, c, "BC", "residential", 4.0).unwrap();
    graph.add_edge(a, c, "AC", "residential", 10.0).unwrap();
    (graph, a, b, c)
}

/// Sum of the cheapest road between each consecutive pair; panics if a pair is
/// not directly connected.
pub fn edge_length(graph: &RouteGraph, path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| {
            graph
                .edge_between(&pair[0], &pair[1])
                .unwrap_or_else(|| panic!("no edge from {} to {}", pair[0], pair[1]))
                .length
        })
        .sum()
}

/// Fewest hops from `start` to every reachable vertex, found by relaxing the
/// whole edge list once per vertex instead of walking a queue.
pub fn hop_counts(graph: &RouteGraph, start: GeoPoint) -> HashMap<GeoPoint, usize> {
    let mut hops = HashMap::from([(start, 0)]);
    for _ in 0..graph.vertex_count() {
        for edge in graph.edges() {
            if let Some(&from) = hops.get(&edge.start) {
                let to = hops.entry(edge.end).or_insert(usize::MAX);
                *to = (*to).min(from + 1);
            }
        }
    }
    hops
}
