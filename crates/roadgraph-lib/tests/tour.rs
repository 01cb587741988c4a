mod common;

use std::collections::HashSet;

use roadgraph_lib::{
    greedy_tour, plan_tour, route_length, tour_length_by_search, GeoPoint, RouteGraph,
};

use common::fixture_graph;

fn complete_graph(points: &[GeoPoint]) -> RouteGraph {
    let mut graph = RouteGraph::new();
    for &p in points {
        graph.add_vertex(p);
    }
    for &from in points {
        for &to in points {
            if from != to {
                graph
                    .add_edge(from, to, "Link", "residential", from.distance(&to))
                    .unwrap();
            }
        }
    }
    graph
}

fn assert_closed_tour(graph: &RouteGraph, start: GeoPoint, tour: &[GeoPoint]) {
    assert_eq!(tour.len(), graph.vertex_count() + 1);
    assert_eq!(tour.first(), Some(&start));
    assert_eq!(tour.last(), Some(&start));

    let inner: HashSet<GeoPoint> = tour[..tour.len() - 1].iter().copied().collect();
    let all: HashSet<GeoPoint> = graph.vertices().collect();
    assert_eq!(inner, all, "every vertex appears exactly once before returning");
}

#[test]
fn four_vertex_complete_graph() {
    let points = [
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(2.0, 0.0),
        GeoPoint::new(2.0, 1.0),
        GeoPoint::new(0.0, 3.0),
    ];
    let graph = complete_graph(&points);

    for start in points {
        let tour = greedy_tour(&graph, start).unwrap().expect("complete graph");
        assert_closed_tour(&graph, start, &tour);
    }
}

#[test]
fn fixture_tour_covers_every_intersection() {
    let graph = fixture_graph();
    let start = GeoPoint::new(7.0, 3.0);
    let tour = graph.greedy_search(start).unwrap().expect("fixture is connected");
    assert_closed_tour(&graph, start, &tour);

    let by_edges = route_length(&graph, &tour).unwrap();
    let by_search = tour_length_by_search(&graph, &tour).unwrap();
    assert!(by_edges.is_finite());
    assert!((by_edges - by_search).abs() < 1e-6, "{by_edges} vs {by_search}");
}

#[test]
fn tour_plan_reports_total_length() {
    let graph = fixture_graph();
    let start = GeoPoint::new(1.0, 1.0);
    let plan = plan_tour(&graph, start).expect("fixture is connected");
    assert_eq!(plan.start, start);
    assert_eq!(plan.steps.len(), graph.vertex_count() + 1);
    assert!((plan.distance - route_length(&graph, &plan.steps).unwrap()).abs() < 1e-9);
}
