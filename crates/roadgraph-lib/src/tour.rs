//! Greedy closed-walk heuristic over a [`RouteGraph`].
//!
//! The tour repeatedly moves to the nearest unvisited vertex, measuring
//! "nearest" by A* route length. Before doing so it checks whether the current
//! vertex leads to a dead end that is still unvisited; such a vertex is taken
//! immediately so the tour does not have to come back for it later.
//!
//! This is an approximation with no optimality guarantee and runs O(V²) A*
//! searches in the worst case.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::graph::{NodeId, RouteGraph};
use crate::path::{weighted_ids, EuclideanHeuristic};

/// Out-degree below which a neighbour counts as a dead end.
const DEAD_END_DEGREE: usize = 2;

/// Build a tour that starts and ends at `start` and visits every other vertex
/// exactly once in between.
///
/// Returns `Ok(None)` when some vertex cannot be reached from where the tour
/// got stranded.
pub fn greedy_tour(graph: &RouteGraph, start: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
    let start_id = graph.node_id(&start)?;
    let mut remaining: BTreeSet<NodeId> =
        graph.node_ids().filter(|id| *id != start_id).collect();
    let mut order = Vec::with_capacity(graph.vertex_count() + 1);
    order.push(start_id);

    let mut current = start_id;
    while !remaining.is_empty() {
        let next = match dead_end_neighbour(graph, current, &remaining) {
            Some(next) => next,
            None => match nearest_remaining(graph, current, &remaining) {
                Some(next) => next,
                None => {
                    debug!(
                        %start,
                        stranded_at = %graph.node(current).location(),
                        unvisited = remaining.len(),
                        "greedy tour could not reach remaining vertices"
                    );
                    return Ok(None);
                }
            },
        };
        remaining.remove(&next);
        order.push(next);
        current = next;
    }
    order.push(start_id);

    debug!(%start, stops = order.len(), "greedy tour complete");
    Ok(Some(graph.resolve_path(&order)))
}

/// Total length of a walk through `path`.
///
/// Consecutive entries joined by a road contribute the shortest such road.
/// Entries without a direct road are joined by the A* route between them. If
/// no route exists the result is infinite.
pub fn route_length(graph: &RouteGraph, path: &[GeoPoint]) -> Result<f64> {
    let ids = resolve_ids(graph, path)?;
    Ok(route_length_ids(graph, &ids))
}

/// Total length of a walk through `path` where every leg is measured with a
/// fresh A* search, even when a direct road exists.
pub fn tour_length_by_search(graph: &RouteGraph, path: &[GeoPoint]) -> Result<f64> {
    let ids = resolve_ids(graph, path)?;
    let mut total = 0.0;
    for pair in ids.windows(2) {
        total += leg_by_search(graph, pair[0], pair[1]);
    }
    Ok(total)
}

impl RouteGraph {
    /// See [`greedy_tour`].
    pub fn greedy_search(&self, start: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        greedy_tour(self, start)
    }

    /// See [`route_length`].
    pub fn route_length(&self, path: &[GeoPoint]) -> Result<f64> {
        route_length(self, path)
    }
}

fn dead_end_neighbour(
    graph: &RouteGraph,
    current: NodeId,
    remaining: &BTreeSet<NodeId>,
) -> Option<NodeId> {
    graph.neighbor_ids(current).find(|next| {
        remaining.contains(next) && graph.node(*next).outgoing().len() < DEAD_END_DEGREE
    })
}

/// Remaining vertex with the shortest A* route from `current`. Ties keep the
/// vertex that was added to the graph first.
fn nearest_remaining(
    graph: &RouteGraph,
    current: NodeId,
    remaining: &BTreeSet<NodeId>,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &candidate in remaining {
        let length = leg_by_search(graph, current, candidate);
        if !length.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, best_length)| length < best_length) {
            best = Some((candidate, length));
        }
    }
    best.map(|(id, _)| id)
}

fn leg_by_search(graph: &RouteGraph, from: NodeId, to: NodeId) -> f64 {
    match weighted_ids(graph, from, to, &EuclideanHeuristic, &mut |_: GeoPoint| {}) {
        Some(path) => route_length_ids(graph, &path),
        None => f64::INFINITY,
    }
}

fn route_length_ids(graph: &RouteGraph, path: &[NodeId]) -> f64 {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if from == to {
            continue;
        }
        total += match graph.cheapest_edge(from, to) {
            Some(edge) => edge.length,
            // Legs of an A* path are always joined by an edge, so this recursion
            // bottoms out after one level.
            None => leg_by_search(graph, from, to),
        };
    }
    total
}

fn resolve_ids(graph: &RouteGraph, path: &[GeoPoint]) -> Result<Vec<NodeId>> {
    path.iter().map(|location| graph.node_id(location)).collect()
}
