//! Shortest-path searches over a [`RouteGraph`].
//!
//! Breadth-first search minimises hop count. Dijkstra and A* share a single
//! priority-driven engine, [`find_route_with_heuristic`], that differs only in
//! the [`Heuristic`] it is given: Dijkstra uses [`ZeroHeuristic`], A* uses
//! [`EuclideanHeuristic`].
//!
//! All cost bookkeeping lives in maps scoped to a single call, so a graph can
//! be searched any number of times without carrying state between queries.
//!
//! Every search returns `Ok(None)` when the goal cannot be reached. Only
//! queries naming a location that is not a vertex fail.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::trace;

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::graph::{NodeId, RouteGraph};

/// Estimate of the remaining distance from a location to the goal.
///
/// A* only returns optimal routes when the estimate never exceeds the true
/// remaining route length.
pub trait Heuristic {
    fn estimate(&self, from: &GeoPoint, goal: &GeoPoint) -> f64;
}

/// Heuristic that always answers zero, turning the engine into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: &GeoPoint, _goal: &GeoPoint) -> f64 {
        0.0
    }
}

/// Straight-line distance to the goal. Admissible as long as no road is
/// shorter than the straight line between its endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanHeuristic;

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, from: &GeoPoint, goal: &GeoPoint) -> f64 {
        from.distance(goal)
    }
}

/// Find the route with the fewest hops between `start` and `goal`.
pub fn find_route_bfs(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
) -> Result<Option<Vec<GeoPoint>>> {
    find_route_bfs_with_observer(graph, start, goal, |_| {})
}

/// Breadth-first search that reports every newly discovered location to
/// `observer`.
pub fn find_route_bfs_with_observer<F>(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
    mut observer: F,
) -> Result<Option<Vec<GeoPoint>>>
where
    F: FnMut(GeoPoint),
{
    let start_id = graph.node_id(&start)?;
    let goal_id = graph.node_id(&goal)?;
    let path = bfs_ids(graph, start_id, goal_id, &mut observer);
    Ok(path.map(|ids| graph.resolve_path(&ids)))
}

/// Find the lowest-cost route using Dijkstra's algorithm.
pub fn find_route_dijkstra(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
) -> Result<Option<Vec<GeoPoint>>> {
    find_route_with_heuristic(graph, start, goal, &ZeroHeuristic, |_| {})
}

pub fn find_route_dijkstra_with_observer<F>(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
    observer: F,
) -> Result<Option<Vec<GeoPoint>>>
where
    F: FnMut(GeoPoint),
{
    find_route_with_heuristic(graph, start, goal, &ZeroHeuristic, observer)
}

/// Find the lowest-cost route using A* guided by straight-line distance.
pub fn find_route_a_star(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
) -> Result<Option<Vec<GeoPoint>>> {
    find_route_with_heuristic(graph, start, goal, &EuclideanHeuristic, |_| {})
}

pub fn find_route_a_star_with_observer<F>(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
    observer: F,
) -> Result<Option<Vec<GeoPoint>>>
where
    F: FnMut(GeoPoint),
{
    find_route_with_heuristic(graph, start, goal, &EuclideanHeuristic, observer)
}

/// Run the shared Dijkstra/A* engine with an arbitrary heuristic.
///
/// Nodes leave the frontier in ascending `distance_from_start +
/// heuristic_to_goal`; equal keys leave in the order they were pushed. When
/// several edges join the same pair of nodes, the shortest one is used.
pub fn find_route_with_heuristic<H, F>(
    graph: &RouteGraph,
    start: GeoPoint,
    goal: GeoPoint,
    heuristic: &H,
    mut observer: F,
) -> Result<Option<Vec<GeoPoint>>>
where
    H: Heuristic + ?Sized,
    F: FnMut(GeoPoint),
{
    let start_id = graph.node_id(&start)?;
    let goal_id = graph.node_id(&goal)?;
    let path = weighted_ids(graph, start_id, goal_id, heuristic, &mut observer);
    Ok(path.map(|ids| graph.resolve_path(&ids)))
}

impl RouteGraph {
    /// See [`find_route_bfs`].
    pub fn bfs(&self, start: GeoPoint, goal: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        find_route_bfs(self, start, goal)
    }

    /// See [`find_route_dijkstra`].
    pub fn dijkstra(&self, start: GeoPoint, goal: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        find_route_dijkstra(self, start, goal)
    }

    /// See [`find_route_a_star`].
    pub fn a_star(&self, start: GeoPoint, goal: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        find_route_a_star(self, start, goal)
    }
}

pub(crate) fn bfs_ids<F>(
    graph: &RouteGraph,
    start: NodeId,
    goal: NodeId,
    observer: &mut F,
) -> Option<Vec<NodeId>>
where
    F: FnMut(GeoPoint),
{
    if start == goal {
        return Some(vec![start]);
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }
        for next in graph.neighbor_ids(current) {
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            queue.push_back(next);
            observer(graph.node(next).location());
        }
    }

    trace!(visited = visited.len(), "bfs finished");
    reconstruct_path(&parents, start, goal)
}

/// Per-call cost bookkeeping for the weighted engine. Missing entries stand
/// for an infinite distance.
#[derive(Debug, Default)]
struct SearchState {
    distance_from_start: HashMap<NodeId, f64>,
    heuristic_to_goal: HashMap<NodeId, f64>,
    parents: HashMap<NodeId, NodeId>,
    finalized: HashSet<NodeId>,
}

impl SearchState {
    fn distance(&self, node: NodeId) -> f64 {
        self.distance_from_start
            .get(&node)
            .copied()
            .unwrap_or(f64::INFINITY)
    }
}

pub(crate) fn weighted_ids<H, F>(
    graph: &RouteGraph,
    start: NodeId,
    goal: NodeId,
    heuristic: &H,
    observer: &mut F,
) -> Option<Vec<NodeId>>
where
    H: Heuristic + ?Sized,
    F: FnMut(GeoPoint),
{
    if start == goal {
        return Some(vec![start]);
    }

    let goal_location = graph.node(goal).location();
    let mut state = SearchState::default();
    let mut queue = BinaryHeap::new();
    let mut pushed: u64 = 0;

    state.distance_from_start.insert(start, 0.0);
    let start_estimate = heuristic.estimate(&graph.node(start).location(), &goal_location);
    state.heuristic_to_goal.insert(start, start_estimate);
    queue.push(FrontierEntry::new(start, 0.0, start_estimate, pushed));

    while let Some(entry) = queue.pop() {
        if !state.finalized.insert(entry.node) {
            continue;
        }
        if entry.node == goal {
            break;
        }

        let current_distance = state.distance(entry.node);
        for next in graph.neighbor_ids(entry.node) {
            if state.finalized.contains(&next) {
                continue;
            }
            let Some(edge) = graph.cheapest_edge(entry.node, next) else {
                continue;
            };

            let candidate = current_distance + edge.length;
            if candidate < state.distance(next) {
                let next_location = graph.node(next).location();
                let estimate = *state
                    .heuristic_to_goal
                    .entry(next)
                    .or_insert_with(|| heuristic.estimate(&next_location, &goal_location));

                state.distance_from_start.insert(next, candidate);
                state.parents.insert(next, entry.node);
                pushed += 1;
                queue.push(FrontierEntry::new(next, candidate, estimate, pushed));
                observer(next_location);
            }
        }
    }

    trace!(finalized = state.finalized.len(), "weighted search finished");
    reconstruct_path(&state.parents, start, goal)
}

/// Walk parent links back from `goal` to `start`. Returns `None` when the goal
/// was never reached.
fn reconstruct_path(
    parents: &HashMap<NodeId, NodeId>,
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *parents.get(&current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: NodeId,
    estimate: FloatOrd,
    sequence: u64,
}

impl FrontierEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            node,
            estimate: FloatOrd(cost + heuristic),
            sequence,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap; earlier pushes win ties.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
