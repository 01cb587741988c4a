//! Route planning strategies.
//!
//! Each planner wraps one search algorithm behind the [`RoutePlanner`] trait so
//! [`plan_route`](super::plan_route) can dispatch on a runtime choice.

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::graph::RouteGraph;
use crate::path::{find_route_a_star, find_route_bfs, find_route_dijkstra};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// Returns `Ok(None)` when the goal is unreachable.
    fn find_path(
        &self,
        graph: &RouteGraph,
        start: GeoPoint,
        goal: GeoPoint,
    ) -> Result<Option<Vec<GeoPoint>>>;
}

/// Breadth-first search planner.
///
/// BFS finds the path with the fewest hops (edges) but does not
/// consider edge lengths.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &RouteGraph,
        start: GeoPoint,
        goal: GeoPoint,
    ) -> Result<Option<Vec<GeoPoint>>> {
        find_route_bfs(graph, start, goal)
    }
}

/// Dijkstra planner for lowest total road length.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &RouteGraph,
        start: GeoPoint,
        goal: GeoPoint,
    ) -> Result<Option<Vec<GeoPoint>>> {
        find_route_dijkstra(graph, start, goal)
    }
}

/// A* planner using straight-line distance as the heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &RouteGraph,
        start: GeoPoint,
        goal: GeoPoint,
    ) -> Result<Option<Vec<GeoPoint>>> {
        find_route_a_star(graph, start, goal)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
