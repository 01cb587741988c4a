//! Route planning facade over the search algorithms.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (BFS, Dijkstra, A*)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] / [`TourPlan`] - Serializable results
//! - [`plan_route`] / [`plan_tour`] - Entry points that turn "no path" into
//!   a reportable [`Error`]
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] so callers can pick one at
//! runtime without matching on the algorithm themselves.
//!
//! # Example
//!
//! ```ignore
//! use roadgraph_lib::{load_road_map, plan_route, GeoPoint, RouteGraph, RouteRequest};
//!
//! let mut graph = RouteGraph::new();
//! load_road_map("data/simpletest.map".as_ref(), &mut graph)?;
//! let request = RouteRequest::bfs(GeoPoint::new(1.0, 1.0), GeoPoint::new(8.0, -1.0));
//! let plan = plan_route(&graph, &request)?;
//! println!("Route: {} hops", plan.hop_count());
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::graph::RouteGraph;
use crate::tour::{greedy_tour, route_length};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest hops).
    Bfs,
    /// Dijkstra's algorithm (weighted graph).
    Dijkstra,
    /// A* search (heuristic guided).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown routing algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub goal: GeoPoint,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, goal: GeoPoint, algorithm: RouteAlgorithm) -> Self {
        Self {
            start,
            goal,
            algorithm,
        }
    }

    /// Convenience constructor for BFS routes.
    pub fn bfs(start: GeoPoint, goal: GeoPoint) -> Self {
        Self::new(start, goal, RouteAlgorithm::Bfs)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: GeoPoint,
    pub goal: GeoPoint,
    pub steps: Vec<GeoPoint>,
    /// Sum of the road lengths along `steps`.
    pub distance: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Greedy round trip returned by [`plan_tour`].
#[derive(Debug, Clone, Serialize)]
pub struct TourPlan {
    pub start: GeoPoint,
    pub steps: Vec<GeoPoint>,
    pub distance: f64,
}

/// Plan a route between the request's endpoints.
///
/// Unlike the raw searches, an unreachable goal is reported as
/// [`Error::RouteNotFound`].
pub fn plan_route(graph: &RouteGraph, request: &RouteRequest) -> Result<RoutePlan> {
    let planner = select_planner(request);
    let steps = planner
        .find_path(graph, request.start, request.goal)?
        .ok_or(Error::RouteNotFound {
            start: request.start,
            goal: request.goal,
        })?;
    let distance = route_length(graph, &steps)?;

    debug!(
        algorithm = %planner.algorithm(),
        hops = steps.len().saturating_sub(1),
        distance,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start: request.start,
        goal: request.goal,
        steps,
        distance,
    })
}

/// Plan a greedy round trip through every vertex, starting and ending at
/// `start`.
pub fn plan_tour(graph: &RouteGraph, start: GeoPoint) -> Result<TourPlan> {
    let steps = greedy_tour(graph, start)?.ok_or(Error::TourIncomplete { start })?;
    let distance = route_length(graph, &steps)?;
    Ok(TourPlan {
        start,
        steps,
        distance,
    })
}
