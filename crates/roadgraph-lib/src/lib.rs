//! Road graph library entry points.
//!
//! This crate builds a directed multigraph of intersections and road
//! segments, then answers route queries over it: breadth-first search for the
//! fewest hops, Dijkstra and A* for the shortest total length, and a greedy
//! round trip through every intersection. Higher-level consumers (the CLI)
//! should only depend on the functions exported here.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod loader;
pub mod path;
pub mod routing;
pub mod tour;

pub use error::{Error, Result};
pub use geo::{GeoPoint, ParseGeoPointError};
pub use graph::{EdgeId, GraphNode, NodeId, RoadEdge, RouteGraph};
pub use loader::{load_road_map, read_road_map, resolve_map_path, LoadSummary, MAP_ENV_VAR};
pub use path::{
    find_route_a_star, find_route_a_star_with_observer, find_route_bfs,
    find_route_bfs_with_observer, find_route_dijkstra, find_route_dijkstra_with_observer,
    find_route_with_heuristic, EuclideanHeuristic, Heuristic, ZeroHeuristic,
};
pub use routing::{plan_route, plan_tour, RouteAlgorithm, RoutePlan, RouteRequest, TourPlan};
pub use tour::{greedy_tour, route_length, tour_length_by_search};
