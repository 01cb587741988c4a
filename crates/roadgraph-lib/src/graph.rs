use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Index of a vertex in the graph's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Index of an edge in the graph's edge set. Edges are numbered in insertion
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

/// Directed road segment between two intersections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadEdge {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub name: String,
    pub road_type: String,
    pub length: f64,
    #[serde(skip)]
    end_id: NodeId,
}

/// Vertex record: its location and the ids of its outgoing edges in the order
/// they were added.
#[derive(Debug, Clone)]
pub struct GraphNode {
    location: GeoPoint,
    outgoing: Vec<EdgeId>,
}

impl GraphNode {
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }
}

/// Directed multigraph of intersections and road segments.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<GeoPoint, NodeId>,
    edges: Vec<RoadEdge>,
    /// Shortest parallel edge for every connected ordered pair.
    cheapest: HashMap<(NodeId, NodeId), EdgeId>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.nodes.iter().map(|node| node.location)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    pub fn contains(&self, location: &GeoPoint) -> bool {
        self.index.contains_key(location)
    }

    /// Add an intersection. Returns `false` if the location was already present.
    pub fn add_vertex(&mut self, location: GeoPoint) -> bool {
        if self.index.contains_key(&location) {
            return false;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode {
            location,
            outgoing: Vec::new(),
        });
        self.index.insert(location, id);
        true
    }

    /// Add a directed road segment from `from` to `to`.
    ///
    /// Both endpoints must already be vertices, the name and type must be
    /// non-empty and the length must be a finite, non-negative number. A
    /// rejected edge leaves the graph untouched.
    pub fn add_edge(
        &mut self,
        from: GeoPoint,
        to: GeoPoint,
        name: impl Into<String>,
        road_type: impl Into<String>,
        length: f64,
    ) -> Result<EdgeId> {
        let name = name.into();
        let road_type = road_type.into();
        let invalid = |reason: &str| Error::InvalidEdge {
            from,
            to,
            reason: reason.to_string(),
        };

        let from_id = self
            .index
            .get(&from)
            .copied()
            .ok_or_else(|| invalid("start location is not a vertex"))?;
        let to_id = self
            .index
            .get(&to)
            .copied()
            .ok_or_else(|| invalid("end location is not a vertex"))?;
        if name.is_empty() {
            return Err(invalid("road name is missing"));
        }
        if road_type.is_empty() {
            return Err(invalid("road type is missing"));
        }
        if !length.is_finite() || length < 0.0 {
            return Err(invalid("length must be a non-negative number"));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(RoadEdge {
            start: from,
            end: to,
            name,
            road_type,
            length,
            end_id: to_id,
        });
        self.nodes[from_id.0].outgoing.push(id);

        let edges = &self.edges;
        self.cheapest
            .entry((from_id, to_id))
            .and_modify(|current| {
                // Ties keep the earlier edge.
                if length < edges[current.0].length {
                    *current = id;
                }
            })
            .or_insert(id);

        trace!(%from, %to, length, "added edge");
        Ok(id)
    }

    /// End locations of the outgoing edges of `location`, one per edge, in
    /// insertion order.
    pub fn neighbors_of(&self, location: &GeoPoint) -> Result<Vec<GeoPoint>> {
        let id = self.node_id(location)?;
        Ok(self
            .neighbor_ids(id)
            .map(|next| self.nodes[next.0].location)
            .collect())
    }

    /// Number of outgoing edges from `location`.
    pub fn out_degree(&self, location: &GeoPoint) -> Result<usize> {
        let id = self.node_id(location)?;
        Ok(self.nodes[id.0].outgoing.len())
    }

    /// Shortest edge from `from` to `to`, if the two are directly connected.
    pub fn edge_between(&self, from: &GeoPoint, to: &GeoPoint) -> Option<&RoadEdge> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.cheapest_edge(from, to)
    }

    pub(crate) fn node_id(&self, location: &GeoPoint) -> Result<NodeId> {
        self.index
            .get(location)
            .copied()
            .ok_or(Error::UnknownLocation {
                location: *location,
            })
    }

    pub(crate) fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub(crate) fn neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .outgoing
            .iter()
            .map(move |edge| self.edges[edge.0].end_id)
    }

    pub(crate) fn cheapest_edge(&self, from: NodeId, to: NodeId) -> Option<&RoadEdge> {
        self.cheapest
            .get(&(from, to))
            .map(|edge| &self.edges[edge.0])
    }

    pub(crate) fn resolve_path(&self, path: &[NodeId]) -> Vec<GeoPoint> {
        path.iter().map(|id| self.nodes[id.0].location).collect()
    }
}

impl fmt::Display for RouteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph with {} vertices and {} edges.",
            self.vertex_count(),
            self.edge_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(x, y)
    }

    #[test]
    fn duplicate_vertex_is_a_no_op() {
        let mut graph = RouteGraph::new();
        assert!(graph.add_vertex(point(1.0, 1.0)));
        assert!(!graph.add_vertex(point(1.0, 1.0)));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn rejected_edges_leave_graph_unchanged() {
        let mut graph = RouteGraph::new();
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        graph.add_vertex(a);
        graph.add_vertex(b);

        let missing = graph.add_edge(a, point(9.0, 9.0), "Main", "residential", 1.0);
        assert!(matches!(missing, Err(Error::InvalidEdge { .. })));
        let negative = graph.add_edge(a, b, "Main", "residential", -1.0);
        assert!(matches!(negative, Err(Error::InvalidEdge { .. })));
        let unnamed = graph.add_edge(a, b, "", "residential", 1.0);
        assert!(matches!(unnamed, Err(Error::InvalidEdge { .. })));
        let untyped = graph.add_edge(a, b, "Main", "", 1.0);
        assert!(matches!(untyped, Err(Error::InvalidEdge { .. })));
        let nan = graph.add_edge(a, b, "Main", "residential", f64::NAN);
        assert!(matches!(nan, Err(Error::InvalidEdge { .. })));

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.neighbors_of(&a).unwrap().is_empty());
    }

    #[test]
    fn neighbors_follow_edge_order_and_repeat_for_parallel_edges() {
        let mut graph = RouteGraph::new();
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        let c = point(0.0, 1.0);
        for p in [a, b, c] {
            graph.add_vertex(p);
        }
        graph.add_edge(a, c, "First", "residential", 1.0).unwrap();
        graph.add_edge(a, b, "Second", "residential", 1.0).unwrap();
        graph.add_edge(a, b, "Third", "primary", 0.5).unwrap();

        assert_eq!(graph.neighbors_of(&a).unwrap(), vec![c, b, b]);
        assert_eq!(graph.neighbors_of(&a).unwrap(), vec![c, b, b]);
        assert_eq!(graph.out_degree(&a).unwrap(), 3);
        assert!(graph.neighbors_of(&b).unwrap().is_empty());
    }

    #[test]
    fn edge_between_prefers_cheapest_parallel_edge() {
        let mut graph = RouteGraph::new();
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        graph.add_vertex(a);
        graph.add_vertex(b);
        graph.add_edge(a, b, "Slow", "residential", 5.0).unwrap();
        graph.add_edge(a, b, "Fast", "motorway", 2.0).unwrap();
        graph.add_edge(a, b, "Also fast", "motorway", 2.0).unwrap();

        let edge = graph.edge_between(&a, &b).expect("connected");
        assert_eq!(edge.name, "Fast");
        assert!(graph.edge_between(&b, &a).is_none(), "edges are directed");
    }

    #[test]
    fn unknown_location_is_reported() {
        let graph = RouteGraph::new();
        let err = graph.neighbors_of(&point(4.0, 2.0)).unwrap_err();
        assert!(matches!(err, Error::UnknownLocation { .. }));
    }

    #[test]
    fn display_reports_counts() {
        let mut graph = RouteGraph::new();
        graph.add_vertex(point(0.0, 0.0));
        assert_eq!(graph.to_string(), "Graph with 1 vertices and 0 edges.");
    }
}
