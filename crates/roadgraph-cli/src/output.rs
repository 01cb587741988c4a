//! Output formatting for route, tour and graph summaries.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use roadgraph_lib::{GeoPoint, RoutePlan, RouteGraph, TourPlan};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Vertex and edge counts for the `stats` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &RouteGraph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        }
    }
}

/// Render a route plan.
pub fn render_route(plan: &RoutePlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => {
            let mut out = format!(
                "Route from {} to {} ({} hops; algorithm: {}):\n",
                plan.start,
                plan.goal,
                plan.hop_count(),
                plan.algorithm
            );
            push_steps(&mut out, &plan.steps);
            out.push_str(&format!("\nTotal distance: {:.3}\n", plan.distance));
            Ok(out)
        }
    }
}

/// Render a greedy tour.
pub fn render_tour(plan: &TourPlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => {
            let stops = plan.steps.len().saturating_sub(1);
            let mut out = format!("Tour from {} ({} stops):\n", plan.start, stops);
            push_steps(&mut out, &plan.steps);
            out.push_str(&format!("\nTotal distance: {:.3}\n", plan.distance));
            Ok(out)
        }
    }
}

/// Render graph statistics.
pub fn render_stats(stats: &GraphStats, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => Ok(format!(
            "Graph with {} vertices and {} edges.\n",
            stats.vertices, stats.edges
        )),
    }
}

fn push_steps(out: &mut String, steps: &[GeoPoint]) {
    let last = steps.len().saturating_sub(1);
    for (index, step) in steps.iter().enumerate() {
        let marker = match index {
            0 => '+',
            i if i == last => '-',
            _ => '|',
        };
        out.push_str(&format!("{marker} {step}\n"));
    }
}
