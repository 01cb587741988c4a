use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::graph::RouteGraph;

/// Environment variable consulted when no map path is passed explicitly.
pub const MAP_ENV_VAR: &str = "ROADGRAPH_MAP";

/// Counts of what a map file added to a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub vertices: usize,
    pub edges: usize,
}

/// Resolve the map file location: an explicit path wins, then
/// [`MAP_ENV_VAR`].
pub fn resolve_map_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env::var_os(MAP_ENV_VAR) {
        Some(value) if !value.is_empty() => {
            let path = PathBuf::from(value);
            debug!(path = %path.display(), "using map path from {MAP_ENV_VAR}");
            Ok(path)
        }
        _ => Err(Error::MapNotConfigured),
    }
}

/// Load a road map file into `graph`.
///
/// Each non-blank line describes one directed road segment:
///
/// ```text
/// lat1 lon1 lat2 lon2 "road name" road_type
/// ```
///
/// Both endpoints become vertices and the edge length is the straight-line
/// [`GeoPoint::distance`] between them, the metric A* estimates with. Lines
/// starting with `#` are ignored.
///
/// The whole file is parsed before anything is inserted, so on error `graph`
/// is left exactly as it was.
pub fn load_road_map(path: &Path, graph: &mut RouteGraph) -> Result<LoadSummary> {
    debug!(path = %path.display(), "loading road map");
    let file = File::open(path)?;
    let summary = read_road_map(file, graph)?;
    info!(
        path = %path.display(),
        vertices = summary.vertices,
        edges = summary.edges,
        "loaded road map"
    );
    Ok(summary)
}

/// Read road segments from any reader. See [`load_road_map`] for the format
/// and the all-or-nothing behaviour on errors.
pub fn read_road_map<R: Read>(reader: R, graph: &mut RouteGraph) -> Result<LoadSummary> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut segments = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let more = reader.read_record(&mut record).map_err(|err| {
            let line = err.position().map(|pos| pos.line()).unwrap_or_default();
            Error::MapParse {
                line,
                message: err.to_string(),
            }
        })?;
        if !more {
            break;
        }
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        // Runs of spaces show up as empty fields.
        let fields: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        segments.push(parse_segment(&fields, line)?);
    }

    let mut summary = LoadSummary::default();
    for segment in segments {
        if graph.add_vertex(segment.from) {
            summary.vertices += 1;
        }
        if graph.add_vertex(segment.to) {
            summary.vertices += 1;
        }
        let length = segment.from.distance(&segment.to);
        graph.add_edge(
            segment.from,
            segment.to,
            segment.name,
            segment.road_type,
            length,
        )?;
        summary.edges += 1;
    }

    Ok(summary)
}

struct Segment {
    from: GeoPoint,
    to: GeoPoint,
    name: String,
    road_type: String,
}

fn parse_segment(fields: &[&str], line: u64) -> Result<Segment> {
    if fields.len() < 6 {
        return Err(Error::MapParse {
            line,
            message: format!("expected 6 fields, found {}", fields.len()),
        });
    }

    let coordinate = |index: usize| -> Result<f64> {
        fields[index]
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| Error::MapParse {
                line,
                message: format!("invalid coordinate '{}'", fields[index]),
            })
    };

    let from = GeoPoint::new(coordinate(0)?, coordinate(1)?);
    let to = GeoPoint::new(coordinate(2)?, coordinate(3)?);
    // Unquoted names with spaces spill into extra fields; the type is always last.
    let last = fields.len() - 1;
    let name = fields[4..last].join(" ");
    let road_type = fields[last].to_string();

    Ok(Segment {
        from,
        to,
        name,
        road_type,
    })
}
