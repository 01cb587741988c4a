use thiserror::Error;

use crate::geo::GeoPoint;

/// Convenient result alias for the road graph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a query references a coordinate that is not a vertex.
    #[error("unknown location {location}")]
    UnknownLocation { location: GeoPoint },

    /// Raised when an edge insertion is rejected. The graph is left unchanged.
    #[error("invalid edge from {from} to {to}: {reason}")]
    InvalidEdge {
        from: GeoPoint,
        to: GeoPoint,
        reason: String,
    },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: GeoPoint, goal: GeoPoint },

    /// Raised when a greedy tour gets stranded before covering every vertex.
    #[error("tour from {start} could not reach every vertex")]
    TourIncomplete { start: GeoPoint },

    /// Raised when a map file record cannot be parsed.
    #[error("failed to parse map record on line {line}: {message}")]
    MapParse { line: u64, message: String },

    /// No map file was given on the command line or through the environment.
    #[error("no map file configured; pass --map or set {}", crate::loader::MAP_ENV_VAR)]
    MapNotConfigured,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
