use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Immutable 2D coordinate identifying a graph vertex.
///
/// For map files `x` carries the latitude and `y` the longitude. Equality and
/// hashing compare the exact coordinate bits, so two points are the same vertex
/// only when both components match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point, in coordinate units. Road
    /// lengths derived from map files use the same metric.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn key(&self) -> (u64, u64) {
        // -0.0 and 0.0 name the same intersection.
        (normalize(self.x).to_bits(), normalize(self.y).to_bits())
    }
}

fn normalize(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when a coordinate string is not of the form `x,y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGeoPointError(String);

impl fmt::Display for ParseGeoPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected coordinates as 'x,y', got '{}'", self.0)
    }
}

impl std::error::Error for ParseGeoPointError {}

impl FromStr for GeoPoint {
    type Err = ParseGeoPointError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseGeoPointError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Self::new(x, y))
    }
}
