//! Station identity and location types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Unique identifier for a physical platform/stop.
///
/// Several stations may share a display name (one per line calling there),
/// but every station has its own `StationId`. The ordering of ids is the
/// tie-break order used by the route search, so it must stay total and stable.
///
/// # Examples
///
/// ```
/// use rail_router::domain::StationId;
///
/// let a = StationId::new(1130101);
/// let b = StationId::new(1130102);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "1130101");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u32);

impl StationId {
    /// Wrap a raw station code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw station code.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a railway line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(u32);

impl LineId {
    /// Wrap a raw line code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw line code.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (latitude, longitude) pair in decimal degrees.
///
/// Both components are finite and within range; this is checked by
/// [`Coordinates::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting NaN, infinite and out-of-range components.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180], which keeps
    /// every planar distance finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        check_axis("lat", lat, 90.0)?;
        check_axis("lon", lon, 180.0)?;
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Straight-line distance in (lat, lon) space.
    ///
    /// This is not a geodesic distance. It is applied uniformly across the
    /// network, which keeps relative comparisons between routes meaningful.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

fn check_axis(axis: &'static str, value: f64, limit: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFiniteCoordinate { axis, value });
    }
    if !(-limit..=limit).contains(&value) {
        return Err(DomainError::CoordinateOutOfRange { axis, value, limit });
    }
    Ok(())
}

/// A station on one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub line: LineId,
    /// Human-readable line name, when the line table was available.
    pub line_name: Option<String>,
    pub coordinates: Coordinates,
}

impl Station {
    /// Create a station from raw attributes.
    ///
    /// Fails if either coordinate is not finite.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        line: LineId,
        lon: f64,
        lat: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: name.into(),
            line,
            line_name: None,
            coordinates: Coordinates::new(lat, lon)?,
        })
    }

    /// Attach a line display name.
    pub fn with_line_name(mut self, line_name: impl Into<String>) -> Self {
        self.line_name = Some(line_name.into());
        self
    }
}
