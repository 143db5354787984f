//! Route presentation.
//!
//! Maps a route's station ids back to display data, and writes the
//! newline-delimited station-name artifact.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::domain::{Coordinates, LineId, StationId};
use crate::planner::Route;
use crate::registry::{LookupError, StationRegistry};

/// Errors from formatting or writing a route.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// A route station is not in the registry
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Writing the route file failed
    #[error("failed to write route file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One stop of a formatted route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub id: StationId,
    pub name: String,
    pub line: LineId,
    pub line_name: Option<String>,
    pub coordinates: Coordinates,
}

/// Display names along a route, origin first.
pub fn station_names(
    registry: &StationRegistry,
    route: &Route,
) -> Result<Vec<String>, FormatError> {
    route
        .stations()
        .iter()
        .map(|id| -> Result<String, FormatError> { Ok(registry.name_of(*id)?.to_string()) })
        .collect()
}

/// Full stop details along a route, origin first.
pub fn route_stops(
    registry: &StationRegistry,
    route: &Route,
) -> Result<Vec<RouteStop>, FormatError> {
    route
        .stations()
        .iter()
        .map(|id| -> Result<RouteStop, FormatError> {
            let station = registry.get(*id).ok_or(LookupError::UnknownStation(*id))?;
            Ok(RouteStop {
                id: station.id,
                name: station.name.clone(),
                line: station.line,
                line_name: station.line_name.clone(),
                coordinates: station.coordinates,
            })
        })
        .collect()
}

/// One name per line, each terminated by a newline.
pub fn to_text<S: AsRef<str>>(names: &[S]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(name.as_ref());
        out.push('\n');
    }
    out
}

/// Write station names to `path`, one per line.
///
/// The text goes to a uniquely named temporary file in the same directory and
/// is persisted over `path`, so `path` either keeps its previous contents or
/// holds one complete route. Concurrent writers never share a temporary file;
/// the last one to persist wins.
pub fn write_route_file<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<(), FormatError> {
    let io_err = |source: io::Error| FormatError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(to_text(names).as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
