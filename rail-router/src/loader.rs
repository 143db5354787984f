//! CSV loading for station, connection and line tables.
//!
//! Reads the ekidata.jp file layout: a station table
//! (`station_cd, station_name, line_cd, lon, lat, ...`), a join table
//! (`line_cd, station_cd1, station_cd2`) and an optional line table
//! (`line_cd, line_name, ...`). Columns not listed are ignored.
//!
//! A row that cannot be parsed is a fatal input error. Rows that parse but
//! refer to unknown stations are left for the edge builder to drop.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{Connection, DomainError, LineId, Station, StationId};

/// Errors while loading input tables.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// File could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed
    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A station row parsed but holds invalid values
    #[error("invalid station {station}: {source}")]
    InvalidStation {
        station: StationId,
        #[source]
        source: DomainError,
    },
}

/// One row of the station table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationRecord {
    pub station_cd: u32,
    pub station_name: String,
    pub line_cd: u32,
    pub lon: f64,
    pub lat: f64,
}

impl StationRecord {
    /// Convert to a validated station, attaching the line name if known.
    pub fn into_station(
        self,
        line_names: &HashMap<LineId, String>,
    ) -> Result<Station, LoaderError> {
        let id = StationId::new(self.station_cd);
        let line = LineId::new(self.line_cd);
        let station = Station::new(id, self.station_name, line, self.lon, self.lat)
            .map_err(|source| LoaderError::InvalidStation {
                station: id,
                source,
            })?;

        Ok(match line_names.get(&line) {
            Some(name) => station.with_line_name(name.clone()),
            None => station,
        })
    }
}

/// One row of the join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct JoinRecord {
    #[serde(default)]
    pub line_cd: Option<u32>,
    pub station_cd1: u32,
    pub station_cd2: u32,
}

impl From<JoinRecord> for Connection {
    fn from(r: JoinRecord) -> Self {
        let a = StationId::new(r.station_cd1);
        let b = StationId::new(r.station_cd2);
        match r.line_cd {
            Some(line) => Connection::on_line(a, b, LineId::new(line)),
            None => Connection::new(a, b),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LineRecord {
    line_cd: u32,
    line_name: String,
}

fn read_rows<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .collect()
}

/// Parse station rows.
pub fn load_stations<R: Read>(reader: R) -> Result<Vec<StationRecord>, csv::Error> {
    read_rows(reader)
}

/// Parse join rows into connections.
pub fn load_joins<R: Read>(reader: R) -> Result<Vec<Connection>, csv::Error> {
    let rows: Vec<JoinRecord> = read_rows(reader)?;
    Ok(rows.into_iter().map(Connection::from).collect())
}

/// Parse line rows into a line id → name map.
pub fn load_lines<R: Read>(reader: R) -> Result<HashMap<LineId, String>, csv::Error> {
    let rows: Vec<LineRecord> = read_rows(reader)?;
    Ok(rows
        .into_iter()
        .map(|r| (LineId::new(r.line_cd), r.line_name))
        .collect())
}

/// Locations of the input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub stations: PathBuf,
    pub joins: PathBuf,
    pub lines: Option<PathBuf>,
}

impl DataPaths {
    /// Create paths for the station and join tables, without a line table.
    pub fn new(stations: impl Into<PathBuf>, joins: impl Into<PathBuf>) -> Self {
        Self {
            stations: stations.into(),
            joins: joins.into(),
            lines: None,
        }
    }

    /// Set the line table path.
    pub fn with_lines(mut self, lines: impl Into<PathBuf>) -> Self {
        self.lines = Some(lines.into());
        self
    }
}

/// Everything the network build needs.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub connections: Vec<Connection>,
}

fn open(path: &Path) -> Result<File, LoaderError> {
    File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> LoaderError + '_ {
    move |source| LoaderError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Load and convert all tables.
pub fn load_dataset(paths: &DataPaths) -> Result<Dataset, LoaderError> {
    let line_names = match &paths.lines {
        Some(path) => load_lines(open(path)?).map_err(csv_err(path))?,
        None => HashMap::new(),
    };

    let records = load_stations(open(&paths.stations)?).map_err(csv_err(&paths.stations))?;
    let stations = records
        .into_iter()
        .map(|r| r.into_station(&line_names))
        .collect::<Result<Vec<_>, _>>()?;

    let connections = load_joins(open(&paths.joins)?).map_err(csv_err(&paths.joins))?;

    Ok(Dataset {
        stations,
        connections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const STATIONS: &str = "\
station_cd,station_g_cd,station_name,station_name_k,line_cd,pref_cd,post,address,lon,lat,open_ymd,close_ymd,e_status,e_sort
2800208,2800208,Umeda,,99618,27,530-0001,,135.500109,34.703395,,,0,2800208
2800511,2800208,Umeda,,99619,27,530-0001,,135.500109,34.703395,,,0,2800511
2800209,2800209,Yodoyabashi,,99618,27,541-0042,,135.50201,34.692779,,,0,2800209
";

    const JOINS: &str = "\
line_cd,station_cd1,station_cd2
99618,2800208,2800209
99618,2800209,2800701
";

    const LINES: &str = "\
line_cd,company_cd,line_name,line_name_k
99618,249,Midosuji,
99619,249,Tanimachi,
";

    #[test]
    fn parses_stations_ignoring_extra_columns() {
        let rows = load_stations(STATIONS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            StationRecord {
                station_cd: 2800208,
                station_name: "Umeda".to_string(),
                line_cd: 99618,
                lon: 135.500109,
                lat: 34.703395,
            }
        );
    }

    #[test]
    fn parses_joins_as_connections() {
        let joins = load_joins(JOINS.as_bytes()).unwrap();
        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].key(), (StationId::new(2800208), StationId::new(2800209)));
        assert_eq!(joins[0].line, Some(LineId::new(99618)));
    }

    #[test]
    fn joins_without_line_column() {
        let joins = load_joins("station_cd1,station_cd2\n1,2\n".as_bytes()).unwrap();
        assert_eq!(joins[0].line, None);
    }

    #[test]
    fn parses_lines() {
        let lines = load_lines(LINES.as_bytes()).unwrap();
        assert_eq!(lines.get(&LineId::new(99619)).map(String::as_str), Some("Tanimachi"));
    }

    #[test]
    fn malformed_row_is_error() {
        let bad = "station_cd,station_name,line_cd,lon,lat\n1,A,1,not-a-number,34.0\n";
        assert!(load_stations(bad.as_bytes()).is_err());
    }

    #[test]
    fn non_finite_coordinate_is_invalid_station() {
        let record = StationRecord {
            station_cd: 5,
            station_name: "X".to_string(),
            line_cd: 1,
            lon: f64::NAN,
            lat: 0.0,
        };
        let err = record.into_station(&HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::InvalidStation { station, .. } if station == StationId::new(5)
        ));
    }

    #[test]
    fn load_dataset_merges_line_names() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("station.csv");
        let joins = dir.path().join("join.csv");
        let lines = dir.path().join("line.csv");
        fs::write(&stations, STATIONS).unwrap();
        fs::write(&joins, JOINS).unwrap();
        fs::write(&lines, LINES).unwrap();

        let dataset = load_dataset(&DataPaths::new(&stations, &joins).with_lines(&lines)).unwrap();

        assert_eq!(dataset.stations.len(), 3);
        assert_eq!(dataset.connections.len(), 2);
        assert_eq!(dataset.stations[1].line_name.as_deref(), Some("Tanimachi"));
    }

    #[test]
    fn load_dataset_without_lines() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("station.csv");
        let joins = dir.path().join("join.csv");
        fs::write(&stations, STATIONS).unwrap();
        fs::write(&joins, JOINS).unwrap();

        let dataset = load_dataset(&DataPaths::new(&stations, &joins)).unwrap();
        assert!(dataset.stations.iter().all(|s| s.line_name.is_none()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("nope.csv"), dir.path().join("join.csv"));
        let err = load_dataset(&paths).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn malformed_file_names_path() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("station.csv");
        let joins = dir.path().join("join.csv");
        fs::write(&stations, "station_cd,station_name,line_cd,lon,lat\nx,A,1,1.0,1.0\n").unwrap();
        fs::write(&joins, JOINS).unwrap();

        let err = load_dataset(&DataPaths::new(&stations, &joins)).unwrap_err();
        assert!(matches!(err, LoaderError::Csv { .. }));
        assert!(err.to_string().contains("station.csv"));
    }
}
