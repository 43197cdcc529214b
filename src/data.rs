// Static data set loaded once at start-up

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use log::info;
use serde::de::DeserializeOwned;

use crate::errors::TurismoError;
use crate::localidades::{
    LocalidadProperties, PointOfInterest,
    kpi::{AttractionCount, CrimeRecord},
};
use crate::recommendations::RecommendationTable;

pub const DEFAULT_DATA_DIR: &str = "./data-cleaned";

const POINTS_FILE: &str = "scattermap_points.csv";
const LOCALIDADES_FILE: &str = "localidades_properties.csv";
const CRIME_FILE: &str = "Delitos_x_localidad.csv";
const ATTRACTIONS_FILE: &str = "number_of_touristic_attractions.csv";
const RECOMMENDATIONS_FILE: &str = "recomendaciones.csv";

/// Locations of the flat files the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub points: PathBuf,
    pub localidades: PathBuf,
    pub crime: PathBuf,
    pub attractions: PathBuf,
    pub recommendations: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            points: dir.join(POINTS_FILE),
            localidades: dir.join(LOCALIDADES_FILE),
            crime: dir.join(CRIME_FILE),
            attractions: dir.join(ATTRACTIONS_FILE),
            recommendations: dir.join(RECOMMENDATIONS_FILE),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(DEFAULT_DATA_DIR))
    }
}

/// Everything the dashboard reads from disk. Immutable once loaded and
/// shared by reference with every view and handler.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub points: Vec<PointOfInterest>,
    pub localidades: Vec<LocalidadProperties>,
    pub crime: Vec<CrimeRecord>,
    pub attractions: Vec<AttractionCount>,
    pub recommendations: RecommendationTable,
}

impl DashboardData {
    pub fn load(paths: &DataPaths) -> Result<Self, TurismoError> {
        let data = Self {
            points: read_csv_file(&paths.points)?,
            localidades: read_csv_file(&paths.localidades)?,
            crime: read_csv_file(&paths.crime)?,
            attractions: read_csv_file(&paths.attractions)?,
            recommendations: RecommendationTable::load(&paths.recommendations)?,
        };
        info!(
            "Loaded {} points, {} localidades, {} crime rows, {} attraction rows, {} recommendations",
            data.points.len(),
            data.localidades.len(),
            data.crime.len(),
            data.attractions.len(),
            data.recommendations.len()
        );
        Ok(data)
    }
}

pub(crate) fn open_data_file(path: &Path) -> Result<File, TurismoError> {
    File::open(path).map_err(|e| TurismoError::DataFileOpen {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Deserialize every row of a CSV file with a header line.
pub fn read_csv_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, TurismoError> {
    let file = open_data_file(path)?;
    Ok(read_csv_rows(file, path)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

/// Deserialize CSV rows paired with the line each record starts on.
/// `path` only appears in error messages.
pub(crate) fn read_csv_rows<T: DeserializeOwned, R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<(u64, T)>, TurismoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let parse_error = |line: u64, e: csv::Error| TurismoError::DataFileParse {
        path: path.to_path_buf(),
        line,
        source: e,
    };

    let headers = csv_reader
        .headers()
        .map_err(|e| parse_error(error_line(&e, 1), e))?
        .clone();

    let mut rows = Vec::new();
    let mut last_line = 1;
    for record in csv_reader.records() {
        let record = record.map_err(|e| parse_error(error_line(&e, last_line + 1), e))?;
        // quoted fields may span lines and blank lines are skipped
        let line = record.position().map_or(last_line + 1, |p| p.line());
        last_line = line;
        let row = record
            .deserialize::<T>(Some(&headers))
            .map_err(|e| parse_error(line, e))?;
        rows.push((line, row));
    }
    Ok(rows)
}

fn error_line(error: &csv::Error, fallback: u64) -> u64 {
    error.position().map_or(fallback, |p| p.line())
}
