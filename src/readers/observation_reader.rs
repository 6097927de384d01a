use crate::error::{DashboardError, Result};
use crate::models::{Month, Observation};
use crate::utils::constants::{
    COLUMN_MONTH, COLUMN_PRECIPITATION, COLUMN_TEMPERATURE, MISSING_MARKERS, REQUIRED_COLUMNS,
};
use crate::utils::coordinates::{parse_coordinate, validate_coordinates};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use validator::Validate;

/// Row as it appears in the source table, before cleaning
#[derive(Debug, Deserialize)]
struct RawObservation {
    #[serde(rename = "País")]
    country: String,
    #[serde(rename = "Mes")]
    month: String,
    #[serde(rename = "Temperatura")]
    temperature: String,
    #[serde(rename = "Precipitaciones")]
    precipitation: String,
    #[serde(rename = "Latitud")]
    latitude: String,
    #[serde(rename = "Longitud")]
    longitude: String,
}

/// Counts collected while loading the dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_missing_coordinates: usize,
    /// Blank temperature or precipitation cells in kept rows
    pub missing_readings: usize,
}

impl LoadReport {
    pub fn summary(&self) -> String {
        format!(
            "Rows read: {}, kept: {}, dropped (missing coordinates): {}, blank readings: {}",
            self.rows_read, self.rows_kept, self.rows_missing_coordinates, self.missing_readings
        )
    }
}

pub struct ObservationReader {
    delimiter: u8,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read and clean the observation table at `path`
    pub fn read_observations(&self, path: &Path) -> Result<(Vec<Observation>, LoadReport)> {
        debug!("Reading observations from {}", path.display());
        let bytes = fs::read(path)?;
        let (observations, report) = self.read_from_bytes(&bytes)?;

        info!("Loaded {}: {}", path.display(), report.summary());
        Ok((observations, report))
    }

    /// Parse an in-memory table. Rows without latitude or longitude are dropped.
    pub fn read_from_bytes(&self, bytes: &[u8]) -> Result<(Vec<Observation>, LoadReport)> {
        let content = decode_source(bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        check_required_columns(&headers)?;

        let mut observations = Vec::new();
        let mut report = LoadReport::default();

        for record_result in reader.records() {
            let record = record_result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            report.rows_read += 1;

            let raw: RawObservation = record.deserialize(Some(&headers))?;
            match self.parse_row(raw, line)? {
                Some(observation) => {
                    report.missing_readings += [observation.temperature, observation.precipitation]
                        .iter()
                        .filter(|v| v.is_none())
                        .count();
                    observations.push(observation);
                    report.rows_kept += 1;
                }
                None => report.rows_missing_coordinates += 1,
            }
        }

        if report.rows_missing_coordinates > 0 {
            warn!(
                "Dropped {} rows with missing latitude or longitude",
                report.rows_missing_coordinates
            );
        }

        Ok((observations, report))
    }

    /// Clean a single row; `None` when a coordinate is absent
    fn parse_row(&self, raw: RawObservation, line: u64) -> Result<Option<Observation>> {
        let latitude = parse_coordinate(&raw.latitude).map_err(|e| at_line(e, line))?;
        let longitude = parse_coordinate(&raw.longitude).map_err(|e| at_line(e, line))?;

        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                debug!("Line {}: missing coordinates for '{}'", line, raw.country);
                return Ok(None);
            }
        };
        validate_coordinates(latitude, longitude).map_err(|e| at_line(e, line))?;

        let month = Month::parse_label(&raw.month).map_err(|e| at_line(e, line))?;
        let temperature = parse_measurement(&raw.temperature, COLUMN_TEMPERATURE, line)?;
        let precipitation = parse_measurement(&raw.precipitation, COLUMN_PRECIPITATION, line)?;

        let observation = Observation::with_readings(
            raw.country,
            month,
            temperature,
            precipitation,
            latitude,
            longitude,
        );
        observation.validate()?;

        Ok(Some(observation))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the source as UTF-8, falling back to Windows-1252 for legacy exports
fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("Source is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text
        }
    }
}

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// A measurement cell; `None` for a blank or missing-value marker
fn parse_measurement(cell: &str, column: &str, line: u64) -> Result<Option<f64>> {
    let trimmed = cell.trim();
    if MISSING_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        return Ok(None);
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| {
            DashboardError::InvalidFormat(format!(
                "Line {}: invalid {} value '{}'",
                line, column, cell
            ))
        })
}

fn at_line(err: DashboardError, line: u64) -> DashboardError {
    match err {
        DashboardError::InvalidCoordinate(msg) => {
            DashboardError::InvalidCoordinate(format!("Line {}: {}", line, msg))
        }
        DashboardError::UnknownMonth(label) => DashboardError::InvalidFormat(format!(
            "Line {}: unrecognized {} label '{}'",
            line, COLUMN_MONTH, label
        )),
        other => other,
    }
}
