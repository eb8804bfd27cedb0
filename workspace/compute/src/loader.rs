//! Forecast loader.
//!
//! Reads the precomputed prediction table and returns the hourly points that
//! fall inside a requested [`DateRange`]. The table is read fresh on every
//! call; nothing is cached.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DateRange, ForecastPoint};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{ComputeError, Result};

/// Timestamp layouts accepted in the date column, tried in order.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Source of forecast points for a date range.
pub trait ForecastLoader: Send + Sync + std::fmt::Debug {
    /// Loads the points whose timestamp lies on the hourly grid of `range`.
    ///
    /// Fails with [`ComputeError::InvalidRange`] when `range.end < range.start`
    /// and with [`ComputeError::EmptyResult`] when nothing matches.
    fn load_forecast(&self, range: DateRange) -> Result<Vec<ForecastPoint>>;

    /// Human readable description of where the data comes from.
    fn source(&self) -> String;

    /// Cheap probe used by the health endpoint.
    fn is_available(&self) -> bool;
}

/// Names of the two columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumns {
    pub date: String,
    pub power: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            power: "Power".to_string(),
        }
    }
}

/// Loads predictions from a CSV file with a timestamp and a power column.
#[derive(Debug, Clone)]
pub struct CsvForecastLoader {
    path: PathBuf,
    columns: CsvColumns,
}

impl CsvForecastLoader {
    /// Creates a loader reading the default `Date` and `Power` columns.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_columns(path, CsvColumns::default())
    }

    pub fn with_columns(path: impl Into<PathBuf>, columns: CsvColumns) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole dataset, sorted ascending by timestamp.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read_dataset(&self) -> Result<Vec<ForecastPoint>> {
        trace!("Reading forecast dataset");

        if !self.path.is_file() {
            warn!("Forecast file does not exist");
            return Err(ComputeError::DataUnavailable(format!(
                "Forecast file {} does not exist",
                self.path.display()
            )));
        }

        // Infer over every row so a fractional value after integer rows still
        // widens the power column to a float.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;
        debug!("Forecast CSV parsed into DataFrame with {} rows", df.height());

        let mut points = dataframe_to_points(&df, &self.columns)?;
        points.sort_by_key(|p| p.timestamp);

        if let Some(pair) = points.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
            return Err(ComputeError::DataUnavailable(format!(
                "Duplicate timestamp {} in forecast dataset",
                pair[0].timestamp
            )));
        }

        debug!("Loaded {} forecast points", points.len());
        Ok(points)
    }
}

impl ForecastLoader for CsvForecastLoader {
    #[instrument(skip(self), fields(start = %range.start, end = %range.end))]
    fn load_forecast(&self, range: DateRange) -> Result<Vec<ForecastPoint>> {
        if !range.is_valid() {
            warn!("Rejecting inverted date range");
            return Err(ComputeError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        let dataset = self.read_dataset()?;
        let points = filter_range(&dataset, range);

        if points.is_empty() {
            info!("No forecast points inside the requested range");
            return Err(ComputeError::EmptyResult {
                start: range.start,
                end: range.end,
            });
        }

        info!(
            "Selected {} of {} forecast points",
            points.len(),
            dataset.len()
        );
        Ok(points)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

/// Loads `[start 00:00, end 00:00]` from the CSV at `path` using the default
/// column names.
pub fn load_forecast(path: impl AsRef<Path>, start: NaiveDate, end: NaiveDate) -> Result<Vec<ForecastPoint>> {
    CsvForecastLoader::new(path.as_ref()).load_forecast(DateRange::new(start, end))
}

/// Keeps the points lying on the hourly grid of `range`, preserving order.
pub fn filter_range(points: &[ForecastPoint], range: DateRange) -> Vec<ForecastPoint> {
    points
        .iter()
        .filter(|p| range.contains_hour(p.timestamp))
        .copied()
        .collect()
}

/// Parses a timestamp cell. A bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_matches('"');

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Converts the raw CSV frame into forecast points.
fn dataframe_to_points(df: &DataFrame, columns: &CsvColumns) -> Result<Vec<ForecastPoint>> {
    let date_col = df.column(&columns.date)?;
    let power_col = df.column(&columns.power)?;

    let mut points = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let raw_timestamp = match date_col.get(i)? {
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            AnyValue::Null => {
                return Err(ComputeError::DataUnavailable(format!(
                    "Missing timestamp at row {}",
                    i
                )));
            }
            other => other.to_string(),
        };
        let timestamp = parse_timestamp(&raw_timestamp).ok_or_else(|| {
            ComputeError::DataUnavailable(format!(
                "Invalid timestamp '{}' at row {}",
                raw_timestamp, i
            ))
        })?;

        let power = match power_col.get(i)? {
            AnyValue::Null => {
                return Err(ComputeError::DataUnavailable(format!(
                    "Missing power value at row {}",
                    i
                )));
            }
            value => value.try_extract::<f64>().map_err(|e| {
                ComputeError::DataUnavailable(format!(
                    "Non-numeric power value at row {}: {}",
                    i, e
                ))
            })?,
        };
        if !power.is_finite() || power < 0.0 {
            return Err(ComputeError::DataUnavailable(format!(
                "Invalid power value {} at row {}",
                power, i
            )));
        }

        points.push(ForecastPoint::new(timestamp, power));
    }

    Ok(points)
}
