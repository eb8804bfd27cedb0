//! Dataset builders shared by the compute tests and the API integration tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::ForecastPoint;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// File name used by [`write_dataset`].
pub const DATASET_FILE_NAME: &str = "pred_data.csv";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn hour(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, 0, 0)
        .expect("valid test hour")
}

/// `count` consecutive hourly points starting at `start`; the power of the
/// n-th point is `power(n)`.
pub fn hourly_points(start: NaiveDateTime, count: usize, power: impl Fn(usize) -> f64) -> Vec<ForecastPoint> {
    (0..count)
        .map(|i| ForecastPoint::new(start + Duration::hours(i as i64), power(i)))
        .collect()
}

/// Renders points in the layout of the prediction export.
pub fn to_csv(points: &[ForecastPoint]) -> String {
    let mut csv = String::from("Date,Power\n");
    for point in points {
        let _ = writeln!(csv, "{},{}", point.timestamp.format("%Y-%m-%d %H:%M:%S"), point.power);
    }
    csv
}

/// Writes raw CSV content into `dir/name` and returns the path.
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test dataset");
    path
}

/// Writes `points` as a prediction dataset into `dir`.
pub fn write_dataset(dir: &Path, points: &[ForecastPoint]) -> PathBuf {
    write_csv(dir, DATASET_FILE_NAME, &to_csv(points))
}

/// Total power of a series, for conservation checks.
pub fn total_power(points: &[ForecastPoint]) -> f64 {
    points.iter().map(|p| p.power).sum()
}

/// Float comparison for sums that went through different grouping orders.
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-6 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
