pub mod aggregate;
pub mod error;
pub mod loader;
pub mod testing;

use common::{DateRange, ForecastResponse};
use tracing::{info, instrument};

use aggregate::{build_aggregates, summarize};
use loader::ForecastLoader;

/// Runs one forecast request end to end: loads the window and derives every
/// chart series from it.
///
/// This is what a single "perform forecast" action computes; nothing is kept
/// between calls.
#[instrument(skip(loader), fields(source = %loader.source()))]
pub fn run_forecast(loader: &dyn ForecastLoader, range: DateRange) -> error::Result<ForecastResponse> {
    let points = loader.load_forecast(range)?;
    let aggregates = build_aggregates(&points);
    let summary = summarize(&points);

    info!(
        "Forecast for {}..{} computed with {} points",
        range.start,
        range.end,
        points.len()
    );

    Ok(ForecastResponse {
        range,
        points,
        aggregates,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::ComputeError;
    use loader::CsvForecastLoader;
    use testing::{date, hour, hourly_points, write_dataset};

    /// A full week of data queried through the default pipeline.
    #[test]
    fn test_run_forecast_full_week() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), &hourly_points(hour(2024, 1, 1, 0), 24 * 31, |_| 1.0));
        let loader = CsvForecastLoader::new(path);

        let response = run_forecast(&loader, DateRange::new(date(2024, 1, 1), date(2024, 1, 8))).unwrap();

        // Seven full days plus midnight of the eighth
        assert_eq!(response.points.len(), 169);
        assert_eq!(response.aggregates.daily.len(), 8);
        assert_eq!(response.aggregates.weekly.len(), 2);
        assert_eq!(response.aggregates.weekly[0].value, 168.0);
        assert_eq!(response.aggregates.monthly.len(), 1);
        assert!(response.aggregates.by_weekday.iter().all(|w| w.mean == Some(1.0)));
        assert_eq!(response.summary.point_count, 169);
        assert_eq!(response.summary.total_power, 169.0);
    }

    #[test]
    fn test_run_forecast_propagates_loader_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), &hourly_points(hour(2024, 1, 1, 0), 24, |_| 1.0));
        let loader = CsvForecastLoader::new(path);

        let err = run_forecast(&loader, DateRange::new(date(2024, 2, 1), date(2024, 1, 1))).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidRange { .. }));

        let err = run_forecast(&loader, DateRange::new(date(2024, 3, 1), date(2024, 3, 2))).unwrap_err();
        assert!(matches!(err, ComputeError::EmptyResult { .. }));
    }
}
