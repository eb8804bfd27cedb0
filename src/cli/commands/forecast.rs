use anyhow::{Context, Result};
use chrono::NaiveDate;
use common::{AggregatePoint, DateRange, ForecastResponse};
use compute::run_forecast;
use std::fmt::Write as _;
use tracing::{debug, info};

use crate::config::AppConfig;

/// Computes one forecast and prints it to stdout.
pub fn forecast(config: &AppConfig, start_date: Option<NaiveDate>, end_date: NaiveDate, json: bool) -> Result<()> {
    let range = DateRange::new(start_date.unwrap_or(config.range_start), end_date);
    debug!("Computing forecast for {} to {}", range.start, range.end);

    let loader = config.loader();
    let response = run_forecast(&loader, range)
        .with_context(|| format!("Forecast for {} to {} failed", range.start, range.end))?;
    info!("Forecast computed with {} points", response.points.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_report(&response));
    }
    Ok(())
}

/// Loaded hours against the hourly slots of the window.
fn coverage(point_count: usize, range: &DateRange) -> String {
    format!("{}/{}", point_count, range.hour_count())
}

fn render_series(out: &mut String, title: &str, series: &[AggregatePoint]) {
    let _ = writeln!(out, "\n{}", title);
    for point in series {
        let _ = writeln!(out, "  {:<12} {:>14.2}", point.label, point.value);
    }
}

/// Plain-text rendering of a forecast response.
pub fn render_report(response: &ForecastResponse) -> String {
    let mut out = String::new();
    let summary = &response.summary;

    let _ = writeln!(out, "Forecast {} to {}", response.range.start, response.range.end);
    let _ = writeln!(out, "  points       {:>14}", summary.point_count);
    let _ = writeln!(out, "  coverage     {:>14}", coverage(summary.point_count, &response.range));
    let _ = writeln!(out, "  total (MW)   {:>14.2}", summary.total_power);
    if let Some(mean) = summary.mean_power {
        let _ = writeln!(out, "  mean (MW)    {:>14.2}", mean);
    }
    if let Some(peak) = &summary.peak {
        let _ = writeln!(out, "  peak (MW)    {:>14.2} at {}", peak.power, peak.timestamp);
    }

    render_series(&mut out, "Daily consumption (MW)", &response.aggregates.daily);
    render_series(&mut out, "Weekly consumption (MW)", &response.aggregates.weekly);
    render_series(&mut out, "Monthly consumption (MW)", &response.aggregates.monthly);

    let _ = writeln!(out, "\nMean consumption per weekday (MW)");
    for day in &response.aggregates.by_weekday {
        match day.mean {
            Some(mean) => {
                let _ = writeln!(out, "  {:<12} {:>14.2}", day.weekday, mean);
            }
            None => {
                let _ = writeln!(out, "  {:<12} {:>14}", day.weekday, "no data");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ConfigOverrides};
    use compute::testing::{hour, hourly_points, write_dataset};

    #[test]
    fn test_report_lists_every_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), &hourly_points(hour(2024, 1, 1, 0), 48, |_| 10.0));
        let config = AppConfig::load(&ConfigOverrides {
            data_path: Some(path.display().to_string()),
            ..Default::default()
        })
        .unwrap();

        let response = run_forecast(
            &config.loader(),
            DateRange::new(config.range_start, config.default_end()),
        )
        .unwrap();
        let report = render_report(&response);

        assert!(report.contains("Forecast 2024-01-01 to 2024-01-02"));
        assert!(report.contains("25/25"));
        assert!(report.contains("2024-01-01"));
        assert!(report.contains("240.00"));
        assert!(report.contains("2024-W01"));
        assert!(report.contains("2024-01 "));
        assert!(report.contains("Monday"));
        assert!(report.contains("no data"));
    }

    #[test]
    fn test_coverage_counts_missing_hours() {
        let range = DateRange::new(hour(2024, 1, 1, 0).date(), hour(2024, 1, 2, 0).date());

        assert_eq!(coverage(25, &range), "25/25");
        assert_eq!(coverage(20, &range), "20/25");
    }

    #[test]
    fn test_forecast_command_fails_for_inverted_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), &hourly_points(hour(2024, 1, 1, 0), 48, |_| 10.0));
        let config = AppConfig::load(&ConfigOverrides {
            data_path: Some(path.display().to_string()),
            ..Default::default()
        })
        .unwrap();

        let result = forecast(
            &config,
            Some(hour(2024, 1, 5, 0).date()),
            hour(2024, 1, 1, 0).date(),
            false,
        );
        assert!(result.is_err());
    }
}
