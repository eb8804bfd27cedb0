//! Chart-data builder.
//!
//! Derives the secondary views of a filtered forecast: daily, weekly and
//! monthly sums plus the mean consumption per weekday. Every function is pure
//! and returns its series in calendar order.

use chrono::{Datelike, NaiveDate};
use common::{AggregatePoint, ForecastAggregates, ForecastPoint, ForecastSummary, WeekdayMean, WEEKDAY_ORDER};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Sums `power` per key, keys in ascending order.
fn sum_by<K, F>(points: &[ForecastPoint], key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&ForecastPoint) -> K,
{
    let mut groups = BTreeMap::new();
    for point in points {
        *groups.entry(key(point)).or_insert(0.0) += point.power;
    }
    groups
}

/// Sum per calendar date, labelled `YYYY-MM-DD`.
pub fn daily_sum(points: &[ForecastPoint]) -> Vec<AggregatePoint> {
    sum_by(points, |p| p.timestamp.date())
        .into_iter()
        .map(|(date, value): (NaiveDate, f64)| AggregatePoint::new(date.format("%Y-%m-%d").to_string(), value))
        .collect()
}

/// Sum per ISO week, labelled `YYYY-Www`.
///
/// Grouped on (ISO year, ISO week) so week 1 of one year never absorbs week 1
/// of the next.
pub fn weekly_sum(points: &[ForecastPoint]) -> Vec<AggregatePoint> {
    sum_by(points, |p| {
        let week = p.timestamp.date().iso_week();
        (week.year(), week.week())
    })
    .into_iter()
    .map(|((year, week), value)| AggregatePoint::new(format!("{}-W{:02}", year, week), value))
    .collect()
}

/// Sum per calendar month, labelled `YYYY-MM`.
pub fn monthly_sum(points: &[ForecastPoint]) -> Vec<AggregatePoint> {
    sum_by(points, |p| (p.timestamp.year(), p.timestamp.month()))
        .into_iter()
        .map(|((year, month), value)| AggregatePoint::new(format!("{}-{:02}", year, month), value))
        .collect()
}

/// Mean power per weekday, always Monday through Sunday.
pub fn weekday_mean(points: &[ForecastPoint]) -> Vec<WeekdayMean> {
    let mut totals = [(0.0_f64, 0_usize); 7];
    for point in points {
        let slot = &mut totals[point.timestamp.weekday().num_days_from_monday() as usize];
        slot.0 += point.power;
        slot.1 += 1;
    }

    WEEKDAY_ORDER
        .iter()
        .zip(totals)
        .map(|(weekday, (sum, count))| WeekdayMean {
            weekday: (*weekday).to_string(),
            mean: (count > 0).then(|| sum / count as f64),
        })
        .collect()
}

/// Builds the four secondary views of a filtered forecast.
#[instrument(skip(points), fields(num_points = points.len()))]
pub fn build_aggregates(points: &[ForecastPoint]) -> ForecastAggregates {
    let aggregates = ForecastAggregates {
        daily: daily_sum(points),
        weekly: weekly_sum(points),
        monthly: monthly_sum(points),
        by_weekday: weekday_mean(points),
    };

    debug!(
        "Built aggregates: {} days, {} weeks, {} months",
        aggregates.daily.len(),
        aggregates.weekly.len(),
        aggregates.monthly.len()
    );
    aggregates
}

/// Headline figures of a filtered forecast.
pub fn summarize(points: &[ForecastPoint]) -> ForecastSummary {
    let total_power: f64 = points.iter().map(|p| p.power).sum();
    let peak = points
        .iter()
        .copied()
        .reduce(|best, p| if p.power > best.power { p } else { best });

    ForecastSummary {
        point_count: points.len(),
        total_power,
        mean_power: (!points.is_empty()).then(|| total_power / points.len() as f64),
        peak,
    }
}
