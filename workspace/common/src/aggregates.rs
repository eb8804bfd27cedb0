use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::forecast::ForecastPoint;

/// Fixed display order of the weekday chart.
pub const WEEKDAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One bar or marker of a summed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AggregatePoint {
    /// `YYYY-MM-DD`, `YYYY-Www` or `YYYY-MM` depending on the series
    pub label: String,
    /// Summed power in MW
    pub value: f64,
}

impl AggregatePoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Mean consumption of one weekday. `mean` is `None` when the window holds no
/// hour of that weekday, which is not the same as a zero mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeekdayMean {
    pub weekday: String,
    pub mean: Option<f64>,
}

/// The four secondary views derived from a filtered forecast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ForecastAggregates {
    pub daily: Vec<AggregatePoint>,
    pub weekly: Vec<AggregatePoint>,
    pub monthly: Vec<AggregatePoint>,
    /// Always seven entries, Monday first
    pub by_weekday: Vec<WeekdayMean>,
}

impl ForecastAggregates {
    /// True when no view holds any data, i.e. the charts have nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
            && self.weekly.is_empty()
            && self.monthly.is_empty()
            && self.by_weekday.iter().all(|w| w.mean.is_none())
    }
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ForecastSummary {
    pub point_count: usize,
    /// Sum of every hourly value in MW
    pub total_power: f64,
    pub mean_power: Option<f64>,
    /// Hour with the highest predicted consumption
    pub peak: Option<ForecastPoint>,
}
