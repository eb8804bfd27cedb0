use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::aggregates::{ForecastAggregates, ForecastSummary};

/// One hourly row of the prediction dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    /// Hour the prediction applies to
    #[schema(value_type = String)]
    pub timestamp: NaiveDateTime,
    /// Predicted consumption in MW
    pub power: f64,
}

impl ForecastPoint {
    pub fn new(timestamp: NaiveDateTime, power: f64) -> Self {
        Self { timestamp, power }
    }
}

/// Calendar window of a forecast query.
///
/// Both bounds are inclusive: the window covers every hour from `start` 00:00
/// up to and including `end` 00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window (only its midnight hour is included)
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// First hour of the window.
    pub fn first_hour(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last hour of the window.
    pub fn last_hour(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    /// Whether `timestamp` is one of the hourly slots of the window.
    pub fn contains_hour(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.first_hour()
            && timestamp <= self.last_hour()
            && (timestamp - self.first_hour()).num_seconds() % 3600 == 0
    }

    /// Number of hourly slots in the window, zero for an inverted range.
    pub fn hour_count(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        (self.last_hour() - self.first_hour()).num_hours() + 1
    }
}

/// Everything one "perform forecast" action renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastResponse {
    pub range: DateRange,
    /// Filtered hourly series, ascending by timestamp
    pub points: Vec<ForecastPoint>,
    pub aggregates: ForecastAggregates,
    pub summary: ForecastSummary,
}

/// Values used to seed the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ForecastDefaults {
    /// Fixed start of every query window
    pub range_start: NaiveDate,
    /// End date preselected in the picker
    pub default_end: NaiveDate,
}

impl ForecastDefaults {
    /// The picker opens on the day after the range start.
    pub fn from_start(range_start: NaiveDate) -> Self {
        Self {
            range_start,
            default_end: range_start.succ_opt().unwrap_or(range_start),
        }
    }
}
