use chrono::NaiveDate;
use common::{
    AggregatePoint, DateRange, ForecastAggregates, ForecastDefaults, ForecastPoint,
    ForecastResponse, ForecastSummary, WeekdayMean,
};
use compute::loader::ForecastLoader;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

pub use common::{ApiResponse, ErrorResponse};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Source of the precomputed predictions
    pub loader: Arc<dyn ForecastLoader>,
    /// Fixed start of every query window
    pub range_start: NaiveDate,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForecastQuery {
    /// Last day of the window (YYYY-MM-DD); only its midnight hour is included
    pub end_date: NaiveDate,
    /// First day of the window (YYYY-MM-DD), defaults to the configured range start
    pub start_date: Option<NaiveDate>,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Location of the prediction dataset
    pub data_source: String,
    /// Whether the prediction dataset can be read
    pub data_status: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecast::get_forecast,
        crate::handlers::forecast::get_forecast_defaults,
    ),
    components(
        schemas(
            ApiResponse<ForecastResponse>,
            ApiResponse<ForecastDefaults>,
            ErrorResponse,
            HealthResponse,
            ForecastQuery,
            ForecastResponse,
            ForecastDefaults,
            ForecastPoint,
            ForecastAggregates,
            ForecastSummary,
            AggregatePoint,
            WeekdayMean,
            DateRange,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecast", description = "Hourly consumption forecast endpoints"),
    ),
    info(
        title = "GridCast API",
        description = "Hourly electricity consumption forecasts for the national grid, with daily, weekly, monthly and weekday aggregates",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
