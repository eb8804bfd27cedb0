use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::{DateRange, ForecastDefaults, ForecastResponse};
use compute::error::ComputeError;
use compute::run_forecast;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::schemas::{ApiResponse, AppState, ErrorResponse, ForecastQuery};

/// HTTP status for a failed forecast computation.
pub fn error_status(error: &ComputeError) -> StatusCode {
    match error {
        ComputeError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        ComputeError::EmptyResult { .. } => StatusCode::NOT_FOUND,
        ComputeError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ComputeError::DataFrame(_) | ComputeError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: ComputeError) -> (StatusCode, Json<ErrorResponse>) {
    let status = error_status(&error);
    if error.is_recoverable() {
        warn!("Forecast request rejected: {}", error);
    } else {
        error!("Forecast computation failed: {}", error);
    }
    (status, Json(ErrorResponse::new(error.code(), error.to_string())))
}

/// Get the forecast and its aggregates for a date range
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<ForecastResponse>),
        (status = 400, description = "End date is before start date", body = ErrorResponse),
        (status = 404, description = "No forecast data in the requested range", body = ErrorResponse),
        (status = 503, description = "Forecast dataset cannot be read", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Query(query): Query<ForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_forecast function");

    let range = DateRange::new(query.start_date.unwrap_or(state.range_start), query.end_date);
    debug!("Resolved forecast range {} to {}", range.start, range.end);

    // The CSV read is blocking file I/O
    let loader = state.loader.clone();
    let result = tokio::task::spawn_blocking(move || run_forecast(loader.as_ref(), range))
        .await
        .unwrap_or_else(|e| Err(ComputeError::Runtime(format!("forecast task failed: {}", e))));

    match result {
        Ok(forecast) => {
            info!(
                "Forecast computed with {} points for {} to {}",
                forecast.points.len(),
                range.start,
                range.end
            );
            Ok(Json(ApiResponse {
                data: forecast,
                message: "Forecast computed successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Get the fixed range start and the default end date for the date picker
#[utoipa::path(
    get,
    path = "/api/v1/forecast/defaults",
    tag = "forecast",
    responses(
        (status = 200, description = "Forecast defaults retrieved successfully", body = ApiResponse<ForecastDefaults>)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_defaults(State(state): State<AppState>) -> Json<ApiResponse<ForecastDefaults>> {
    Json(ApiResponse {
        data: ForecastDefaults::from_start(state.range_start),
        message: "Forecast defaults retrieved successfully".to_string(),
        success: true,
    })
}
