use chrono::NaiveDate;
use common::{ForecastDefaults, ForecastResponse};
use crate::api_client;

/// Builds the query path of the forecast endpoint.
pub fn forecast_endpoint(start_date: Option<NaiveDate>, end_date: NaiveDate) -> String {
    let mut url = format!("/forecast?end_date={}", end_date);
    if let Some(start) = start_date {
        url.push_str(&format!("&start_date={}", start));
    }
    url
}

pub async fn get_forecast(
    start_date: Option<NaiveDate>,
    end_date: NaiveDate,
) -> Result<ForecastResponse, String> {
    log::trace!("Fetching forecast from {:?} to {}", start_date, end_date);

    let result = api_client::get::<ForecastResponse>(&forecast_endpoint(start_date, end_date)).await;

    match &result {
        Ok(forecast) => log::info!("Fetched forecast with {} points", forecast.points.len()),
        Err(e) => log::error!("Failed to fetch forecast: {}", e),
    }

    result
}

pub async fn get_forecast_defaults() -> Result<ForecastDefaults, String> {
    log::trace!("Fetching forecast defaults");
    api_client::get::<ForecastDefaults>("/forecast/defaults").await
}
