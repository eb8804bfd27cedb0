#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{
        setup_test_app, setup_test_app_with_points, setup_test_app_without_data,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{ForecastDefaults, ForecastResponse};
    use compute::testing::{assert_close, hour, hourly_points, total_power};

    #[tokio::test]
    async fn test_health_check() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.data_status, "available");
        assert!(body.data_source.ends_with(".csv"));
    }

    #[tokio::test]
    async fn test_health_check_reports_missing_data() {
        let (app, _dir) = setup_test_app_without_data();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.data_status, "unavailable");
    }

    #[tokio::test]
    async fn test_forecast_defaults() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast/defaults").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ForecastDefaults> = response.json();
        assert!(body.success);
        assert_eq!(body.data.range_start.to_string(), "2024-01-01");
        assert_eq!(body.data.default_end.to_string(), "2024-01-02");
    }

    #[tokio::test]
    async fn test_forecast_first_day() {
        let (app, _dir) = setup_test_app_with_points(&hourly_points(hour(2024, 1, 1, 0), 24 * 7, |_| 10.0));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast?end_date=2024-01-02").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ForecastResponse> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Forecast computed successfully");

        let forecast = body.data;
        assert_eq!(forecast.range.start.to_string(), "2024-01-01");
        assert_eq!(forecast.points.len(), 25);
        assert_eq!(forecast.aggregates.daily.len(), 2);
        assert_eq!(forecast.aggregates.daily[0].label, "2024-01-01");
        assert_eq!(forecast.aggregates.daily[0].value, 240.0);
        assert_eq!(forecast.aggregates.daily[1].label, "2024-01-02");
        assert_eq!(forecast.aggregates.daily[1].value, 10.0);
        assert_eq!(forecast.summary.total_power, 250.0);
    }

    #[tokio::test]
    async fn test_forecast_response_shape() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/forecast?start_date=2024-01-03&end_date=2024-01-10")
            .await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let data = &body["data"];

        assert_eq!(data["range"]["start"], "2024-01-03");
        assert_eq!(data["points"][0]["timestamp"], "2024-01-03T00:00:00");
        assert_eq!(data["aggregates"]["by_weekday"].as_array().unwrap().len(), 7);
        assert_eq!(data["aggregates"]["by_weekday"][0]["weekday"], "Monday");
        assert_eq!(data["aggregates"]["weekly"][0]["label"], "2024-W01");
        assert_eq!(data["aggregates"]["monthly"][0]["label"], "2024-01");
    }

    #[tokio::test]
    async fn test_forecast_sums_match_points() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast?end_date=2024-01-20").await;

        response.assert_status(StatusCode::OK);
        let forecast = response.json::<ApiResponse<ForecastResponse>>().data;
        let expected = total_power(&forecast.points);

        let daily: f64 = forecast.aggregates.daily.iter().map(|p| p.value).sum();
        let weekly: f64 = forecast.aggregates.weekly.iter().map(|p| p.value).sum();
        let monthly: f64 = forecast.aggregates.monthly.iter().map(|p| p.value).sum();
        assert_close(daily, expected);
        assert_close(weekly, expected);
        assert_close(monthly, expected);

        let last = forecast.points.last().unwrap();
        assert_eq!(last.timestamp, hour(2024, 1, 20, 0));
    }

    #[tokio::test]
    async fn test_forecast_missing_weekdays_are_null() {
        // Monday 2024-01-01 and Tuesday midnight only
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast?end_date=2024-01-02").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let by_weekday = body["data"]["aggregates"]["by_weekday"].as_array().unwrap().clone();
        assert!(by_weekday[0]["mean"].is_number());
        assert_eq!(by_weekday[1]["mean"], 0.0);
        for day in &by_weekday[2..] {
            assert!(day["mean"].is_null());
        }
    }

    #[tokio::test]
    async fn test_forecast_inverted_range() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/forecast?start_date=2024-01-05&end_date=2024-01-01")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_forecast_before_fixed_start() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast?end_date=2023-12-31").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_forecast_empty_result() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/forecast?start_date=2024-06-01&end_date=2024-06-30")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "EMPTY_RESULT");
        assert!(body.error.contains("2024-06-01"));
    }

    #[tokio::test]
    async fn test_forecast_data_unavailable() {
        let (app, _dir) = setup_test_app_without_data();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast?end_date=2024-01-02").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "DATA_UNAVAILABLE");

        // The server keeps serving after a failure
        server.get("/health").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forecast_requires_end_date() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/forecast").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_forecast_is_repeatable() {
        let (app, _dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let first: ApiResponse<ForecastResponse> = server.get("/api/v1/forecast?end_date=2024-01-15").await.json();
        let second: ApiResponse<ForecastResponse> = server.get("/api/v1/forecast?end_date=2024-01-15").await.json();

        assert_eq!(first.data, second.data);
    }
}
