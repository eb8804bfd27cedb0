use chrono::NaiveDate;
use common::{ForecastDefaults, ForecastResponse};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::chart::{AggregateCharts, ForecastChart};
use super::stats::ForecastStats;
use super::table::ForecastTable;
use crate::api_client::forecast::get_forecast;
use crate::hooks::{use_forecast_defaults, FetchState};
use crate::widgets::error::ErrorDisplay;
use crate::widgets::loading::Loading;

/// Parses the value of the date input.
pub fn parse_end_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date (expected YYYY-MM-DD)", value))
}

#[function_component(ForecastView)]
pub fn forecast_view() -> Html {
    let end_date = use_state(String::new);
    let forecast = use_state(FetchState::<ForecastResponse>::default);

    let defaults = {
        let end_date = end_date.clone();
        use_forecast_defaults(Callback::from(move |loaded: ForecastDefaults| {
            log::debug!("Seeding date picker with {}", loaded.default_end);
            end_date.set(loaded.default_end.to_string());
        }))
    };
    let range_start = defaults.data().map(|loaded| loaded.range_start);

    let on_date_change = {
        let end_date = end_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            end_date.set(input.value());
        })
    };

    let on_submit = {
        let end_date = end_date.clone();
        let forecast = forecast.clone();
        Callback::from(move |_: MouseEvent| {
            let end = match parse_end_date(&end_date) {
                Ok(end) => end,
                Err(e) => {
                    forecast.set(FetchState::Error(e));
                    return;
                }
            };

            log::info!("Performing forecast from {:?} to {}", range_start, end);
            forecast.set(FetchState::Loading);
            let forecast = forecast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                forecast.set(get_forecast(range_start, end).await.into());
            });
        })
    };

    html! {
        <>
            <div class="card bg-base-100 shadow mb-6">
                <div class="card-body">
                    <h2 class="card-title">{"Forecast window"}</h2>
                    {if let Some(e) = defaults.error() {
                        html! { <p class="text-sm text-warning">{format!("Could not load defaults: {}", e)}</p> }
                    } else {
                        html! {}
                    }}
                    <div class="flex flex-wrap items-end gap-4">
                        <label class="form-control">
                            <span class="label-text">{"Start"}</span>
                            <input
                                type="date"
                                class="input input-bordered"
                                value={range_start.map(|d| d.to_string()).unwrap_or_default()}
                                disabled=true
                            />
                        </label>
                        <label class="form-control">
                            <span class="label-text">{"End date"}</span>
                            <input
                                type="date"
                                class="input input-bordered"
                                min={range_start.map(|d| d.to_string())}
                                value={(*end_date).clone()}
                                onchange={on_date_change}
                            />
                        </label>
                        <button
                            class="btn btn-primary"
                            onclick={on_submit}
                            disabled={forecast.is_loading()}
                        >
                            {"Perform forecast"}
                        </button>
                    </div>
                </div>
            </div>

            {match &*forecast {
                FetchState::NotStarted => html! {
                    <p class="text-center text-gray-500 py-8">{"Pick an end date and perform a forecast."}</p>
                },
                FetchState::Loading => html! { <Loading label="Reading forecast dataset..." /> },
                FetchState::Error(e) => html! { <ErrorDisplay message={e.clone()} /> },
                FetchState::Success(response) => html! {
                    <>
                        <ForecastStats range={response.range} summary={response.summary.clone()} />
                        <ForecastChart points={response.points.clone()} />
                        <AggregateCharts aggregates={response.aggregates.clone()} />
                        <ForecastTable points={response.points.clone()} />
                    </>
                },
            }}
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_end_date() {
        assert_eq!(
            parse_end_date("2024-01-02"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
        assert!(parse_end_date("").is_err());
        assert!(parse_end_date("02/01/2024").is_err());
    }
}
