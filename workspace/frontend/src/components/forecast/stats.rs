use common::{DateRange, ForecastSummary};
use yew::prelude::*;

fn format_mw(value: f64) -> String {
    format!("{:.1} MW", value)
}

#[derive(Properties, PartialEq)]
pub struct ForecastStatsProps {
    pub range: DateRange,
    pub summary: ForecastSummary,
}

#[function_component(ForecastStats)]
pub fn forecast_stats(props: &ForecastStatsProps) -> Html {
    let summary = &props.summary;

    let mean = summary.mean_power.map(format_mw).unwrap_or_else(|| "-".to_string());
    let (peak_value, peak_desc) = match &summary.peak {
        Some(peak) => (format_mw(peak.power), peak.timestamp.format("%Y-%m-%d %H:%M").to_string()),
        None => ("-".to_string(), String::new()),
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-4 gap-4 mb-6">
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Hours"}</div>
                    <div class="stat-value">{summary.point_count}</div>
                    <div class="stat-desc">
                        {format!("of {} slots, {} to {}", props.range.hour_count(), props.range.start, props.range.end)}
                    </div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Total consumption"}</div>
                    <div class="stat-value text-primary">{format_mw(summary.total_power)}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Mean per hour"}</div>
                    <div class="stat-value">{mean}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Peak hour"}</div>
                    <div class="stat-value text-error">{peak_value}</div>
                    <div class="stat-desc">{peak_desc}</div>
                </div>
            </div>
        </div>
    }
}
