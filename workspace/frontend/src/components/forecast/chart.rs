use common::{AggregatePoint, ForecastAggregates, ForecastPoint, WeekdayMean};
use plotly::common::{Fill, Line, Marker, Mode};
use plotly::{Bar, Scatter};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

/// Upper bound on playback frames of the primary chart.
pub const MAX_FRAMES: usize = 120;

const LINE_COLOR: &str = "firebrick";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, figure: JsValue);
}

/// Prefix lengths revealed by successive playback frames. Always ends with
/// the full series so the last frame matches the static chart.
pub fn frame_indices(len: usize, max_frames: usize) -> Vec<usize> {
    if len == 0 || max_frames == 0 {
        return Vec::new();
    }

    let stride = len.div_ceil(max_frames);
    let mut indices: Vec<usize> = (0..len).step_by(stride).map(|i| i + 1).collect();
    if indices.last() != Some(&len) {
        indices.push(len);
    }
    indices
}

fn forecast_trace(points: &[ForecastPoint], fill_color: &str) -> Result<Value, serde_json::Error> {
    let x: Vec<String> = points
        .iter()
        .map(|p| p.timestamp.format(TIMESTAMP_FORMAT).to_string())
        .collect();
    let y: Vec<f64> = points.iter().map(|p| p.power).collect();

    let trace = Scatter::new(x, y)
        .mode(Mode::Lines)
        .name("Forecast")
        .line(Line::new().color(LINE_COLOR).width(2.5))
        .fill(Fill::ToZeroY)
        .fill_color(fill_color.to_string());

    serde_json::to_value(&trace)
}

fn playback_menu() -> Value {
    json!([{
        "type": "buttons",
        "direction": "left",
        "showactive": true,
        "pad": {"r": 10, "t": 87},
        "x": 0.1,
        "xanchor": "right",
        "y": 0,
        "yanchor": "top",
        "buttons": [
            {
                "label": "Play",
                "method": "animate",
                "args": [null, {"frame": {"duration": 1, "redraw": true}, "fromcurrent": true}]
            },
            {
                "label": "Pause",
                "method": "animate",
                "args": [[null], {"frame": {"duration": 0, "redraw": true}, "mode": "immediate", "transition": {"duration": 0}}]
            }
        ]
    }])
}

/// Filled hourly line with Play/Pause playback that grows the line frame by frame.
pub fn primary_figure(points: &[ForecastPoint]) -> Result<Value, serde_json::Error> {
    let data = vec![forecast_trace(points, "rgba(255, 0, 0, 0.2)")?];

    let frames = frame_indices(points.len(), MAX_FRAMES)
        .into_iter()
        .map(|n| {
            Ok(json!({
                "name": n.to_string(),
                "data": [forecast_trace(&points[..n], "rgba(255, 0, 0, 0.05)")?],
            }))
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    Ok(json!({
        "data": data,
        "frames": frames,
        "layout": {
            "title": {"text": "Hourly consumption forecast"},
            "xaxis": {"title": {"text": "Date"}},
            "yaxis": {"title": {"text": "Consumption (MW)"}},
            "hovermode": "x unified",
            "height": 450,
            "updatemenus": playback_menu(),
        },
        "config": {"responsive": true},
    }))
}

fn small_layout(title: &str, x_title: &str) -> Value {
    json!({
        "title": {"text": title},
        "xaxis": {"title": {"text": x_title}, "showticklabels": true},
        "yaxis": {"title": {"text": "Consumption (MW)"}, "showticklabels": true},
        "hovermode": "x unified",
        "height": 250,
        "margin": {"t": 40},
    })
}

/// Lines-and-markers chart of one summed series.
pub fn sum_figure(series: &[AggregatePoint], title: &str, x_title: &str) -> Result<Value, serde_json::Error> {
    let x: Vec<String> = series.iter().map(|p| p.label.clone()).collect();
    let y: Vec<f64> = series.iter().map(|p| p.value).collect();

    let trace = Scatter::new(x, y)
        .mode(Mode::LinesMarkers)
        .name(title)
        .line(Line::new().color(LINE_COLOR).width(2.5))
        .marker(Marker::new().size(5));

    Ok(json!({
        "data": [serde_json::to_value(&trace)?],
        "layout": small_layout(title, x_title),
        "config": {"responsive": true},
    }))
}

/// Bar chart of the Monday..Sunday means. Missing weekdays become null bars.
pub fn weekday_figure(by_weekday: &[WeekdayMean]) -> Result<Value, serde_json::Error> {
    let x: Vec<String> = by_weekday.iter().map(|w| w.weekday.clone()).collect();
    let y: Vec<Option<f64>> = by_weekday.iter().map(|w| w.mean).collect();

    let trace = Bar::new(x, y)
        .name("Mean consumption per weekday")
        .marker(Marker::new().color(LINE_COLOR));

    Ok(json!({
        "data": [serde_json::to_value(&trace)?],
        "layout": small_layout("Consumption per weekday", "Weekday"),
        "config": {"responsive": true},
    }))
}

#[derive(Properties, PartialEq)]
pub struct PlotlyChartProps {
    pub div_id: String,
    pub figure: Value,
    #[prop_or(String::from("400px"))]
    pub height: String,
}

#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.figure.clone(), props.div_id.clone()),
        move |(container_ref, figure, div_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);
                match js_sys::JSON::parse(&figure.to_string()) {
                    Ok(figure_js) => new_plot(div_id, figure_js),
                    Err(e) => log::error!("Failed to hand figure {} to plotly: {:?}", div_id, e),
                }
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} style={format!("width:100%; height:{};", props.height)}></div>
    }
}

fn render_figure(div_id: &str, figure: Result<Value, serde_json::Error>, height: &str) -> Html {
    match figure {
        Ok(figure) => html! {
            <PlotlyChart div_id={div_id.to_string()} figure={figure} height={height.to_string()} />
        },
        Err(e) => {
            log::error!("Failed to build chart {}: {}", div_id, e);
            html! {
                <div class="alert alert-error"><span>{format!("Chart unavailable: {}", e)}</span></div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ForecastChartProps {
    pub points: Vec<ForecastPoint>,
}

#[function_component(ForecastChart)]
pub fn forecast_chart(props: &ForecastChartProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow mb-6">
            <div class="card-body">
                {render_figure("forecast-chart", primary_figure(&props.points), "450px")}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AggregateChartsProps {
    pub aggregates: ForecastAggregates,
}

#[function_component(AggregateCharts)]
pub fn aggregate_charts(props: &AggregateChartsProps) -> Html {
    let aggregates = &props.aggregates;

    if aggregates.is_empty() {
        return html! {
            <div class="text-center py-8 text-gray-500">
                <i class="fas fa-chart-bar text-4xl mb-4 opacity-50"></i>
                <p>{"No consumption data to aggregate for this window."}</p>
            </div>
        };
    }

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-6">
            <div class="card bg-base-100 shadow"><div class="card-body">
                {render_figure("daily-chart", sum_figure(&aggregates.daily, "Daily consumption", "Day"), "250px")}
            </div></div>
            <div class="card bg-base-100 shadow"><div class="card-body">
                {render_figure("weekly-chart", sum_figure(&aggregates.weekly, "Weekly consumption", "Week"), "250px")}
            </div></div>
            <div class="card bg-base-100 shadow"><div class="card-body">
                {render_figure("monthly-chart", sum_figure(&aggregates.monthly, "Monthly consumption", "Month"), "250px")}
            </div></div>
            <div class="card bg-base-100 shadow"><div class="card-body">
                {render_figure("weekday-chart", weekday_figure(&aggregates.by_weekday), "250px")}
            </div></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn points(count: usize) -> Vec<ForecastPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        (0..count)
            .map(|i| ForecastPoint {
                timestamp: start + chrono::Duration::hours(i as i64),
                power: 10.0,
            })
            .collect()
    }

    #[test]
    fn test_frame_indices_short_series_has_one_frame_per_point() {
        assert_eq!(frame_indices(5, MAX_FRAMES), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_frame_indices_long_series_is_capped() {
        let indices = frame_indices(8784, MAX_FRAMES);
        assert!(indices.len() <= MAX_FRAMES + 1);
        assert_eq!(indices.first(), Some(&1));
        assert_eq!(indices.last(), Some(&8784));
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_frame_indices_empty() {
        assert!(frame_indices(0, MAX_FRAMES).is_empty());
        assert!(frame_indices(10, 0).is_empty());
    }

    #[test]
    fn test_primary_figure_frames_end_with_full_series() {
        let figure = primary_figure(&points(25)).unwrap();

        let frames = figure["frames"].as_array().unwrap();
        assert_eq!(frames.len(), 25);
        let last_x = frames[24]["data"][0]["x"].as_array().unwrap();
        assert_eq!(last_x.len(), 25);
        assert_eq!(figure["data"][0]["x"][0], "2024-01-01 00:00:00");
        assert_eq!(figure["layout"]["updatemenus"][0]["buttons"][0]["label"], "Play");
        assert_eq!(figure["layout"]["updatemenus"][0]["buttons"][1]["label"], "Pause");
    }

    #[test]
    fn test_weekday_figure_keeps_missing_days_as_null() {
        let by_weekday = vec![
            WeekdayMean { weekday: "Monday".to_string(), mean: Some(5.0) },
            WeekdayMean { weekday: "Tuesday".to_string(), mean: None },
        ];

        let figure = weekday_figure(&by_weekday).unwrap();

        assert_eq!(figure["data"][0]["y"][0], 5.0);
        assert!(figure["data"][0]["y"][1].is_null());
    }

    #[test]
    fn test_sum_figure_uses_labels_as_x() {
        let series = vec![AggregatePoint::new("2024-W01", 168.0)];

        let figure = sum_figure(&series, "Weekly consumption", "Week").unwrap();

        assert_eq!(figure["data"][0]["x"][0], "2024-W01");
        assert_eq!(figure["data"][0]["y"][0], 168.0);
        assert_eq!(figure["layout"]["title"]["text"], "Weekly consumption");
    }
}
