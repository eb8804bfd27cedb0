use common::ForecastPoint;
use yew::prelude::*;

/// Rows rendered before the table is truncated.
const MAX_ROWS: usize = 500;

#[derive(Properties, PartialEq)]
pub struct ForecastTableProps {
    pub points: Vec<ForecastPoint>,
}

#[function_component(ForecastTable)]
pub fn forecast_table(props: &ForecastTableProps) -> Html {
    let total = props.points.len();
    let shown = total.min(MAX_ROWS);

    html! {
        <div class="card bg-base-100 shadow mb-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Forecast values"}</h3>
                {if shown < total {
                    html! { <p class="text-sm text-gray-500">{format!("Showing the first {} of {} hours", shown, total)}</p> }
                } else {
                    html! {}
                }}
                <div class="overflow-x-auto max-h-96">
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                <th>{"Date"}</th>
                                <th class="text-right">{"Power (MW)"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.points.iter().take(shown).map(|point| html! {
                                <tr key={point.timestamp.to_string()}>
                                    <td>{point.timestamp.format("%Y-%m-%d %H:%M").to_string()}</td>
                                    <td class="text-right">{format!("{:.2}", point.power)}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
