use yew::prelude::*;

mod components;
pub mod api_client;
pub mod hooks;
pub mod settings;
pub mod widgets;

use components::forecast::view::ForecastView;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen bg-base-200">
            <header class="navbar bg-base-100 shadow px-6">
                <span class="text-xl font-bold">{"GridCast"}</span>
                <span class="ml-4 text-sm text-gray-500">{"Hourly electricity consumption forecast"}</span>
            </header>
            <main class="container mx-auto p-6">
                <ForecastView />
            </main>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== GridCast Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
