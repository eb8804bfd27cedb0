use common::ForecastDefaults;
use yew::prelude::*;

use crate::api_client::forecast::get_forecast_defaults;

/// Progress of one API request as seen by the page.
#[derive(Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> From<Result<T, String>> for FetchState<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Error(e),
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Fetches the picker defaults once on mount. `on_loaded` fires with the
/// defaults so the caller can seed its inputs.
#[hook]
pub fn use_forecast_defaults(on_loaded: Callback<ForecastDefaults>) -> UseStateHandle<FetchState<ForecastDefaults>> {
    let state = use_state(FetchState::<ForecastDefaults>::default);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            state.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                let result = get_forecast_defaults().await;
                if let Ok(defaults) = &result {
                    on_loaded.emit(*defaults);
                }
                state.set(result.into());
            });
            || ()
        });
    }

    state
}
