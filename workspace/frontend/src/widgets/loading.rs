use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    /// What is being waited for, shown under the progress bar
    pub label: AttrValue,
}

/// Indeterminate progress bar shown while the server reads the dataset.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col items-center py-10 gap-3" role="status" aria-live="polite">
            <progress class="progress progress-primary w-56"></progress>
            <span class="text-sm text-gray-500">{props.label.clone()}</span>
        </div>
    }
}
