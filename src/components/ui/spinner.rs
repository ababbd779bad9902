use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div
            class="inline-block h-6 w-6 animate-spin rounded-full border-4 border-gray-600 border-t-green-500"
            role="status"
            aria-live="polite"
            aria-label="Loading"
        ></div>
    }
}
