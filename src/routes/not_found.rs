use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-100 flex flex-col items-center justify-center gap-4">
            <h1 class="text-6xl font-black text-gray-300">"404"</h1>
            <p class="text-gray-600">"Page not found"</p>
            <A href=paths::PROFILE {..} class="text-indigo-500 hover:text-indigo-400 underline">
                "Back to your profile"
            </A>
        </div>
    }
}
