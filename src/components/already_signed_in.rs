use crate::{features::auth::context::use_auth, routes::paths};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;

/// Shown on the login and register pages when a session already exists.
#[component]
pub fn AlreadySignedInPanel() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let email = Signal::derive(move || {
        session.with(|session| session.user().map(|user| user.email.clone()).unwrap_or_default())
    });
    let store = auth.store.clone();

    view! {
        <div class="sm:w-2/3 w-full mx-auto px-4 py-8 space-y-6 text-center">
            <h2 class="text-2xl font-bold">"Already Signed In"</h2>
            <p class="text-gray-400">
                "You are signed in as " <span class="text-white">{move || email.get()}</span> "."
            </p>
            <A
                href=paths::PROFILE
                {..}
                class="block w-full p-4 text-lg rounded-full bg-green-500 hover:bg-green-600"
            >
                "Go to Profile"
            </A>
            <button
                class="block w-full p-4 text-lg rounded-full border border-gray-600 hover:bg-gray-800"
                on:click=move |_| {
                    let store = store.clone();
                    spawn_local(async move {
                        store.logout().await;
                    });
                }
            >
                "Sign Out"
            </button>
        </div>
    }
}
