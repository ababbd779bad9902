//! Profile route. Everything shown comes from the session store's cached user;
//! the guard handles the unauthenticated case, including after logout.

use crate::{
    components::Button,
    features::{
        auth::{RequireAuth, context::use_auth},
        profile::{AccountKind, ProfileView},
    },
};
use leptos::{prelude::*, task::spawn_local};

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ProfileDetails />
        </RequireAuth>
    }
}

#[component]
fn ProfileDetails() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let store = auth.store.clone();
    let profile = Memo::new(move |_| session.with(ProfileView::from_session));
    let (logging_out, set_logging_out) = signal(false);

    let on_logout = move |_| {
        let store = store.clone();
        set_logging_out.set(true);
        spawn_local(async move {
            let outcome = store.logout().await;
            tracing::debug!(?outcome, "logout finished");
            set_logging_out.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-gray-100 py-8">
            <div class="max-w-2xl mx-auto">
                <div class="bg-white rounded-lg shadow-md p-6 mb-6 flex justify-between items-center">
                    <h1 class="text-3xl font-bold text-gray-800">"Profile"</h1>
                    <div class="w-40">
                        <Button danger=true disabled=logging_out on:click=on_logout>
                            "Logout"
                        </Button>
                    </div>
                </div>
                {move || {
                    profile
                        .get()
                        .map(|profile| {
                            let badge = match profile.account_kind {
                                AccountKind::Google => "bg-blue-100 text-blue-800",
                                AccountKind::Email => "bg-green-100 text-green-800",
                            };
                            view! {
                                <div class="bg-white rounded-lg shadow-md p-6 space-y-4">
                                    <h2 class="text-xl font-semibold">"Account Information"</h2>
                                    <ProfileField label="Name" value=profile.name />
                                    <ProfileField label="Email" value=profile.email />
                                    <div>
                                        <span class="block text-sm font-medium text-gray-700">
                                            "Account Type"
                                        </span>
                                        <span class=format!(
                                            "mt-1 inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {badge}",
                                        )>{profile.account_kind.label()}</span>
                                    </div>
                                    <ProfileField label="Member Since" value=profile.member_since />
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}

#[component]
fn ProfileField(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <span class="block text-sm font-medium text-gray-700">{label}</span>
            <p class="mt-1 text-lg text-gray-900">{value}</p>
        </div>
    }
}
