use crate::features::auth::{
    context::use_auth,
    guard::{CHECKING_MESSAGE, GuardView, RouteGuard},
};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Renders `children` only for an authenticated session. The redirect is
/// emitted by the guard from the store's mutation path and merely executed
/// here, so repeated renders never navigate twice.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let navigate = use_navigate();
    let (redirect_to, set_redirect_to) = signal::<Option<String>>(None);

    let handle = RouteGuard::default().attach(&auth.store, move |path: &str| {
        set_redirect_to.set(Some(path.to_string()));
    });
    on_cleanup(move || drop(handle));

    Effect::new(move |_| {
        if let Some(path) = redirect_to.get() {
            // UX-only guard; real access control lives on the API.
            navigate(&path, Default::default());
        }
    });

    view! {
        {move || match session.with(RouteGuard::view) {
            GuardView::Placeholder => {
                view! {
                    <div class="min-h-screen bg-gray-100 flex items-center justify-center">
                        <div class="text-xl">{CHECKING_MESSAGE}</div>
                    </div>
                }
                    .into_any()
            }
            GuardView::Nothing => ().into_any(),
            GuardView::Children => children().into_any(),
        }}
    }
}
