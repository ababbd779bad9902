//! Sign-in route. Validates input locally, posts credentials once, and on
//! success reloads the app at the profile page so a fresh session store picks
//! up the new cookie.

use crate::{
    app_lib::AppError,
    components::{AlreadySignedInPanel, Alert, AlertKind, Button, Spinner},
    features::auth::{client, context::use_auth, forms::LoginForm},
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = auth.store.client().clone();
    let google_url = client::google_sign_in_url(&api);
    let is_authenticated = auth.is_authenticated;
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let login_action = Action::new_local(move |form: &LoginForm| {
        let form = form.clone();
        let api = api.clone();
        async move { client::login(&api, &form).await }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(paths::PROFILE);
                    }
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let form = LoginForm::new(email.get_untracked(), password.get_untracked());
        if let Err(err) = form.validate() {
            set_error.set(Some(err.into()));
            return;
        }

        login_action.dispatch(form);
    };

    view! {
        <section class="min-h-screen flex items-center justify-center text-white text-center bg-[#161616]">
            <Show
                when=move || !is_authenticated.get()
                fallback=|| view! { <AlreadySignedInPanel /> }
            >
                <div class="w-full py-6">
                    <h1 class="my-2 text-3xl font-bold">"SIGN IN"</h1>
                    {move || {
                        error
                            .get()
                            .map(|err| {
                                view! { <Alert kind=AlertKind::Error message=err.user_message() /> }
                            })
                    }}
                    <form class="sm:w-2/3 w-full px-4 mx-auto" on:submit=on_submit>
                        <div class="pb-2 pt-4">
                            <input
                                id="email"
                                type="email"
                                placeholder="Email"
                                autocomplete="email"
                                class="block w-full p-4 text-lg rounded-sm bg-black disabled:opacity-50"
                                disabled=move || login_action.pending().get()
                                required
                                on:input=move |event| set_email.set(event_target_value(&event))
                            />
                        </div>
                        <div class="pb-2 pt-4">
                            <input
                                id="password"
                                type="password"
                                placeholder="Password"
                                autocomplete="current-password"
                                class="block w-full p-4 text-lg rounded-sm bg-black disabled:opacity-50"
                                disabled=move || login_action.pending().get()
                                required
                                on:input=move |event| set_password.set(event_target_value(&event))
                            />
                        </div>
                        <div class="px-4 pb-2 pt-4">
                            <Button button_type="submit" disabled=login_action.pending()>
                                {move || {
                                    if login_action.pending().get() { "Signing In..." } else { "sign in" }
                                }}
                            </Button>
                        </div>
                    </form>
                    {move || {
                        login_action
                            .pending()
                            .get()
                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                    }}
                    <div class="px-4 pt-4 sm:w-2/3 w-full mx-auto">
                        <a
                            href=google_url.clone()
                            class="block w-full p-4 text-lg rounded-full border border-gray-600 hover:bg-gray-800"
                        >
                            "Continue with Google"
                        </a>
                    </div>
                    <p class="pt-4 text-gray-400">
                        "No account yet? "
                        <A href=paths::REGISTER {..} class="text-indigo-400 hover:text-indigo-300 underline">
                            "Sign Up"
                        </A>
                    </p>
                </div>
            </Show>
        </section>
    }
}
