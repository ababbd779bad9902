//! Sign-up route. All checks (required fields, matching confirmation, minimum
//! length) run before anything is sent; server failures show the backend's
//! `message` or a generic fallback. Success leads to the sign-in page.

use crate::{
    app_lib::AppError,
    components::{AlreadySignedInPanel, Alert, AlertKind, Button},
    features::auth::{client, context::use_auth, forms::RegisterForm},
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_navigate};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let api = auth.store.client().clone();
    let is_authenticated = auth.is_authenticated;
    let navigate = use_navigate();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let register_action = Action::new_local(move |form: &RegisterForm| {
        let form = form.clone();
        let api = api.clone();
        async move { client::register(&api, &form).await }
    });

    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(()) => {
                    tracing::info!("account created");
                    navigate(paths::LOGIN, Default::default());
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let form = RegisterForm::new(
            name.get_untracked(),
            email.get_untracked(),
            password.get_untracked(),
            confirm_password.get_untracked(),
        );
        if let Err(err) = form.validate() {
            set_error.set(Some(err.into()));
            return;
        }

        register_action.dispatch(form);
    };

    let pending = register_action.pending();
    let field_class = "block w-full p-4 text-lg rounded-sm bg-black disabled:opacity-50";

    view! {
        <section class="min-h-screen flex items-center justify-center text-white text-center bg-[#161616]">
            <Show
                when=move || !is_authenticated.get()
                fallback=|| view! { <AlreadySignedInPanel /> }
            >
                <div class="w-full py-6">
                    <h1 class="my-2 text-3xl font-bold">"SIGN UP"</h1>
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
                                id="name"
                                type="text"
                                placeholder="Full Name"
                                autocomplete="name"
                                class=field_class
                                disabled=move || pending.get()
                                required
                                on:input=move |event| set_name.set(event_target_value(&event))
                            />
                        </div>
                        <div class="pb-2 pt-4">
                            <input
                                id="email"
                                type="email"
                                placeholder="Email"
                                autocomplete="email"
                                class=field_class
                                disabled=move || pending.get()
                                required
                                on:input=move |event| set_email.set(event_target_value(&event))
                            />
                        </div>
                        <div class="pb-2 pt-4">
                            <input
                                id="password"
                                type="password"
                                placeholder="Password"
                                autocomplete="new-password"
                                class=field_class
                                disabled=move || pending.get()
                                required
                                on:input=move |event| set_password.set(event_target_value(&event))
                            />
                        </div>
                        <div class="pb-2 pt-4">
                            <input
                                id="confirm_password"
                                type="password"
                                placeholder="Confirm Password"
                                autocomplete="new-password"
                                class=field_class
                                disabled=move || pending.get()
                                required
                                on:input=move |event| {
                                    set_confirm_password.set(event_target_value(&event));
                                }
                            />
                        </div>
                        <div class="px-4 pb-2 pt-4">
                            <Button button_type="submit" disabled=pending>
                                {move || if pending.get() { "Creating Account..." } else { "sign up" }}
                            </Button>
                        </div>
                    </form>
                    <p class="pt-4 text-gray-400">
                        "Already have an account? "
                        <A href=paths::LOGIN {..} class="text-indigo-400 hover:text-indigo-300 underline">
                            "Sign In"
                        </A>
                    </p>
                </div>
            </Show>
        </section>
    }
}
