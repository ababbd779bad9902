use leptos::prelude::*;

/// Full-width pill button used by the auth forms.
#[component]
pub fn Button(
    #[prop(optional)] button_type: Option<&'static str>,
    #[prop(optional, into, default = Signal::from(false))] disabled: Signal<bool>,
    #[prop(optional)] danger: bool,
    children: Children,
) -> impl IntoView {
    let button_type = button_type.unwrap_or("button");
    let palette = if danger {
        "bg-red-500 hover:bg-red-600"
    } else {
        "bg-green-500 hover:bg-green-600"
    };

    view! {
        <button
            type=button_type
            class=format!(
                "uppercase block w-full p-4 text-lg text-white rounded-full focus:outline-none disabled:opacity-50 disabled:cursor-not-allowed {palette}",
            )
            disabled=move || disabled.get()
        >
            {children()}
        </button>
    }
}
