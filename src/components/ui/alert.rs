//! Inline banners for form errors. Messages must be safe to render;
//! never pass raw form input or credentials.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
}

#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => "bg-red-500 text-white p-3 rounded mb-4 mx-4",
    };

    view! { <div class=class role="alert">{message}</div> }
}
