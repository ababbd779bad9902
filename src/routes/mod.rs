mod login;
mod not_found;
mod profile;
mod register;

pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use profile::ProfilePage;
pub(crate) use register::RegisterPage;

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Routes};
use leptos_router::path;

/// Client-side route paths.
pub(crate) mod paths {
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const PROFILE: &str = "/profile";
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=|| view! { <Redirect path=paths::PROFILE /> } />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/register") view=RegisterPage />
            <Route path=path!("/profile") view=ProfilePage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
