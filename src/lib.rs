//! Browser client for Nexus Publish.
//!
//! The platform-independent core (configuration, HTTP transport, session
//! store, route guard, form validation) builds and tests on any target. The
//! Leptos UI on top of it is compiled for `wasm32` only.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

/// Installs logging and mounts the app on `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    app_lib::telemetry::init();
    tracing::info!(
        version = app_lib::build_info::version(),
        commit = app_lib::build_info::git_commit_hash(),
        "starting nexus-web"
    );
    leptos::mount::mount_to_body(app::App);
}
