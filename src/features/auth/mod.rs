//! Auth feature module covering the session store, the route guard, form
//! validation and the backend auth endpoints. It keeps authentication logic out
//! of the UI. Form input crosses this boundary, so nothing here logs request
//! bodies or passwords.
//!
//! Flow Overview: the store bootstraps once from `GET /user/profile`, guards
//! observe it, and logout goes through the store so every observer sees the
//! change. Register and login talk to the backend directly; a successful login
//! reloads the app so a fresh store picks up the new cookie.

pub mod client;
#[cfg(target_arch = "wasm32")]
pub(crate) mod context;
pub mod forms;
pub mod guard;
#[cfg(target_arch = "wasm32")]
mod require_auth;
pub mod state;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use require_auth::RequireAuth;
