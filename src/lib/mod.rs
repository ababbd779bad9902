//! Shared frontend utilities for API access, configuration, errors, logging and
//! build metadata.
//!
//! ## Session Flow
//!
//! 1. **Bootstrap:** On startup the session store sends one credentialed
//!    `GET /user/profile`. A `{ user }` envelope means the cookie is valid.
//! 2. **Guard:** Protected routes wait for the check, then render or redirect
//!    to `/login`.
//! 3. **Logout:** `POST /auth/logout` asks the backend to drop the cookie; the
//!    store clears its cached user once the backend confirms.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. The session cookie is `HttpOnly`
//! and never visible here; callers must still avoid logging form input.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod tasks;
pub mod telemetry;

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::AppError;
