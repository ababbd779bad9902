//! Client wrappers for the backend auth endpoints. These helpers centralize
//! paths and session-aware requests, keeping auth flows consistent and keeping
//! form input out of route code.

use crate::{
    app_lib::{ApiClient, AppError},
    features::auth::{
        forms::{LoginForm, RegisterForm},
        types::{ProfileEnvelope, UserSummary},
    },
};

/// Backend paths, relative to the configured base URL.
pub mod paths {
    pub const PROFILE: &str = "/user/profile";
    pub const LOGOUT: &str = "/auth/logout";
    pub const REGISTER: &str = "/auth/register";
    pub const LOGIN: &str = "/auth/login";
    pub const GOOGLE: &str = "/auth/google";
}

/// Fetches the current session using cookie-based auth.
/// Returns `None` when the session is missing or expired.
///
/// # Errors
/// Transport failures, non-401 error statuses and malformed envelopes.
pub async fn fetch_session(client: &ApiClient) -> Result<Option<UserSummary>, AppError> {
    let envelope: Option<ProfileEnvelope> = client.get_optional_json(paths::PROFILE).await?;
    Ok(envelope.map(|envelope| envelope.user))
}

/// Clears the current session on the server.
///
/// # Errors
/// Transport failures and error statuses, including 401.
pub async fn logout(client: &ApiClient) -> Result<(), AppError> {
    client.post_empty(paths::LOGOUT).await
}

/// Creates an account. The form is validated first and nothing is sent if it
/// fails.
///
/// # Errors
/// `AppError::Validation` for local checks, otherwise the request error.
pub async fn register(client: &ApiClient, form: &RegisterForm) -> Result<(), AppError> {
    form.validate()?;
    client.post_json(paths::REGISTER, &form.request()).await
}

/// Signs in with email and password; the backend answers with the session
/// cookie.
///
/// # Errors
/// `AppError::Validation` for local checks, otherwise the request error.
pub async fn login(client: &ApiClient, form: &LoginForm) -> Result<(), AppError> {
    form.validate()?;
    client.post_json(paths::LOGIN, &form.request()).await
}

/// Entry point of the federated sign-in flow, handled entirely by the backend.
pub fn google_sign_in_url(client: &ApiClient) -> String {
    client.url(paths::GOOGLE)
}
