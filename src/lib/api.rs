//! HTTP transport for the backend JSON API with a fixed base URL, consistent
//! timeouts and error handling. Every request carries the ambient credentials
//! (the `HttpOnly` session cookie) and defaults to `Content-Type:
//! application/json`. Feature clients go through `ApiClient` so base URL and
//! credential policy are enforced in one place. Bodies are never logged.

use super::{
    config::AppConfig,
    errors::{AppError, error_message_from_body},
};
use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{Instrument, debug, info_span};

/// Shared request transport. Cloning is cheap; clones share the connection
/// pool and, on native targets, the cookie jar.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    timeout: Duration,
}

impl ApiClient {
    /// Builds a client from the resolved configuration.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let builder = reqwest::Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .cookie_store(true)
            .timeout(config.request_timeout);

        let http = builder
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    /// Fetches JSON.
    ///
    /// # Errors
    /// Transport failures, non-2xx statuses and undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(Method::GET, path, None).await?;
        handle_json_response(response).await
    }

    /// Fetches JSON and returns `None` on 204 or 401.
    ///
    /// # Errors
    /// Transport failures, other non-2xx statuses and undecodable bodies.
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, AppError> {
        let response = self.send(Method::GET, path, None).await?;
        handle_optional_json_response(response).await
    }

    /// Posts JSON and expects no meaningful response body.
    ///
    /// # Errors
    /// Encoding failures, transport failures and non-2xx statuses.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let payload = encode(body)?;
        let response = self.send(Method::POST, path, Some(payload)).await?;
        handle_empty_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Encoding failures, transport failures, non-2xx statuses and undecodable bodies.
    pub async fn post_json_response<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let payload = encode(body)?;
        let response = self.send(Method::POST, path, Some(payload)).await?;
        handle_json_response(response).await
    }

    /// Posts an empty body, used to clear a session.
    ///
    /// # Errors
    /// Transport failures and non-2xx statuses.
    pub async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        let response = self.send(Method::POST, path, Some(String::new())).await?;
        handle_empty_response(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Response, AppError> {
        let url = self.url(path);
        let span = info_span!("http.request", http.method = %method, url = %url);

        let mut request = self.http.request(method, &url);
        if let Some(payload) = body {
            request = request.body(payload);
        }

        let response = self.dispatch(request).instrument(span).await?;
        debug!(status = response.status().as_u16(), url = %url, "response received");
        Ok(response)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, AppError> {
        request.send().await.map_err(map_request_error)
    }

    /// The browser fetch has no built-in deadline, so race it against a timer.
    #[cfg(target_arch = "wasm32")]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, AppError> {
        use futures::future::{Either, select};
        use gloo_timers::future::TimeoutFuture;

        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let send = Box::pin(request.fetch_credentials_include().send());
        let deadline = Box::pin(TimeoutFuture::new(millis));

        match select(send, deadline).await {
            Either::Left((result, _)) => result.map_err(map_request_error),
            Either::Right(((), _)) => Err(timeout_error()),
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn timeout_error() -> AppError {
    AppError::Timeout("Request timed out. Please try again.".to_string())
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        timeout_error()
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: error_message_from_body(&body),
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

/// Handles empty responses and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

/// Parses optional JSON responses and treats 204/401 as no session.
async fn handle_optional_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, AppError> {
    match response.status() {
        StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED => Ok(None),
        status if status.is_success() => response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}"))),
        _ => Err(http_error(response).await),
    }
}
