//! Build-time configuration for the backend endpoint with an optional runtime
//! override. In the browser the override is read from `window.NEXUS_CONFIG`
//! (if present) so static deployments can change endpoints without rebuilding;
//! native builds read the process environment instead. Configuration values are
//! public; do not store secrets here.

use std::time::Duration;
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";
/// Default request timeout (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
const API_BASE_URL_VAR: &str = "NEXUS_BACKEND_URL";
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
const TIMEOUT_VAR: &str = "NEXUS_REQUEST_TIMEOUT_MS";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::default();

        let build_time = RuntimeConfig {
            api_base_url: option_env!("NEXUS_BACKEND_URL").and_then(normalize_runtime_value),
            request_timeout_ms: option_env!("NEXUS_REQUEST_TIMEOUT_MS")
                .and_then(normalize_runtime_value),
        };
        apply_runtime_overrides(&mut config, build_time);

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Config pointing at an explicit backend, keeping the default timeout.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    request_timeout_ms: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        match Url::parse(&value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => config.api_base_url = value,
            Ok(url) => {
                tracing::warn!(scheme = url.scheme(), "ignoring backend URL with unsupported scheme");
            }
            Err(err) => tracing::warn!("ignoring invalid backend URL {value:?}: {err}"),
        }
    }
    if let Some(value) = runtime.request_timeout_ms {
        match value.parse::<u64>() {
            Ok(ms) if ms > 0 => config.request_timeout = Duration::from_millis(ms),
            _ => tracing::warn!("ignoring invalid request timeout {value:?}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("NEXUS_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        request_timeout_ms: read_runtime_value(&object, "request_timeout_ms"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    let read = |key: &str| {
        std::env::var(key)
            .ok()
            .and_then(|value| normalize_runtime_value(&value))
    };

    Some(RuntimeConfig {
        api_base_url: read(API_BASE_URL_VAR),
        request_timeout_ms: read(TIMEOUT_VAR),
    })
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let value = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| format!("{number:.0}")))?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.nexus.dev "),
            Some("https://api.nexus.dev".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            request_timeout_ms: normalize_runtime_value("  "),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override/api"),
            request_timeout_ms: normalize_runtime_value("2500"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override/api");
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn apply_runtime_overrides_rejects_invalid_values() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: Some("not a url".to_string()),
            request_timeout_ms: Some("soon".to_string()),
        };
        apply_runtime_overrides(&mut config, runtime);
        assert_eq!(config, AppConfig::default());

        let runtime = RuntimeConfig {
            api_base_url: Some("ftp://files.nexus.dev".to_string()),
            request_timeout_ms: Some("0".to_string()),
        };
        apply_runtime_overrides(&mut config, runtime);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_defaults_to_local_backend() {
        temp_env::with_vars(
            [
                (API_BASE_URL_VAR, None::<&str>),
                (TIMEOUT_VAR, None::<&str>),
            ],
            || {
                let config = AppConfig::load();
                let expected = option_env!("NEXUS_BACKEND_URL")
                    .and_then(normalize_runtime_value)
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
                assert_eq!(config.api_base_url, expected);
            },
        );
    }

    #[test]
    fn load_reads_environment() {
        temp_env::with_vars(
            [
                (API_BASE_URL_VAR, Some("https://api.nexus.dev/api")),
                (TIMEOUT_VAR, Some("1500")),
            ],
            || {
                let config = AppConfig::load();
                assert_eq!(config.api_base_url, "https://api.nexus.dev/api");
                assert_eq!(config.request_timeout, Duration::from_millis(1500));
            },
        );
    }
}
