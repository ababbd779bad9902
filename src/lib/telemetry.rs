//! Log routing. Core modules emit `tracing` events; in the browser those fall
//! through to the `log` facade (via tracing's `log` feature) and land in the
//! devtools console. Native builds install a `tracing-subscriber` formatter
//! filtered by `RUST_LOG`. Never log passwords, cookies or response bodies.

#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // A second call only fails because a logger is already installed.
    let _ = console_log::init_with_level(level);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
