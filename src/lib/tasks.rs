//! Fire-and-forget task spawning on whatever executor the target provides:
//! the browser microtask queue on `wasm32`, the ambient tokio runtime natively.

use std::future::Future;

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// # Panics
/// Panics when called outside a tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}
