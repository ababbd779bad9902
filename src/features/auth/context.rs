//! Leptos bridge for the session store. The provider launches one store per
//! app instance, mirrors its snapshots into a signal and shares both through
//! context so guards and routes never reach for globals.

use crate::{
    app_lib::{ApiClient, AppConfig},
    components::{Alert, AlertKind},
    features::auth::state::{Session, SessionStore, Subscription},
};
use leptos::prelude::*;
use std::sync::Arc;

/// Auth session context shared through Leptos.
#[derive(Clone)]
pub struct AuthContext {
    pub store: SessionStore,
    pub session: RwSignal<Session>,
    pub is_loading: Signal<bool>,
    pub is_authenticated: Signal<bool>,
    _subscription: Arc<Subscription>,
}

impl AuthContext {
    /// Mirrors `store` into a signal that updates on every store change.
    fn new(store: SessionStore) -> Self {
        let session = RwSignal::new(Session::checking());
        let subscription = store.subscribe(move |snapshot| session.set(snapshot.clone()));
        session.set(store.session());

        Self {
            store,
            session,
            is_loading: Signal::derive(move || session.with(Session::is_loading)),
            is_authenticated: Signal::derive(move || session.with(Session::is_authenticated)),
            _subscription: Arc::new(subscription),
        }
    }
}

/// Provides auth context and starts the bootstrap check once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    match ApiClient::new(&AppConfig::load()) {
        Ok(client) => {
            provide_context(AuthContext::new(SessionStore::launch(client)));
            children().into_any()
        }
        Err(err) => {
            tracing::error!("unable to start session store: {err}");
            view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any()
        }
    }
}

/// Returns the auth context; must be called below `AuthProvider`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
