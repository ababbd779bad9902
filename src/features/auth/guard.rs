//! Route guard state machine. It decides what a protected subtree shows for a
//! given session snapshot and emits a redirect only when the session enters
//! the unauthenticated state, so re-render storms never navigate twice.
//!
//! ```text
//! Checking ──bootstrap ok──▶ Authenticated
//!    │                            │
//!    └──bootstrap fail──▶ Unauthenticated ◀──logout──┘
//! ```
//!
//! `attach` drives the navigation from the store's own mutation path rather
//! than from rendering. This is a UX guard only; the backend enforces access.

use crate::features::auth::state::{AuthPhase, Session, SessionStore, Subscription};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Placeholder shown while the bootstrap check is in flight.
pub const CHECKING_MESSAGE: &str = "Checking authentication...";

/// Performs client-side navigation.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// What the guarded subtree renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    /// Bootstrap still running: placeholder, no children.
    Placeholder,
    /// Not authenticated: nothing, a redirect is on its way.
    Nothing,
    Children,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardDecision {
    pub view: GuardView,
    pub redirect: Option<String>,
}

pub struct RouteGuard {
    login_path: String,
    last_phase: Mutex<Option<AuthPhase>>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH)
    }
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            last_phase: Mutex::new(None),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Pure rendering decision, no side effects.
    pub fn view(session: &Session) -> GuardView {
        match session.phase() {
            AuthPhase::Checking => GuardView::Placeholder,
            AuthPhase::Unauthenticated => GuardView::Nothing,
            AuthPhase::Authenticated => GuardView::Children,
        }
    }

    /// Records the snapshot's phase and returns the view plus a redirect when
    /// this evaluation is the first one to observe `Unauthenticated` since the
    /// guard last saw a different phase.
    pub fn evaluate(&self, session: &Session) -> GuardDecision {
        let phase = session.phase();
        let previous = self
            .last_phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(phase);

        let redirect = (phase == AuthPhase::Unauthenticated
            && previous != Some(AuthPhase::Unauthenticated))
        .then(|| {
            info!(to = %self.login_path, "not authenticated, redirecting");
            self.login_path.clone()
        });

        GuardDecision {
            view: Self::view(session),
            redirect,
        }
    }

    /// Evaluates the store's current state and every later change, calling
    /// `navigator` whenever a redirect is due. The returned handle keeps the
    /// subscription alive.
    pub fn attach(self, store: &SessionStore, navigator: impl Navigator) -> GuardHandle {
        let guard = Arc::new(self);
        let navigator: Arc<dyn Navigator> = Arc::new(navigator);

        let on_change = {
            let guard = Arc::clone(&guard);
            let navigator = Arc::clone(&navigator);
            move |session: &Session| {
                if let Some(path) = guard.evaluate(session).redirect {
                    navigator.navigate(&path);
                }
            }
        };
        let subscription = store.subscribe(on_change);

        if let Some(path) = guard.evaluate(&store.session()).redirect {
            navigator.navigate(&path);
        }

        GuardHandle {
            guard,
            _subscription: subscription,
        }
    }
}

/// Keeps an attached guard subscribed; dropping it detaches the guard.
pub struct GuardHandle {
    guard: Arc<RouteGuard>,
    _subscription: Subscription,
}

impl GuardHandle {
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}
