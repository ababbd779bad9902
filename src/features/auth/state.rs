//! Auth session state for the frontend. The store hydrates the session once on
//! creation using a cookie-based API call and exposes the result to guards and
//! routes, either as snapshots, an async `watch` receiver, or synchronous
//! subscriber callbacks. Only non-sensitive metadata is kept in memory; the
//! session cookie itself stays `HttpOnly` and is owned by the backend.
//!
//! Every bootstrap/logout takes a ticket from a monotonic counter. A finished
//! operation is applied only if no operation with a newer ticket has already
//! been applied, so a slow response can never overwrite a fresher one.

use crate::{
    app_lib::{ApiClient, tasks},
    features::auth::{client, types::UserSummary},
};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, Weak,
    atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Consecutive failed logout calls after which local state is dropped anyway.
pub const MAX_LOGOUT_FAILURES: u32 = 3;

/// Coarse state derived from a session snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthPhase {
    Checking,
    Unauthenticated,
    Authenticated,
}

/// Snapshot of what the client believes about the current session.
/// `is_authenticated` is derived from `user`, so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user: Option<UserSummary>,
    loading: bool,
}

impl Session {
    /// State at application start, before the bootstrap check resolves.
    pub fn checking() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// State after the bootstrap check resolved.
    pub fn resolved(user: Option<UserSummary>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Checking
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        }
    }
}

/// Result of `SessionStore::logout`. Failures are logged, never returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The backend dropped the session (or had none) and local state was cleared.
    Confirmed,
    /// The backend kept failing; local state was cleared without confirmation.
    ForcedLocal,
    /// The backend call failed; local state is unchanged.
    Retained { failures: u32 },
    /// A newer operation finished first and decided the state.
    Superseded,
}

type Subscriber = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    client: ApiClient,
    state: watch::Sender<Session>,
    bootstrapped: AtomicBool,
    tickets: AtomicU64,
    applied: Mutex<u64>,
    logout_failures: AtomicU32,
    subscribers: Mutex<Vec<(u64, Subscriber)>>,
    next_subscriber: AtomicU64,
}

/// Process-wide session cache. Cloning is cheap and every clone shares state;
/// pass it explicitly (or through UI context) to whatever needs it.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates a store in the checking state without contacting the backend.
    /// Most callers want `launch`.
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(Session::checking());
        Self {
            inner: Arc::new(Inner {
                client,
                state,
                bootstrapped: AtomicBool::new(false),
                tickets: AtomicU64::new(0),
                applied: Mutex::new(0),
                logout_failures: AtomicU32::new(0),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a store and starts its bootstrap check in the background.
    pub fn launch(client: ApiClient) -> Self {
        let store = Self::new(client);
        let background = store.clone();
        tasks::spawn(async move {
            background.bootstrap().await;
        });
        store
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Latest snapshot.
    pub fn session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Async receiver that observes every committed change.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Waits until the bootstrap check has resolved.
    pub async fn ready(&self) -> Session {
        let mut receiver = self.watch();
        match receiver.wait_for(|session| !session.is_loading()).await {
            Ok(session) => Session::clone(&session),
            Err(_) => self.session(),
        }
    }

    /// Registers a callback that runs synchronously after every change, with
    /// the new snapshot. Dropping the returned handle unsubscribes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).push((id, Arc::new(callback)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Asks the backend whether the session cookie is valid. Runs the request
    /// at most once per store; later calls return the current phase.
    ///
    /// Any failure, including transport errors and timeouts, ends in the
    /// unauthenticated state. `loading` is cleared exactly once, as the last
    /// step, whatever the outcome.
    pub async fn bootstrap(&self) -> AuthPhase {
        if self.inner.bootstrapped.swap(true, Ordering::SeqCst) {
            debug!("session bootstrap already ran");
            return self.session().phase();
        }

        let ticket = self.next_ticket();
        let user = match client::fetch_session(&self.inner.client).await {
            Ok(Some(user)) => {
                info!(email = %user.email, "user authenticated");
                Some(user)
            }
            Ok(None) => {
                info!("user not authenticated");
                None
            }
            Err(err) => {
                warn!("auth check error: {err}");
                None
            }
        };

        let applied = self.commit(ticket, |session| {
            session.user = user;
            session.loading = false;
        });
        if !applied {
            debug!(ticket, "ignoring stale bootstrap result");
            self.finish_loading();
        }

        self.session().phase()
    }

    /// Asks the backend to drop the session and clears the cached user once it
    /// confirms. A 401 counts as confirmation. Other failures keep the local
    /// state until `MAX_LOGOUT_FAILURES` consecutive attempts have failed, then
    /// the state is cleared locally.
    pub async fn logout(&self) -> LogoutOutcome {
        let ticket = self.next_ticket();

        let forced = match client::logout(&self.inner.client).await {
            Ok(()) => false,
            Err(err) if err.is_unauthorized() => {
                debug!("backend reported no session during logout");
                false
            }
            Err(err) => {
                let failures = self.inner.logout_failures.fetch_add(1, Ordering::SeqCst) + 1;
                if failures < MAX_LOGOUT_FAILURES {
                    warn!(failures, "logout error: {err}");
                    return LogoutOutcome::Retained { failures };
                }
                warn!(failures, "logout error: {err}; clearing local session anyway");
                true
            }
        };

        if !self.commit(ticket, |session| session.user = None) {
            debug!(ticket, "ignoring stale logout result");
            return LogoutOutcome::Superseded;
        }

        self.inner.logout_failures.store(0, Ordering::SeqCst);
        info!("logged out");
        if forced {
            LogoutOutcome::ForcedLocal
        } else {
            LogoutOutcome::Confirmed
        }
    }

    fn next_ticket(&self) -> u64 {
        self.inner.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Applies `mutate` unless a newer ticket has already been applied, then
    /// notifies subscribers. Returns whether the mutation happened.
    fn commit(&self, ticket: u64, mutate: impl FnOnce(&mut Session)) -> bool {
        {
            let mut applied = lock(&self.inner.applied);
            if ticket <= *applied {
                return false;
            }
            *applied = ticket;
            self.inner.state.send_modify(mutate);
        }
        self.notify();
        true
    }

    fn finish_loading(&self) {
        let changed = {
            let _applied = lock(&self.inner.applied);
            self.inner.state.send_if_modified(|session| {
                let was_loading = session.loading;
                session.loading = false;
                was_loading
            })
        };
        if changed {
            self.notify();
        }
    }

    /// Subscribers run outside every lock so they may call back into the store.
    fn notify(&self) {
        let snapshot = self.session();
        let subscribers: Vec<Subscriber> = lock(&self.inner.subscribers)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

/// Handle returned by `SessionStore::subscribe`.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner.subscribers).retain(|(id, _)| *id != self.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::app_lib::AppConfig;
    use serde_json::json;
    use std::net::TcpListener;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn store_for(server: &MockServer) -> SessionStore {
        let config = AppConfig::with_base_url(format!("{}/api", server.uri()))
            .with_timeout(Duration::from_millis(300));
        SessionStore::new(ApiClient::new(&config).unwrap())
    }

    fn profile_body() -> serde_json::Value {
        json!({
            "user": {
                "id": 1,
                "name": "A",
                "email": "a@x.com",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }
        })
    }

    async fn mount_profile(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/user/profile"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    async fn mount_logout(server: &MockServer, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }

    #[test]
    fn fresh_session_is_checking() {
        let session = Session::checking();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
        assert_eq!(session.phase(), AuthPhase::Checking);
    }

    #[tokio::test]
    async fn bootstrap_success_authenticates() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;

        let store = store_for(&server);
        assert_eq!(store.bootstrap().await, AuthPhase::Authenticated);

        let session = store.session();
        assert!(!session.is_loading());
        assert!(session.is_authenticated());
        let user = session.user().unwrap();
        assert_eq!(user.name, "A");
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn bootstrap_failures_all_end_unauthenticated() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let templates = [
            ResponseTemplate::new(401),
            ResponseTemplate::new(403),
            ResponseTemplate::new(500).set_body_string("boom"),
            ResponseTemplate::new(200).set_body_string("not json"),
            ResponseTemplate::new(200)
                .set_body_json(profile_body())
                .set_delay(Duration::from_secs(2)),
        ];

        for template in templates {
            let server = MockServer::start().await;
            mount_profile(&server, template).await;

            let store = store_for(&server);
            assert_eq!(store.bootstrap().await, AuthPhase::Unauthenticated);
            assert_eq!(store.session(), Session { user: None, loading: false });
        }
    }

    #[tokio::test]
    async fn bootstrap_requests_only_once() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server);
        assert_eq!(store.bootstrap().await, AuthPhase::Authenticated);
        assert_eq!(store.bootstrap().await, AuthPhase::Authenticated);
        server.verify().await;
    }

    #[tokio::test]
    async fn loading_clears_exactly_once_and_invariant_holds() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;
        mount_logout(&server, 200).await;

        let store = store_for(&server);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |session| {
            assert_eq!(session.is_authenticated(), session.user().is_some());
            sink.lock().unwrap().push(session.clone());
        });

        store.bootstrap().await;
        assert_eq!(store.logout().await, LogoutOutcome::Confirmed);

        let seen = seen.lock().unwrap();
        let phases: Vec<AuthPhase> = seen.iter().map(Session::phase).collect();
        assert_eq!(
            phases,
            vec![AuthPhase::Authenticated, AuthPhase::Unauthenticated]
        );
        assert!(seen.iter().all(|session| !session.is_loading()));
    }

    #[tokio::test]
    async fn logout_keeps_state_until_repeated_failures() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;
        mount_logout(&server, 500).await;

        let store = store_for(&server);
        store.bootstrap().await;

        assert_eq!(
            store.logout().await,
            LogoutOutcome::Retained { failures: 1 }
        );
        assert!(store.session().is_authenticated());
        assert_eq!(
            store.logout().await,
            LogoutOutcome::Retained { failures: 2 }
        );
        assert!(store.session().is_authenticated());
        assert_eq!(store.logout().await, LogoutOutcome::ForcedLocal);
        assert_eq!(store.session().phase(), AuthPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn logout_transport_failure_is_retained() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.bootstrap().await;

        assert_eq!(
            store.logout().await,
            LogoutOutcome::Retained { failures: 1 }
        );
        let session = store.session();
        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|user| user.email.as_str()), Some("a@x.com"));
    }

    #[tokio::test]
    async fn superseded_logout_keeps_failure_count() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(150)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mount_logout(&server, 500).await;

        let store = store_for(&server);
        assert_eq!(
            store.logout().await,
            LogoutOutcome::Retained { failures: 1 }
        );

        // The bootstrap takes a newer ticket and lands first.
        let (outcome, phase) = tokio::join!(store.logout(), store.bootstrap());
        assert_eq!(outcome, LogoutOutcome::Superseded);
        assert_eq!(phase, AuthPhase::Authenticated);

        assert_eq!(
            store.logout().await,
            LogoutOutcome::Retained { failures: 2 }
        );
        assert!(store.session().is_authenticated());
    }

    #[tokio::test]
    async fn logout_treats_401_as_confirmation() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;
        mount_logout(&server, 401).await;

        let store = store_for(&server);
        store.bootstrap().await;
        assert_eq!(store.logout().await, LogoutOutcome::Confirmed);
        assert!(!store.session().is_authenticated());
    }

    #[tokio::test]
    async fn logout_finishing_first_wins_over_slow_bootstrap() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(profile_body())
                .set_delay(Duration::from_millis(150)),
        )
        .await;
        mount_logout(&server, 200).await;

        let store = store_for(&server);
        let (phase, outcome) = tokio::join!(store.bootstrap(), store.logout());

        assert_eq!(outcome, LogoutOutcome::Confirmed);
        assert_eq!(phase, AuthPhase::Unauthenticated);
        assert_eq!(store.session(), Session { user: None, loading: false });
    }

    #[tokio::test]
    async fn launch_bootstraps_in_background() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(401)).await;

        let config = AppConfig::with_base_url(format!("{}/api", server.uri()));
        let store = SessionStore::launch(ApiClient::new(&config).unwrap());

        let session = store.ready().await;
        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn dropped_subscription_stops_notifications() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_profile(&server, ResponseTemplate::new(200).set_body_json(profile_body())).await;
        mount_logout(&server, 200).await;

        let store = store_for(&server);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let subscription = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.bootstrap().await;
        drop(subscription);
        store.logout().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
