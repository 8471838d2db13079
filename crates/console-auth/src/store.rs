//! Session Store
//!
//! Holds the one current `SessionStatus` and broadcasts every change.
//! New subscribers get the current status replayed immediately.
//!
//! After each applied transition the store runs the reconciliation step
//! against the persisted token. A transition requested from inside a
//! dispatch (by a subscriber or by reconciliation) is queued and applied in
//! order by the dispatching call. A transition requested from another
//! thread waits for the running dispatch to finish and is applied before
//! `transition` returns.

use parking_lot::{Condvar, Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use console_storage::{CookieJar, StorageError};

use crate::navigator::Navigator;
use crate::reconcile::reconcile;
use crate::settings::SessionSettings;
use crate::status::SessionStatus;

type Handler = Arc<dyn Fn(SessionStatus) + Send + Sync>;
type Subscribers = Mutex<Vec<(u64, Handler)>>;

#[derive(Default)]
struct Dispatch {
    queue: VecDeque<SessionStatus>,
    /// Thread currently running a dispatch
    owner: Option<ThreadId>,
}

/// Releases the dispatch if a subscriber panics mid-dispatch
struct DispatchGuard<'a> {
    dispatch: &'a Mutex<Dispatch>,
    idle: &'a Condvar,
    armed: bool,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut dispatch = self.dispatch.lock();
            dispatch.queue.clear();
            dispatch.owner = None;
            drop(dispatch);
            self.idle.notify_all();
        }
    }
}

pub struct SessionStore {
    status: Arc<RwLock<SessionStatus>>,
    subscribers: Arc<Subscribers>,
    next_subscriber_id: Arc<AtomicU64>,
    dispatch: Arc<Mutex<Dispatch>>,
    idle: Arc<Condvar>,
    cookies: CookieJar,
    navigator: Arc<dyn Navigator>,
    settings: Arc<SessionSettings>,
}

/// Handle returned by [`SessionStore::subscribe`]
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to stop receiving transitions.
pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

impl SessionStore {
    /// Create the store and verify the persisted session right away
    ///
    /// Without a persisted token the store starts out in LOGOUT.
    pub fn new(
        cookies: CookieJar,
        navigator: Arc<dyn Navigator>,
        settings: SessionSettings,
    ) -> Self {
        let store = Self {
            status: Arc::new(RwLock::new(SessionStatus::Login)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber_id: Arc::new(AtomicU64::new(1)),
            dispatch: Arc::new(Mutex::new(Dispatch::default())),
            idle: Arc::new(Condvar::new()),
            cookies,
            navigator,
            settings: Arc::new(settings),
        };
        store.verify();
        store
    }

    pub fn current(&self) -> SessionStatus {
        *self.status.read()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_logged_in()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Register a handler; it is called with the current status right away
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(SessionStatus) + Send + Sync + 'static,
    {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let handler: Handler = Arc::new(handler);

        self.subscribers.lock().push((id, Arc::clone(&handler)));
        handler(self.current());

        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Move to `status`; a transition to the current status is a no-op
    pub fn transition(&self, status: SessionStatus) {
        let me = thread::current().id();
        {
            let mut dispatch = self.dispatch.lock();
            if dispatch.owner == Some(me) {
                dispatch.queue.push_back(status);
                return;
            }
            while dispatch.owner.is_some() {
                self.idle.wait(&mut dispatch);
            }
            dispatch.owner = Some(me);
            dispatch.queue.push_back(status);
        }

        let mut guard = DispatchGuard {
            dispatch: &self.dispatch,
            idle: &self.idle,
            armed: true,
        };

        loop {
            let next = {
                let mut dispatch = self.dispatch.lock();
                match dispatch.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        dispatch.owner = None;
                        guard.armed = false;
                        drop(dispatch);
                        self.idle.notify_all();
                        return;
                    }
                }
            };

            if let Some(follow_up) = self.apply(next) {
                // Reconciliation follow-ups run before anything queued later
                self.dispatch.lock().queue.push_front(follow_up);
            }
        }
    }

    pub fn logout(&self) {
        self.transition(SessionStatus::Logout);
    }

    /// Drop the persisted token and log out, even if already logged out
    pub fn force_logout(&self) {
        self.clear_token();
        self.transition(SessionStatus::Logout);
    }

    /// Check the in-memory status against the persisted token
    ///
    /// No token means LOGOUT. With a token, the status just entered is
    /// reconciled as if it had been transitioned into.
    pub fn verify(&self) {
        if !self.has_token() {
            self.transition(SessionStatus::Logout);
            return;
        }

        if let Some(next) = self.reconcile_current(self.current()) {
            self.transition(next);
        }
    }

    /// The persisted session token, if any
    pub fn token(&self) -> Option<String> {
        match self.cookies.get(&self.settings.session_key) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub(crate) fn persist_token(&self, token: &str) -> Result<(), StorageError> {
        self.cookies.set(
            &self.settings.session_key,
            token,
            self.settings.expire_in_days,
        )
    }

    fn clear_token(&self) {
        if let Err(e) = self.cookies.remove(&self.settings.session_key) {
            tracing::error!(error = %e, "Failed to remove session token");
        }
    }

    fn apply(&self, status: SessionStatus) -> Option<SessionStatus> {
        let previous = {
            let mut current = self.status.write();
            if *current == status {
                return None;
            }
            std::mem::replace(&mut *current, status)
        };

        tracing::info!(from = %previous, to = %status, "Session status transition");

        let handlers: Vec<Handler> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(status);
        }

        self.reconcile_current(status)
    }

    fn reconcile_current(&self, status: SessionStatus) -> Option<SessionStatus> {
        let step = reconcile(status, self.has_token());

        if step.clear_token {
            self.clear_token();
        }
        if let Some(destination) = step.navigate {
            self.navigator
                .navigate(self.settings.route_for(destination));
        }

        step.next
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            status: Arc::clone(&self.status),
            subscribers: Arc::clone(&self.subscribers),
            next_subscriber_id: Arc::clone(&self.next_subscriber_id),
            dispatch: Arc::clone(&self.dispatch),
            idle: Arc::clone(&self.idle),
            cookies: self.cookies.clone(),
            navigator: Arc::clone(&self.navigator),
            settings: Arc::clone(&self.settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::RouteRecorder;
    use console_storage::Database;

    fn fixture(token: Option<&str>) -> (SessionStore, CookieJar, RouteRecorder) {
        let cookies = CookieJar::new(Database::open_in_memory().unwrap());
        if let Some(token) = token {
            cookies.set("u_session_id", token, 14).unwrap();
        }
        let router = RouteRecorder::default();
        let store = SessionStore::new(
            cookies.clone(),
            Arc::new(router.clone()),
            SessionSettings::default(),
        );
        (store, cookies, router)
    }

    fn record(store: &SessionStore) -> (Arc<Mutex<Vec<SessionStatus>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |status| sink.lock().push(status));
        (seen, subscription)
    }

    #[test]
    fn test_no_token_at_start_forces_logout() {
        let (store, _, router) = fixture(None);
        assert_eq!(store.current(), SessionStatus::Logout);
        assert_eq!(router.current().as_deref(), Some("/login"));
    }

    #[test]
    fn test_token_at_start_reconciles_to_logged_in() {
        let (store, cookies, router) = fixture(Some("abc123"));
        assert_eq!(store.current(), SessionStatus::LoggedIn);
        assert_eq!(router.current().as_deref(), Some("/admin"));
        assert_eq!(cookies.get("u_session_id").unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_subscribe_replays_current_then_follows() {
        let (store, _, _) = fixture(None);
        let (seen, _subscription) = record(&store);
        assert_eq!(*seen.lock(), vec![SessionStatus::Logout]);

        store.transition(SessionStatus::LoginAttempt);
        store.transition(SessionStatus::InvalidCredentials);
        assert_eq!(
            *seen.lock(),
            vec![
                SessionStatus::Logout,
                SessionStatus::LoginAttempt,
                SessionStatus::InvalidCredentials
            ]
        );
    }

    #[test]
    fn test_current_equals_last_applied_transition() {
        let (store, _, _) = fixture(None);
        let sequence = [
            SessionStatus::LoginAttempt,
            SessionStatus::InvalidCredentials,
            SessionStatus::LoginAttempt,
            SessionStatus::Logout,
            SessionStatus::Login,
        ];
        for status in sequence {
            store.transition(status);
            assert_eq!(store.current(), status);
        }
    }

    #[test]
    fn test_same_status_twice_notifies_once() {
        let (store, _, _) = fixture(None);
        let (seen, _subscription) = record(&store);

        store.transition(SessionStatus::LoginAttempt);
        store.transition(SessionStatus::LoginAttempt);

        assert_eq!(
            *seen.lock(),
            vec![SessionStatus::Logout, SessionStatus::LoginAttempt]
        );
    }

    #[test]
    fn test_subscribers_notified_in_registration_order() {
        let (store, _, _) = fixture(None);
        let order = Arc::new(Mutex::new(Vec::new()));

        let _subscriptions: Vec<_> = (0..3)
            .map(|n| {
                let order = Arc::clone(&order);
                store.subscribe(move |status| order.lock().push((n, status)))
            })
            .collect();
        order.lock().clear();

        store.transition(SessionStatus::LoginAttempt);
        assert_eq!(
            *order.lock(),
            vec![
                (0, SessionStatus::LoginAttempt),
                (1, SessionStatus::LoginAttempt),
                (2, SessionStatus::LoginAttempt)
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (store, _, _) = fixture(None);
        let (seen, subscription) = record(&store);
        assert_eq!(store.subscriber_count(), 1);

        subscription.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);

        store.transition(SessionStatus::LoginAttempt);
        assert_eq!(*seen.lock(), vec![SessionStatus::Logout]);
    }

    #[test]
    fn test_logged_in_without_token_falls_back_to_login() {
        let (store, _, _) = fixture(None);
        let (seen, _subscription) = record(&store);

        store.transition(SessionStatus::LoggedIn);

        assert_eq!(store.current(), SessionStatus::Login);
        assert_eq!(
            *seen.lock(),
            vec![
                SessionStatus::Logout,
                SessionStatus::LoggedIn,
                SessionStatus::Login
            ]
        );
    }

    #[test]
    fn test_login_with_token_promotes_to_logged_in() {
        let (store, cookies, router) = fixture(None);
        cookies.set("u_session_id", "abc123", 14).unwrap();

        store.transition(SessionStatus::Login);

        assert_eq!(store.current(), SessionStatus::LoggedIn);
        assert_eq!(router.current().as_deref(), Some("/admin"));
    }

    #[test]
    fn test_logout_clears_token_and_redirects() {
        let (store, cookies, router) = fixture(Some("abc123"));

        store.logout();

        assert_eq!(store.current(), SessionStatus::Logout);
        assert_eq!(cookies.get("u_session_id").unwrap(), None);
        assert_eq!(router.current().as_deref(), Some("/login"));
    }

    #[test]
    fn test_force_logout_clears_token_when_already_logged_out() {
        let (store, cookies, _) = fixture(None);
        cookies.set("u_session_id", "late", 14).unwrap();

        store.force_logout();

        assert_eq!(store.current(), SessionStatus::Logout);
        assert_eq!(cookies.get("u_session_id").unwrap(), None);
    }

    #[test]
    fn test_transition_from_subscriber_is_queued_in_order() {
        let (store, _, _) = fixture(None);
        let (seen, _first) = record(&store);

        let inner = store.clone();
        let _bouncer = store.subscribe(move |status| {
            if status == SessionStatus::InvalidCredentials {
                inner.transition(SessionStatus::LoginAttempt);
            }
        });
        let (late, _last) = record(&store);

        store.transition(SessionStatus::InvalidCredentials);

        let expected = vec![
            SessionStatus::Logout,
            SessionStatus::InvalidCredentials,
            SessionStatus::LoginAttempt,
        ];
        assert_eq!(*seen.lock(), expected);
        // The last subscriber still sees INVALID_CREDENTIALS before the
        // transition requested while it was being dispatched
        assert_eq!(*late.lock(), expected);
        assert_eq!(store.current(), SessionStatus::LoginAttempt);
    }

    #[test]
    fn test_verify_after_token_loss_demotes_session() {
        let (store, cookies, _) = fixture(Some("abc123"));
        cookies.remove("u_session_id").unwrap();

        store.verify();

        assert_eq!(store.current(), SessionStatus::Logout);
    }

    #[test]
    fn test_transition_from_other_thread_waits_for_running_dispatch() {
        use std::sync::Barrier;
        use std::time::Duration;

        let (store, _, _) = fixture(None);
        let (seen, _subscription) = record(&store);
        let started = Arc::new(Barrier::new(2));

        let gate = Arc::clone(&started);
        let _slow = store.subscribe(move |status| {
            if status == SessionStatus::LoginAttempt {
                gate.wait();
                std::thread::sleep(Duration::from_millis(200));
            }
        });

        let other = store.clone();
        let worker = std::thread::spawn(move || other.transition(SessionStatus::LoginAttempt));

        started.wait();
        store.transition(SessionStatus::InvalidCredentials);
        assert_eq!(store.current(), SessionStatus::InvalidCredentials);

        worker.join().unwrap();
        assert_eq!(store.current(), SessionStatus::InvalidCredentials);
        assert_eq!(
            *seen.lock(),
            vec![
                SessionStatus::Logout,
                SessionStatus::LoginAttempt,
                SessionStatus::InvalidCredentials
            ]
        );
    }
}
