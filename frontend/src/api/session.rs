//! In-memory session store shared by every clone of [`super::ApiClient`].
//!
//! Tokens are never written to browser storage, so a reload starts logged
//! out. Observers are told about every change so the reactive auth state can
//! follow forced logouts triggered by the refresh pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use super::types::{AuthResponse, AuthUser};
use crate::utils::jwt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<AuthUser>,
}

impl Session {
    pub fn from_tokens(access_token: String, refresh_token: String) -> Self {
        let user = jwt::extract_user(&access_token);
        Self {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

type Observer = Rc<dyn Fn(&Session)>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Inner {
    session: Session,
    observers: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Rc<RefCell<Inner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Session {
        self.inner.borrow().session.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.borrow().session.access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.borrow().session.refresh_token.clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.inner.borrow().session.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().session.is_authenticated()
    }

    pub fn store(&self, response: AuthResponse) {
        let session = Session::from_tokens(response.access_token, response.refresh_token);
        if session.user.is_none() {
            log::warn!("Access token payload could not be decoded; user identity unavailable");
        }
        self.replace(session);
    }

    pub fn clear(&self) {
        self.replace(Session::default());
    }

    /// Registers a callback invoked after every change.
    pub fn subscribe(&self, observer: impl Fn(&Session) + 'static) -> ObserverId {
        let mut inner = self.inner.borrow_mut();
        let id = ObserverId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Rc::new(observer)));
        id
    }

    /// Removes the observer. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: ObserverId) {
        self.inner
            .borrow_mut()
            .observers
            .retain(|(observer_id, _)| *observer_id != id);
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    fn replace(&self, session: Session) {
        let observers = {
            let mut inner = self.inner.borrow_mut();
            inner.session = session.clone();
            inner
                .observers
                .iter()
                .map(|(_, observer)| observer.clone())
                .collect::<Vec<_>>()
        };
        // Borrow released before notifying; observers may read the store.
        for observer in observers {
            observer(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserRole;
    use crate::utils::jwt::encode_test_token;
    use std::cell::Cell;

    fn tokens(role: &str) -> AuthResponse {
        AuthResponse {
            access_token: encode_test_token("u-1", "ada@example.com", role),
            refresh_token: "refresh-1".into(),
        }
    }

    #[test]
    fn store_derives_user_and_clear_resets_everything() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());

        store.store(tokens("CREATOR"));
        assert!(store.is_authenticated());
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert_eq!(store.user().map(|u| u.role), Some(UserRole::Creator));

        store.clear();
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn undecodable_token_still_authenticates() {
        let store = SessionStore::new();
        store.store(AuthResponse {
            access_token: "opaque".into(),
            refresh_token: "r".into(),
        });
        assert!(store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn observers_see_every_change_and_can_read_the_store() {
        let store = SessionStore::new();
        let seen = Rc::new(Cell::new(0));
        let reader = store.clone();
        let counter = seen.clone();
        let id = store.subscribe(move |session| {
            assert_eq!(reader.is_authenticated(), session.is_authenticated());
            counter.set(counter.get() + 1);
        });

        store.store(tokens("VIEWER"));
        store.clear();
        assert_eq!(seen.get(), 2);

        store.unsubscribe(id);
        store.store(tokens("VIEWER"));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn unsubscribe_removes_only_that_observer() {
        let store = SessionStore::new();
        let seen = Rc::new(Cell::new(0));
        let first = store.subscribe(|_| {});
        let counter = seen.clone();
        store.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(store.observer_count(), 2);

        store.unsubscribe(first);
        store.unsubscribe(first);
        assert_eq!(store.observer_count(), 1);

        store.clear();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.store(tokens("ADMIN"));
        assert!(other.is_authenticated());
    }
}
