use crate::session::listeners::Listeners;
use crate::session::{CurrentUser, SessionEvent, SessionListener, SessionProvider, SubscriptionId};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Key the signed-in user record is stored under.
pub const SESSION_KEY: &str = "usuario";

#[derive(Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("The session store rejected the write: {0}")]
    Rejected(String),
}

/// String key-value storage shared with other views of the same session
/// (browser storage, a desktop profile file, ...).
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.items.lock() {
            Ok(items) => items.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        match self.items.lock() {
            Ok(mut items) => items.insert(key.to_string(), value),
            Err(poisoned) => poisoned.into_inner().insert(key.to_string(), value),
        };
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        match self.items.lock() {
            Ok(mut items) => items.remove(key),
            Err(poisoned) => poisoned.into_inner().remove(key),
        };
    }
}

/// Session persisted as a JSON record in a [`KeyValueStore`], which is the
/// source of truth: every `get` reads the store.
pub struct StoredSession<S> {
    store: S,
    key: String,
    listeners: Listeners,
}

impl<S: KeyValueStore> StoredSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SESSION_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        StoredSession {
            store,
            key: key.to_string(),
            listeners: Listeners::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> SessionProvider for StoredSession<S> {
    fn get(&self) -> Option<CurrentUser> {
        let raw = self.store.get_item(&self.key)?;
        let user = CurrentUser::from_stored(&raw);
        if user.is_none() {
            debug!(key = %self.key, "ignoring unreadable session record");
        }
        user
    }

    /// A record that cannot be written leaves the session unchanged and is
    /// not announced.
    fn set(&self, user: CurrentUser) {
        let raw = match serde_json::to_string(&user) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "could not serialize session record");
                return;
            }
        };
        self.listeners.publish(SessionEvent::SignedIn(user), || {
            match self.store.set_item(&self.key, raw) {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, key = %self.key, "session record was not stored");
                    false
                }
            }
        });
    }

    fn clear(&self) {
        self.listeners.publish(SessionEvent::SignedOut, || {
            self.store.remove_item(&self.key);
            true
        });
    }

    fn subscribe(&self, listener: SessionListener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::forms::Role;
    use crate::session::test::user;
    use std::sync::Arc;

    #[test]
    fn round_trips_through_the_store() {
        let session = StoredSession::new(MemoryStore::new());
        session.set(user(Role::Admin));

        let raw = session.store().get_item(SESSION_KEY).unwrap();
        assert!(raw.contains(r#""rol":"ADMIN""#));
        assert_eq!(session.get(), Some(user(Role::Admin)));

        session.clear();
        assert_eq!(session.store().get_item(SESSION_KEY), None);
        assert_eq!(session.get(), None);
    }

    #[test]
    fn reads_changes_made_behind_its_back() {
        let session = StoredSession::new(MemoryStore::new());
        session
            .store()
            .set_item(
                SESSION_KEY,
                serde_json::to_string(&user(Role::Cliente)).unwrap(),
            )
            .unwrap();
        assert_eq!(session.get(), Some(user(Role::Cliente)));
    }

    #[test]
    fn corrupt_records_mean_signed_out() {
        let session = StoredSession::with_key(MemoryStore::new(), "user");
        session
            .store()
            .set_item("user", "{oops".to_string())
            .unwrap();
        assert_eq!(session.get(), None);
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Rejected("quota exceeded".to_string()))
        }

        fn remove_item(&self, _key: &str) {}
    }

    #[test]
    fn rejected_writes_are_not_announced() {
        let session = StoredSession::new(FullStore);
        let events = Arc::new(Mutex::new(vec![]));
        let recorded = events.clone();
        session.subscribe(Arc::new(move |event: &SessionEvent| {
            recorded.lock().unwrap().push(event.clone());
        }));

        session.set(user(Role::Admin));
        assert_eq!(session.get(), None);
        assert!(events.lock().unwrap().is_empty());

        session.clear();
        assert_eq!(*events.lock().unwrap(), vec![SessionEvent::SignedOut]);
    }
}
