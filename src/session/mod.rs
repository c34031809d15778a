//! Signed-in user state, passed explicitly to every page that needs it.

mod access;
mod listeners;
mod storage;
mod sync;

pub use crate::session::access::{
    authorize, landing_path, Access, AdminArea, ADMIN_PATH, HOME_PATH, LOGIN_PATH,
};
pub use crate::session::listeners::SubscriptionId;
pub use crate::session::storage::{
    KeyValueStore, MemoryStore, StoreError, StoredSession, SESSION_KEY,
};
pub use crate::session::sync::{SessionConfigError, SessionSync, SessionWatcher};

use crate::forms::Role;
use crate::session::listeners::Listeners;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// The user record the backend returns on login or registration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: u64,
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    pub rol: Role,
}

impl CurrentUser {
    /// Parses a stored record. Anything unreadable counts as no session.
    pub fn from_stored(raw: &str) -> Option<CurrentUser> {
        serde_json::from_str(raw).ok()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.nombres, self.apellidos)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(CurrentUser),
    SignedOut,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn(_) => "signed_in",
            SessionEvent::SignedOut => "signed_out",
        }
    }
}

pub type SessionListener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

pub trait SessionProvider: Send + Sync {
    fn get(&self) -> Option<CurrentUser>;

    fn set(&self, user: CurrentUser);

    fn clear(&self);

    /// Registers a listener called after every `set` and `clear`, in the
    /// order the changes were applied.
    fn subscribe(&self, listener: SessionListener) -> SubscriptionId;

    /// Returns false when the subscription was already removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Session kept in process memory.
#[derive(Default)]
pub struct InMemorySession {
    user: Mutex<Option<CurrentUser>>,
    listeners: Listeners,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: CurrentUser) -> Self {
        InMemorySession {
            user: Mutex::new(Some(user)),
            listeners: Listeners::default(),
        }
    }

    fn replace(&self, user: Option<CurrentUser>) {
        let event = match &user {
            Some(user) => SessionEvent::SignedIn(user.clone()),
            None => SessionEvent::SignedOut,
        };
        self.listeners.publish(event, || {
            match self.user.lock() {
                Ok(mut guard) => *guard = user,
                Err(poisoned) => *poisoned.into_inner() = user,
            }
            true
        });
    }
}

impl SessionProvider for InMemorySession {
    fn get(&self) -> Option<CurrentUser> {
        match self.user.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, user: CurrentUser) {
        self.replace(Some(user));
    }

    fn clear(&self) {
        self.replace(None);
    }

    fn subscribe(&self, listener: SessionListener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}
