use crate::session::{SessionEvent, SessionListener};
use crate::stats::record_session_change;
use slotmap::{new_key_type, SlotMap};
use std::sync::Mutex;
use tracing::debug;

new_key_type! { pub struct SubscriptionId; }

#[derive(Default)]
pub(crate) struct Listeners {
    listeners: Mutex<SlotMap<SubscriptionId, SessionListener>>,
    // held while a change is applied and announced
    publishing: Mutex<()>,
}

impl Listeners {
    pub fn add(&self, listener: SessionListener) -> SubscriptionId {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.insert(listener),
            Err(poisoned) => poisoned.into_inner().insert(listener),
        }
    }

    pub fn remove(&self, id: SubscriptionId) -> bool {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.remove(id).is_some(),
            Err(poisoned) => poisoned.into_inner().remove(id).is_some(),
        }
    }

    /// Applies a session change and notifies listeners before the next
    /// change can start, so listeners observe changes in the order they were
    /// applied. Listeners may read the session and (un)subscribe, but must not
    /// call `set` or `clear` on the same session.
    ///
    /// Nobody is notified when `apply` returns false.
    pub fn publish(&self, event: SessionEvent, apply: impl FnOnce() -> bool) -> bool {
        let _guard = match self.publishing.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !apply() {
            return false;
        }
        self.notify(&event);
        true
    }

    /// Calls every listener. The lock is released first so listeners can
    /// read the session or (un)subscribe.
    fn notify(&self, event: &SessionEvent) {
        let listeners: Vec<SessionListener> = match self.listeners.lock() {
            Ok(listeners) => listeners.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        };
        debug!(
            event = event.name(),
            listeners = listeners.len(),
            "session changed"
        );
        record_session_change(event.name());
        for listener in listeners {
            listener(event);
        }
    }
}
