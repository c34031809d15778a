use crate::session::{CurrentUser, SessionEvent, SessionProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// How a view learns that the session changed elsewhere.
///
/// Deserializing rejects a zero poll interval.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "type", try_from = "SessionSyncConfig")]
pub enum SessionSync {
    /// Rely on [`SessionProvider::subscribe`].
    #[default]
    Subscribe,
    /// Re-read the provider every `interval_ms` through [`SessionWatcher::poll`].
    Poll { interval_ms: u64 },
}

/// Unchecked wire form of [`SessionSync`].
#[derive(Deserialize)]
#[serde(tag = "type")]
enum SessionSyncConfig {
    Subscribe,
    Poll { interval_ms: u64 },
}

impl TryFrom<SessionSyncConfig> for SessionSync {
    type Error = SessionConfigError;

    fn try_from(config: SessionSyncConfig) -> Result<Self, Self::Error> {
        match config {
            SessionSyncConfig::Subscribe => Ok(SessionSync::Subscribe),
            SessionSyncConfig::Poll { interval_ms } => SessionSync::poll(interval_ms),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SessionConfigError {
    #[error("The session poll interval must be greater than zero")]
    ZeroPollInterval,
}

impl SessionSync {
    pub fn poll_every_second() -> Self {
        SessionSync::Poll {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    pub fn poll(interval_ms: u64) -> Result<Self, SessionConfigError> {
        let sync = SessionSync::Poll { interval_ms };
        sync.validate()?;
        Ok(sync)
    }

    pub fn validate(&self) -> Result<(), SessionConfigError> {
        match self {
            SessionSync::Poll { interval_ms: 0 } => Err(SessionConfigError::ZeroPollInterval),
            SessionSync::Poll { .. } | SessionSync::Subscribe => Ok(()),
        }
    }

    /// How often the caller should invoke [`SessionWatcher::poll`], if at all.
    /// A hand-built zero interval falls back to the default.
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            SessionSync::Subscribe => None,
            SessionSync::Poll { interval_ms: 0 } => {
                Some(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
            }
            SessionSync::Poll { interval_ms } => Some(Duration::from_millis(*interval_ms)),
        }
    }
}

/// Remembers the last observed user so that polling only reports changes.
/// The caller owns the timer.
pub struct SessionWatcher {
    provider: Arc<dyn SessionProvider>,
    last_seen: Option<CurrentUser>,
}

impl SessionWatcher {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        let last_seen = provider.get();
        SessionWatcher {
            provider,
            last_seen,
        }
    }

    pub fn current(&self) -> Option<&CurrentUser> {
        self.last_seen.as_ref()
    }

    pub fn poll(&mut self) -> Option<SessionEvent> {
        let now = self.provider.get();
        if now == self.last_seen {
            return None;
        }
        let event = match &now {
            Some(user) => SessionEvent::SignedIn(user.clone()),
            None => SessionEvent::SignedOut,
        };
        self.last_seen = now;
        Some(event)
    }
}
