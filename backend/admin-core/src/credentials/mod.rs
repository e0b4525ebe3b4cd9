//! Credential access for outbound requests.
//!
//! # Features
//! - [`TokenProvider`]: read-only, dispatch-time token lookup injected into
//!   the client at construction
//! - [`SessionTokenStore`]: RwLock-backed store whose write lifecycle
//!   belongs to the embedding application (set at login, clear at logout)
//! - [`StaticTokenProvider`]: fixed token for tests and one-off scripts
//!
//! The client re-reads its provider on every attempt, so a token rotated
//! between retries takes effect on the next dispatch.

use common::RedactedToken;

use std::sync::{PoisonError, RwLock};

use log::{debug, warn};

/// Source of the bearer token attached to outbound requests.
///
/// Implementations must be cheap to call: the client consults this once per
/// dispatch, including retries.
pub trait TokenProvider: Send + Sync {
    /// The token to attach to the next dispatch, if any.
    ///
    /// `None` means dispatch without an `Authorization` header and let the
    /// server decide whether the route requires auth.
    fn current_token(&self) -> Option<RedactedToken>;
}

/// Holds the current session's bearer token for the lifetime of the process.
///
/// The client never writes here; `set` and `clear` are called by the login
/// and logout flows respectively.
#[derive(Default)]
pub struct SessionTokenStore {
    token: RwLock<Option<RedactedToken>>,
}

impl SessionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the session token. Called by login code.
    ///
    /// A poisoned lock is recovered rather than ignored: the slot holds no
    /// invariant beyond its own value, and a login must never silently fail
    /// to take effect.
    pub fn set(&self, token: RedactedToken) {
        let mut slot = self.token.write().unwrap_or_else(|poisoned| {
            warn!("Session token store lock poisoned, recovering");
            poisoned.into_inner()
        });
        debug!("Session token installed ({} chars)", token.len());
        *slot = Some(token);
    }

    /// Drop the session token. Called by logout code.
    pub fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(|poisoned| {
            warn!("Session token store lock poisoned, recovering");
            poisoned.into_inner()
        });
        *slot = None;
        debug!("Session token cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Poison the inner lock by panicking while holding the write guard.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.token.write();
                    panic!("poisoning session token lock");
                })
                .join();
        });
    }
}

impl TokenProvider for SessionTokenStore {
    fn current_token(&self) -> Option<RedactedToken> {
        (*self.token.read().unwrap_or_else(PoisonError::into_inner)).clone()
    }
}

/// A provider that always returns the same token.
pub struct StaticTokenProvider {
    token: RedactedToken,
}

impl StaticTokenProvider {
    pub fn new(token: RedactedToken) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn current_token(&self) -> Option<RedactedToken> {
        Some(self.token.clone())
    }
}
