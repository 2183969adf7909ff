use crate::local::{keys, KvStore};
use crate::models::User;

/// Auth state as the UI sees it. `Loading` only exists between mount and the
/// first session fetch resolving; a failed fetch is treated the same as
/// "no session".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated(User),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Fold an auth transition into a fresh snapshot. Views re-render off the
    /// returned value; nothing mutates in place.
    pub fn apply(&self, change: AuthChange) -> SessionState {
        match change {
            AuthChange::SignedIn(user) => SessionState::Authenticated(user),
            AuthChange::SignedOut => SessionState::Unauthenticated,
        }
    }
}

/// Auth-state transitions delivered to the session provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthChange {
    SignedIn(User),
    SignedOut,
}

/// Record the path an unauthenticated visitor asked for, so login can send
/// them back there instead of to the app root.
pub fn remember_requested_path(store: &impl KvStore, path: &str) {
    store.set(keys::LOGIN_REDIRECT, path);
}

/// One-shot read of the remembered path: consumed and cleared, so a later
/// login does not replay an old redirect.
pub fn take_requested_path(store: &impl KvStore) -> Option<String> {
    let path = store.get(keys::LOGIN_REDIRECT)?;
    store.remove(keys::LOGIN_REDIRECT);
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemoryStore;

    fn user(id: &str) -> User {
        User { id: id.to_string(), email: Some(format!("{id}@example.com")) }
    }

    #[test]
    fn sign_in_and_out_transitions() {
        let state = SessionState::Loading;
        let state = state.apply(AuthChange::SignedIn(user("u1")));
        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().id, "u1");

        let state = state.apply(AuthChange::SignedOut);
        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[test]
    fn loading_is_neither_authenticated_nor_settled() {
        let state = SessionState::Loading;
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn requested_path_is_consumed_once() {
        let store = MemoryStore::new();
        remember_requested_path(&store, "/app");
        assert_eq!(take_requested_path(&store).as_deref(), Some("/app"));
        assert_eq!(take_requested_path(&store), None);
    }

    #[test]
    fn a_new_request_overwrites_the_old_target() {
        let store = MemoryStore::new();
        remember_requested_path(&store, "/app");
        remember_requested_path(&store, "/cart");
        assert_eq!(take_requested_path(&store).as_deref(), Some("/cart"));
    }
}
