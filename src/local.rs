use std::cell::RefCell;
use std::collections::HashMap;

/// Fixed browser-storage keys. Values are plain strings or JSON; there is no
/// schema versioning.
pub mod keys {
    pub const CART_ITEMS: &str = "lumio_cart_items";
    pub const CART_COUNT: &str = "lumio_cart_count";
    pub const COOKIE_CONSENT: &str = "lumio_cookie_accepted";
    pub const LOGIN_REDIRECT: &str = "lumio_redirect_after_login";
    pub const SESSION: &str = "lumio_session";
}

/// String key-value storage. The frontend backs this with localStorage;
/// tests use [`MemoryStore`].
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Cookie-banner consent: unset until the visitor picks either option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieConsent {
    Unset,
    Accepted,
    Declined,
}

pub fn cookie_consent(store: &impl KvStore) -> CookieConsent {
    match store.get(keys::COOKIE_CONSENT).as_deref() {
        Some("1") => CookieConsent::Accepted,
        Some("0") => CookieConsent::Declined,
        _ => CookieConsent::Unset,
    }
}

pub fn set_cookie_consent(store: &impl KvStore, accepted: bool) {
    store.set(keys::COOKIE_CONSENT, if accepted { "1" } else { "0" });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn consent_starts_unset_and_remembers_either_answer() {
        let store = MemoryStore::new();
        assert_eq!(cookie_consent(&store), CookieConsent::Unset);
        set_cookie_consent(&store, true);
        assert_eq!(cookie_consent(&store), CookieConsent::Accepted);
        set_cookie_consent(&store, false);
        assert_eq!(cookie_consent(&store), CookieConsent::Declined);
    }

    #[test]
    fn garbage_consent_values_read_as_unset() {
        let store = MemoryStore::new();
        store.set(keys::COOKIE_CONSENT, "yes");
        assert_eq!(cookie_consent(&store), CookieConsent::Unset);
    }
}
