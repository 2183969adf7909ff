use lumio_core::errors::ClientError;
use lumio_core::local::KvStore;
use web_sys::Storage;

/// `KvStore` over the window's localStorage.
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    pub fn local() -> Result<Self, ClientError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(ClientError::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::error!("localStorage write failed for '{key}': {e:?}");
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}
