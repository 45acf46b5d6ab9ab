//! `localStorage`-backed flag store implementation.
//!
//! The browser API is synchronous; the [`platform_host::FlagStore`] impl wraps it in ready
//! futures so callers can treat every store the same way.

use platform_host::{FlagStore, FlagStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser flag store backed by `window.localStorage`.
pub struct WebFlagStore;

impl WebFlagStore {
    /// Reads the raw string stored under `key`.
    pub fn get_raw(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Writes a raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (quota, privacy mode).
    pub fn set_raw(self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(key, value)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    /// Removes `key` from localStorage.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn remove_raw(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl FlagStore for WebFlagStore {
    fn get_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.get_raw(key)) })
    }

    fn set_flag<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> FlagStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.set_raw(key, value) })
    }

    fn remove_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove_raw(key) })
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
