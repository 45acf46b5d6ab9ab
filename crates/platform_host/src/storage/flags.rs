//! Key/value flag storage contracts and in-process adapters.
//!
//! Flags are plain strings stored per key. Browser builds back them with `localStorage`
//! (see `platform_host_web`); tests and headless builds use [`MemoryFlagStore`].

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::de::DeserializeOwned;

/// Object-safe boxed future used by [`FlagStore`] async methods.
pub type FlagStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for small string flags keyed by name.
pub trait FlagStore {
    /// Reads the raw value stored under `key`.
    fn get_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<Option<String>, String>>;

    /// Stores a raw value under `key`, replacing any previous value.
    fn set_flag<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> FlagStoreFuture<'a, Result<(), String>>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Flag store that never remembers anything.
pub struct NoopFlagStore;

impl FlagStore for NoopFlagStore {
    fn get_flag<'a>(
        &'a self,
        _key: &'a str,
    ) -> FlagStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn set_flag<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a str,
    ) -> FlagStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn remove_flag<'a>(&'a self, _key: &'a str) -> FlagStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory flag store. Clones share the same backing map.
pub struct MemoryFlagStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryFlagStore {
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn set_flag<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> FlagStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a JSON-encoded flag through a [`FlagStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub async fn load_flag_typed_with<S: FlagStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get_flag(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}
