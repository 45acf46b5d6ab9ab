use platform_host::{FlagStore, FlagStoreFuture, MemoryFlagStore};

use crate::WebFlagStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters.
    Browser,
    /// In-process stand-ins used for headless runs and tests.
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "stub",
    }
}

/// Adapter enum that erases the concrete flag backend behind [`FlagStore`].
#[derive(Debug, Clone)]
pub enum FlagStoreAdapter {
    /// `localStorage`-backed flags.
    Browser(WebFlagStore),
    /// Process-local flags that vanish on reload.
    Stub(MemoryFlagStore),
}

impl FlagStore for FlagStoreAdapter {
    fn get_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.get_flag(key),
            Self::Stub(store) => store.get_flag(key),
        }
    }

    fn set_flag<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> FlagStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.set_flag(key, value),
            Self::Stub(store) => store.set_flag(key, value),
        }
    }

    fn remove_flag<'a>(&'a self, key: &'a str) -> FlagStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.remove_flag(key),
            Self::Stub(store) => store.remove_flag(key),
        }
    }
}

/// Builds the flag-store adapter for the compile-time selected host strategy.
pub fn flag_store() -> FlagStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => FlagStoreAdapter::Browser(WebFlagStore),
        HostStrategy::Stub => FlagStoreAdapter::Stub(MemoryFlagStore::default()),
    }
}
