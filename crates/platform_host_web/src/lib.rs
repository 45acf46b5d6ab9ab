//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Native builds compile the same adapters with inert fallbacks so the archive core and its
//! tests run off-browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::{
    flag_store, host_strategy_name, selected_host_strategy, FlagStoreAdapter, HostStrategy,
};
pub use storage::local_flags::WebFlagStore;
