//! Typed host contracts shared by the archive core and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the key/value flag
//! store contract used to mirror session state, plus clock/date helpers. Concrete browser
//! adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::flags::{
    load_flag_typed_with, FlagStore, FlagStoreFuture, MemoryFlagStore, NoopFlagStore,
};
pub use crate::time::{
    date_from_unix_ms, format_date_dotted, format_date_slashed, local_today, unix_time_ms_now,
};
