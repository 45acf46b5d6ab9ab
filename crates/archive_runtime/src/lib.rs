pub mod effect_executor;
pub mod host;
pub mod runtime_context;

pub use host::ArchiveHostContext;
pub use runtime_context::{use_archive_runtime, ArchiveProvider, ArchiveRuntimeContext};
