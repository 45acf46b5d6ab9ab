pub mod catalog;
pub mod config;
pub mod file_kind;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod routes;
pub mod session;
pub mod size;
pub mod upload;
pub mod validation;
pub mod verification;

pub use catalog::{empty_listing_message, CatalogError, FileCatalog, StorageUsage};
pub use config::{ArchiveConfig, Locale, ARCHIVE_CONFIG_KEY};
pub use file_kind::{extension_of, FileKind};
pub use model::*;
pub use persistence::{
    clear_session_with, load_config_override_with, load_session_with, persist_session_with,
};
pub use reducer::{
    reduce_archive, ArchiveAction, ArchiveEffect, ArchiveError, ArchiveState, PendingRequest,
};
pub use routes::{guard, landing_action, LandingAction, Route, RouteDecision};
pub use session::{Session, SessionError, SessionState};
pub use size::{format_bytes_as_mb, format_megabytes, parse_size_mb, total_megabytes, SizeUnit};
pub use upload::{
    AbortHandle, SelectedFile, UploadError, UploadEvent, UploadId, UploadPhase, UploadRunner,
    UploadTask,
};
pub use validation::{
    FieldError, FormField, LoginCredentials, LoginForm, Registration, RegistrationForm,
    ValidationErrors,
};
pub use verification::{
    MockCodeSource, VerificationChallenge, VerificationCodeSource, VerificationError,
    MOCK_VERIFICATION_CODE,
};
