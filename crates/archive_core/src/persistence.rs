//! Mirrors the session into key/value flags and restores it at boot.

use platform_host::{load_flag_typed_with, FlagStore};

use crate::{
    config::{ArchiveConfig, ARCHIVE_CONFIG_KEY},
    session::{Session, SessionState},
};

pub const LOGGED_IN_KEY: &str = "isLoggedIn";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const USER_NAME_KEY: &str = "userName";

const LOGGED_IN_VALUE: &str = "true";

/// Restores the session from flags. Only `isLoggedIn == "true"` counts as logged in.
///
/// # Errors
///
/// Returns the store error when a flag cannot be read.
pub async fn load_session_with<S: FlagStore + ?Sized>(store: &S) -> Result<SessionState, String> {
    let logged_in = store.get_flag(LOGGED_IN_KEY).await?;
    if logged_in.as_deref() != Some(LOGGED_IN_VALUE) {
        return Ok(SessionState::LoggedOut);
    }
    let email = store.get_flag(USER_EMAIL_KEY).await?.unwrap_or_default();
    let full_name = store.get_flag(USER_NAME_KEY).await?;
    Ok(SessionState::LoggedIn(Session { email, full_name }))
}

/// Writes the session flags. `userName` is removed when the session has no name.
///
/// # Errors
///
/// Returns the first store error.
pub async fn persist_session_with<S: FlagStore + ?Sized>(
    store: &S,
    session: &Session,
) -> Result<(), String> {
    store.set_flag(LOGGED_IN_KEY, LOGGED_IN_VALUE).await?;
    store.set_flag(USER_EMAIL_KEY, &session.email).await?;
    match &session.full_name {
        Some(name) => store.set_flag(USER_NAME_KEY, name).await,
        None => store.remove_flag(USER_NAME_KEY).await,
    }
}

/// Removes all session flags.
///
/// # Errors
///
/// Returns the first store error.
pub async fn clear_session_with<S: FlagStore + ?Sized>(store: &S) -> Result<(), String> {
    for key in [LOGGED_IN_KEY, USER_EMAIL_KEY, USER_NAME_KEY] {
        store.remove_flag(key).await?;
    }
    Ok(())
}

/// Loads a stored [`ArchiveConfig`] override. Missing fields take their defaults.
///
/// # Errors
///
/// Returns an error when the stored override is not valid JSON.
pub async fn load_config_override_with<S: FlagStore + ?Sized>(
    store: &S,
) -> Result<Option<ArchiveConfig>, String> {
    load_flag_typed_with(store, ARCHIVE_CONFIG_KEY).await
}
