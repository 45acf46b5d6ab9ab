use archive_core::{clear_session_with, persist_session_with, Session};
use leptos::{logging, spawn_local};

use super::ArchiveHostContext;

pub(super) fn persist_session(host: ArchiveHostContext, session: Session) {
    let flags = host.flag_store();
    spawn_local(async move {
        if let Err(err) = persist_session_with(flags.as_ref(), &session).await {
            logging::warn!("persist session flags failed: {err}");
        }
    });
}

pub(super) fn clear_session(host: ArchiveHostContext) {
    let flags = host.flag_store();
    spawn_local(async move {
        if let Err(err) = clear_session_with(flags.as_ref()).await {
            logging::warn!("clear session flags failed: {err}");
        }
    });
}
