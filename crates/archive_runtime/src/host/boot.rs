use archive_core::{load_config_override_with, load_session_with, ArchiveAction};
use leptos::{create_effect, logging, spawn_local, Callable, Callback};

use super::{navigation, ArchiveHostContext};

pub(super) fn install_boot_hydration(host: ArchiveHostContext, dispatch: Callback<ArchiveAction>) {
    create_effect(move |_| {
        let dispatch = dispatch;
        let flags = host.flag_store();
        spawn_local(async move {
            match load_config_override_with(flags.as_ref()).await {
                Ok(Some(config)) => dispatch.call(ArchiveAction::HydrateConfig(config)),
                Ok(None) => {}
                Err(err) => logging::warn!("load archive config override failed: {err}"),
            }

            match load_session_with(flags.as_ref()).await {
                Ok(session) => dispatch.call(ArchiveAction::HydrateSession(session)),
                Err(err) => logging::warn!("load session flags failed: {err}"),
            }

            dispatch.call(ArchiveAction::Navigate(navigation::current_route()));
        });
    });
}
