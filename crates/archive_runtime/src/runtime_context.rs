//! Runtime provider and context wiring for the archive client.
//!
//! This module owns the long-lived reducer container, the effect queue, the notice queue and the
//! last rejected action. Side effects run in [`crate::effect_executor`] and [`crate::host`].
#![allow(clippy::clone_on_copy)]

use archive_core::{
    reduce_archive, ArchiveAction, ArchiveConfig, ArchiveEffect, ArchiveError, ArchiveState,
    Notice,
};
use leptos::*;

use crate::{effect_executor, host::ArchiveHostContext};

#[derive(Clone, Copy)]
/// Leptos context for reading archive state and dispatching [`ArchiveAction`] values.
pub struct ArchiveRuntimeContext {
    /// Flag storage and timer registry used to execute side effects.
    pub host: StoredValue<ArchiveHostContext>,
    /// Reactive archive state signal.
    pub state: RwSignal<ArchiveState>,
    /// Queue of effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<ArchiveEffect>>,
    /// Notices waiting to be shown.
    pub notices: RwSignal<Vec<Notice>>,
    /// Error of the most recently rejected action; cleared by the next accepted one.
    pub last_error: RwSignal<Option<ArchiveError>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<ArchiveAction>,
}

impl ArchiveRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: ArchiveAction) {
        self.dispatch.call(action);
    }

    pub fn push_notice(&self, notice: Notice) {
        self.notices.update(|queue| queue.push(notice));
    }

    /// Removes and returns every queued notice.
    pub fn take_notices(&self) -> Vec<Notice> {
        let mut drained = Vec::new();
        self.notices.update(|queue| drained = std::mem::take(queue));
        drained
    }
}

#[component]
/// Provides [`ArchiveRuntimeContext`] to descendant components and boots persisted state.
pub fn ArchiveProvider(
    /// Starting configuration; a stored override replaces it during boot.
    #[prop(optional)]
    config: Option<ArchiveConfig>,
    children: Children,
) -> impl IntoView {
    let host = store_value(ArchiveHostContext::default());
    let state = create_rw_signal(ArchiveState::new(config.unwrap_or_default()));
    let effects = create_rw_signal(Vec::<ArchiveEffect>::new());
    let notices = create_rw_signal(Vec::<Notice>::new());
    let last_error = create_rw_signal(None::<ArchiveError>);

    let dispatch = Callback::new(move |action: ArchiveAction| {
        let mut archive = state.get_untracked();
        let previous = archive.clone();

        match reduce_archive(&mut archive, action) {
            Ok(new_effects) => {
                if archive != previous {
                    state.set(archive);
                }
                if last_error.with_untracked(Option::is_some) {
                    last_error.set(None);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => {
                if let Some(notice) = err.user_notice() {
                    notices.update(|queue| queue.push(notice));
                } else {
                    logging::warn!("archive reducer rejected action: {err}");
                }
                last_error.set(Some(err));
            }
        }
    });

    let runtime = ArchiveRuntimeContext {
        host,
        state,
        effects,
        notices,
        last_error,
        dispatch,
    };

    provide_context(runtime.clone());

    host.get_value().install_boot_hydration(dispatch);
    host.get_value().install_location_listener(dispatch);
    effect_executor::install(runtime);

    on_cleanup(move || host.get_value().clear_timers());

    children().into_view()
}

/// Returns the current [`ArchiveRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ArchiveProvider`].
pub fn use_archive_runtime() -> ArchiveRuntimeContext {
    use_context::<ArchiveRuntimeContext>().expect("ArchiveRuntimeContext not provided")
}
