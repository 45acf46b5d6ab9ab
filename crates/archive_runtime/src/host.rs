//! Host-side helpers for executing reducer effects against browser storage, timers and history.

mod boot;
mod navigation;
mod persistence_effects;
mod timers;

use std::{cell::RefCell, rc::Rc};

use archive_core::{ArchiveAction, ArchiveEffect};
use leptos::Callback;
use platform_host::FlagStore;
use platform_host_web::{flag_store, host_strategy_name};

use crate::runtime_context::ArchiveRuntimeContext;

#[derive(Clone)]
/// Host service bundle for archive runtime side effects.
pub struct ArchiveHostContext {
    flags: Rc<dyn FlagStore>,
    timers: Rc<RefCell<timers::TimerRegistry>>,
    host_strategy_name: &'static str,
}

impl Default for ArchiveHostContext {
    fn default() -> Self {
        Self::with_flag_store(Rc::new(flag_store()))
    }
}

impl ArchiveHostContext {
    /// Builds a host context around an explicit flag store.
    pub fn with_flag_store(flags: Rc<dyn FlagStore>) -> Self {
        Self {
            flags,
            timers: Rc::new(RefCell::new(timers::TimerRegistry::default())),
            host_strategy_name: host_strategy_name(),
        }
    }

    /// Returns the configured session flag store.
    pub fn flag_store(&self) -> Rc<dyn FlagStore> {
        self.flags.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Restores the stored config override and session, then resolves the current location.
    pub fn install_boot_hydration(&self, dispatch: Callback<ArchiveAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Re-runs the route guard on browser back/forward navigation.
    pub fn install_location_listener(&self, dispatch: Callback<ArchiveAction>) {
        navigation::install_location_listener(dispatch);
    }

    /// Stops every ticker owned by this host.
    pub fn clear_timers(&self) {
        self.timers.borrow_mut().clear_all();
    }

    /// Executes a single [`ArchiveEffect`] emitted by the reducer.
    pub fn run_effect(&self, runtime: ArchiveRuntimeContext, effect: ArchiveEffect) {
        match effect {
            ArchiveEffect::PersistSession(session) => {
                persistence_effects::persist_session(self.clone(), session)
            }
            ArchiveEffect::ClearPersistedSession => {
                persistence_effects::clear_session(self.clone())
            }
            ArchiveEffect::NavigateTo(route) => navigation::push_route(route),
            ArchiveEffect::Notify(notice) => runtime.push_notice(notice),
            ArchiveEffect::Schedule { delay_ms, action } => {
                timers::schedule(runtime.dispatch, delay_ms, *action)
            }
            ArchiveEffect::StartUploadTicker { task, tick_ms } => self
                .timers
                .borrow_mut()
                .start_upload(runtime.dispatch, task, tick_ms),
            ArchiveEffect::AbortUpload(id) => self.timers.borrow_mut().abort_upload(id),
            ArchiveEffect::StartResendCountdown => {
                self.timers.borrow_mut().start_countdown(runtime.dispatch)
            }
            ArchiveEffect::StopResendCountdown => self.timers.borrow_mut().stop_countdown(),
        }
    }
}
