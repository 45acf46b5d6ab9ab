//! Interval and timeout plumbing for delayed actions, upload ticks and the resend countdown.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use archive_core::{AbortHandle, ArchiveAction, UploadId, UploadRunner, UploadTask};
use leptos::{logging, set_interval_with_handle, set_timeout, Callable, Callback};
use leptos::leptos_dom::helpers::IntervalHandle;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Dispatches `action` once after `delay_ms`.
pub(super) fn schedule(dispatch: Callback<ArchiveAction>, delay_ms: u32, action: ArchiveAction) {
    set_timeout(
        move || dispatch.call(action),
        Duration::from_millis(u64::from(delay_ms)),
    );
}

struct ActiveUpload {
    id: UploadId,
    abort: AbortHandle,
    interval: Rc<Cell<Option<IntervalHandle>>>,
}

impl ActiveUpload {
    fn stop(self) {
        self.abort.abort();
        if let Some(handle) = self.interval.take() {
            handle.clear();
        }
    }
}

#[derive(Default)]
pub(super) struct TimerRegistry {
    upload: Option<ActiveUpload>,
    countdown: Option<IntervalHandle>,
}

impl TimerRegistry {
    /// Drives `task` on a fixed interval. A running upload is stopped first.
    pub(super) fn start_upload(
        &mut self,
        dispatch: Callback<ArchiveAction>,
        task: UploadTask,
        tick_ms: u32,
    ) {
        if let Some(previous) = self.upload.take() {
            previous.stop();
        }

        let id = task.id;
        let runner = UploadRunner::new(task, move |event| {
            dispatch.call(ArchiveAction::Upload(event));
        });
        let abort = runner.abort_handle();
        let runner = Rc::new(RefCell::new(runner));
        let slot = Rc::new(Cell::new(None::<IntervalHandle>));
        let tick_slot = Rc::clone(&slot);

        match set_interval_with_handle(
            move || {
                if !runner.borrow_mut().tick() {
                    if let Some(handle) = tick_slot.take() {
                        handle.clear();
                    }
                }
            },
            Duration::from_millis(u64::from(tick_ms)),
        ) {
            Ok(handle) => {
                slot.set(Some(handle));
                self.upload = Some(ActiveUpload {
                    id,
                    abort,
                    interval: slot,
                });
            }
            Err(err) => logging::warn!("upload ticker install failed: {err:?}"),
        }
    }

    pub(super) fn abort_upload(&mut self, id: UploadId) {
        if self.upload.as_ref().is_some_and(|active| active.id == id) {
            if let Some(active) = self.upload.take() {
                active.stop();
            }
        }
    }

    /// Ticks the resend countdown once per second, replacing any running countdown.
    pub(super) fn start_countdown(&mut self, dispatch: Callback<ArchiveAction>) {
        self.stop_countdown();
        match set_interval_with_handle(
            move || dispatch.call(ArchiveAction::TickResendCountdown),
            COUNTDOWN_TICK,
        ) {
            Ok(handle) => self.countdown = Some(handle),
            Err(err) => logging::warn!("resend countdown install failed: {err:?}"),
        }
    }

    pub(super) fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.clear();
        }
    }

    pub(super) fn clear_all(&mut self) {
        if let Some(active) = self.upload.take() {
            active.stop();
        }
        self.stop_countdown();
    }
}
