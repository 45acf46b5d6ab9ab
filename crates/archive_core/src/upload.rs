//! Simulated uploads.
//!
//! An [`UploadTask`] advances by a fixed step per tick until it reaches 100 %. An
//! [`UploadRunner`] owns a task, reports every tick through a callback, and stops as soon as its
//! [`AbortHandle`] fires, so closing the upload dialog halts in-flight work.

use std::{cell::Cell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::Locale, size::format_bytes_as_mb};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("an upload is already running")]
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UploadId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// File picked in the upload dialog.
pub struct SelectedFile {
    pub name: String,
    /// Byte size reported by the browser, when known.
    pub size_bytes: Option<u64>,
}

impl SelectedFile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes: None,
        }
    }

    /// Size shown next to the picked file in the upload dialog, when the browser reported one.
    pub fn size_label(&self, locale: Locale) -> Option<String> {
        self.size_bytes.map(|bytes| format_bytes_as_mb(bytes, locale))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    Uploading,
    Completed,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadEvent {
    Progress { id: UploadId, percent: u8 },
    Completed { id: UploadId, file: SelectedFile },
    Aborted { id: UploadId },
}

impl UploadEvent {
    pub fn id(&self) -> UploadId {
        match self {
            Self::Progress { id, .. } | Self::Completed { id, .. } | Self::Aborted { id } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub id: UploadId,
    pub file: SelectedFile,
    progress: u8,
    step: u8,
    phase: UploadPhase,
}

impl UploadTask {
    /// Starts a task at 0 %. A zero step is bumped to 1 so the task always terminates.
    pub fn new(id: UploadId, file: SelectedFile, step_percent: u8) -> Self {
        Self {
            id,
            file,
            progress: 0,
            step: step_percent.max(1),
            phase: UploadPhase::Uploading,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == UploadPhase::Uploading
    }

    /// Applies one tick. Finished tasks keep reporting their terminal event.
    pub fn advance(&mut self) -> UploadEvent {
        match self.phase {
            UploadPhase::Aborted => UploadEvent::Aborted { id: self.id },
            UploadPhase::Completed => self.completed_event(),
            UploadPhase::Uploading => {
                self.progress = self.progress.saturating_add(self.step).min(100);
                if self.progress == 100 {
                    self.phase = UploadPhase::Completed;
                    self.completed_event()
                } else {
                    UploadEvent::Progress {
                        id: self.id,
                        percent: self.progress,
                    }
                }
            }
        }
    }

    /// Records a progress value reported by a runner. Values never move backwards.
    pub fn record_progress(&mut self, percent: u8) {
        if self.is_running() {
            self.progress = self.progress.max(percent.min(100));
        }
    }

    pub fn abort(&mut self) {
        if self.is_running() {
            self.phase = UploadPhase::Aborted;
        }
    }

    fn completed_event(&self) -> UploadEvent {
        UploadEvent::Completed {
            id: self.id,
            file: self.file.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Shared abort flag. Clones observe the same flag.
pub struct AbortHandle(Rc<Cell<bool>>);

impl AbortHandle {
    pub fn abort(&self) {
        self.0.set(true);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.get()
    }
}

/// Drives an [`UploadTask`] tick by tick and reports each step to a callback.
pub struct UploadRunner {
    task: UploadTask,
    abort: AbortHandle,
    on_event: Box<dyn FnMut(UploadEvent)>,
    finished: bool,
}

impl fmt::Debug for UploadRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRunner")
            .field("task", &self.task)
            .field("aborted", &self.abort.is_aborted())
            .field("finished", &self.finished)
            .finish()
    }
}

impl UploadRunner {
    pub fn new(task: UploadTask, on_event: impl FnMut(UploadEvent) + 'static) -> Self {
        Self {
            task,
            abort: AbortHandle::default(),
            on_event: Box::new(on_event),
            finished: false,
        }
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn task(&self) -> &UploadTask {
        &self.task
    }

    /// Advances once and reports the outcome. Returns `false` once the runner is done; later
    /// calls are no-ops.
    pub fn tick(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if self.abort.is_aborted() {
            self.task.abort();
        }
        let event = self.task.advance();
        self.finished = !matches!(event, UploadEvent::Progress { .. });
        (self.on_event)(event);
        !self.finished
    }
}
