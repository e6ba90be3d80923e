//! Transient user-facing notices with auto-dismiss.
//!
//! A notice disappears after the configured delay unless a newer notice
//! replaces it first; replacing a notice cancels the older one's timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    notice: Option<Notice>,
}

/// Holds at most one visible notice. Must be used inside a tokio runtime.
pub struct NoticeBoard {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Duration,
    timer: Option<JoinHandle<()>>,
}

impl NoticeBoard {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after,
            timer: None,
        }
    }

    pub fn show(&mut self, notice: Notice) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.notice = Some(notice);
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        let delay = self.dismiss_after;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&slot);
            // An aborted timer may still have been mid-wake; only clear our own notice.
            if slot.generation == generation {
                slot.notice = None;
            }
        }));
    }

    pub fn current(&self) -> Option<Notice> {
        lock(&self.slot).notice.clone()
    }

    pub fn dismiss(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        lock(&self.slot).notice = None;
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> std::sync::MutexGuard<'_, Slot> {
    // The slot holds plain data, so a poisoned lock is still usable.
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
