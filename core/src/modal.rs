//! Tracks the login prompt currently on screen.

use std::sync::{Mutex, MutexGuard};

use crate::host::LoginPrompt;

/// Holds at most one open `LoginPrompt`.
///
/// The slot is filled when a prompt is opened and emptied only when that
/// prompt is confirmed or dismissed, so a second 401/402 while a prompt is
/// visible never opens another.
#[derive(Debug, Default)]
pub struct ModalSlot {
    current: Mutex<Option<LoginPrompt>>,
}

impl ModalSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `prompt` if nothing is open. Returns whether it was stored; the
    /// caller shows the dialog only in that case.
    pub fn open(&self, prompt: LoginPrompt) -> bool {
        let mut current = self.lock();
        if current.is_some() {
            return false;
        }
        *current = Some(prompt);
        true
    }

    pub fn take(&self) -> Option<LoginPrompt> {
        self.lock().take()
    }

    pub fn current(&self) -> Option<LoginPrompt> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<LoginPrompt>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
