//! UI handles
//!
//! A [`ChatView`] is the set of handles the client operates on: the transcript
//! panel, the input field, and the status indicator. Each frontend supplies its
//! own (reactive signals in the browser, a printer in the terminal).
//! [`MemoryView`] keeps everything in memory.

use std::sync::{Mutex, PoisonError};

use crate::message::{BubbleId, BubbleState, Sender, Transcript};
use crate::status::ConnectivityStatus;

pub trait ChatView {
    /// Append a bubble to the transcript panel
    fn append(&self, sender: Sender, text: &str, state: BubbleState) -> BubbleId;

    /// Replace the full text and state of an existing bubble
    fn update(&self, id: BubbleId, text: &str, state: BubbleState);

    /// Empty the prompt input field
    fn clear_input(&self);

    /// Bring the most recent bubble into view
    fn scroll_to_latest(&self);

    /// Reflect a new connectivity status on the indicator
    fn set_status(&self, status: ConnectivityStatus);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryViewState {
    pub transcript: Transcript,
    pub status: ConnectivityStatus,
    pub input_clears: usize,
    pub scrolls: usize,
}

/// In-memory view
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<MemoryViewState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut MemoryViewState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn snapshot(&self) -> MemoryViewState {
        self.with(|s| s.clone())
    }

    pub fn transcript(&self) -> Transcript {
        self.with(|s| s.transcript.clone())
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.with(|s| s.status)
    }
}

impl ChatView for MemoryView {
    fn append(&self, sender: Sender, text: &str, state: BubbleState) -> BubbleId {
        self.with(|s| s.transcript.push(sender, text, state))
    }

    fn update(&self, id: BubbleId, text: &str, state: BubbleState) {
        self.with(|s| {
            s.transcript.replace(id, text, state);
        });
    }

    fn clear_input(&self) {
        self.with(|s| s.input_clears += 1);
    }

    fn scroll_to_latest(&self) {
        self.with(|s| s.scrolls += 1);
    }

    fn set_status(&self, status: ConnectivityStatus) {
        self.with(|s| s.status = status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_view_tracks_handles() {
        let view = MemoryView::new();
        let id = view.append(Sender::Assistant, "…", BubbleState::Pending);
        view.update(id, "done", BubbleState::Complete);
        view.clear_input();
        view.scroll_to_latest();
        view.set_status(ConnectivityStatus::Online);

        let snap = view.snapshot();
        assert_eq!(snap.transcript.entries(), vec![(Sender::Assistant, "done")]);
        assert_eq!(snap.input_clears, 1);
        assert_eq!(snap.scrolls, 1);
        assert_eq!(snap.status, ConnectivityStatus::Online);
    }
}
