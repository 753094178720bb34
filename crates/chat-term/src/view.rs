//! Terminal view
//!
//! Prints assistant replies incrementally: each update writes only the text
//! of that reply that was not on screen yet. When replies stream concurrently,
//! a reply resuming after another one wrote in between starts a fresh
//! `assistant> ` line. User bubbles are recorded but not echoed, since the
//! prompt is already on the terminal.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use chat_core::{BubbleId, BubbleState, ChatView, ConnectivityStatus, Sender, Transcript};

struct TermState<W> {
    out: W,
    transcript: Transcript,
    status: ConnectivityStatus,
    /// Text already printed for each reply still streaming
    streaming: HashMap<BubbleId, String>,
    /// Reply whose line is open at the bottom of the terminal
    open_line: Option<BubbleId>,
}

impl<W: Write> TermState<W> {
    fn emit(&mut self, text: &str) {
        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }

    /// Make `id` own the open line, ending another reply's line first
    fn continue_line(&mut self, id: BubbleId) {
        if self.open_line != Some(id) {
            self.end_open_line();
            self.emit("assistant> ");
            self.open_line = Some(id);
        }
    }

    fn end_open_line(&mut self) {
        if self.open_line.take().is_some() {
            self.emit("\n");
        }
    }
}

pub struct TerminalView<W = io::Stdout> {
    state: Mutex<TermState<W>>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(TermState {
                out,
                transcript: Transcript::new(),
                status: ConnectivityStatus::Unknown,
                streaming: HashMap::new(),
                open_line: None,
            }),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut TermState<W>) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    #[cfg(test)]
    fn transcript(&self) -> Transcript {
        self.with(|s| s.transcript.clone())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner).out
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append(&self, sender: Sender, text: &str, state: BubbleState) -> BubbleId {
        self.with(|s| {
            let id = s.transcript.push(sender, text, state);
            if sender == Sender::Assistant {
                if state == BubbleState::Pending {
                    // Placeholder stays off screen; the stream replaces it
                    s.streaming.insert(id, String::new());
                } else {
                    s.end_open_line();
                    s.emit(&format!("assistant> {text}\n"));
                }
            }
            id
        })
    }

    fn update(&self, id: BubbleId, text: &str, state: BubbleState) {
        self.with(|s| {
            s.transcript.replace(id, text, state);

            let Some(printed) = s.streaming.get(&id).cloned() else {
                s.end_open_line();
                s.emit(&format!("assistant> {text}\n"));
                return;
            };

            let unseen = match text.strip_prefix(printed.as_str()) {
                Some(suffix) => suffix,
                None => {
                    // Rewritten from scratch: reprint on a line of its own
                    s.end_open_line();
                    text
                }
            };
            if !unseen.is_empty() {
                s.continue_line(id);
                s.emit(unseen);
            }

            if state == BubbleState::Pending {
                s.streaming.insert(id, text.to_owned());
            } else {
                s.streaming.remove(&id);
                if s.open_line == Some(id) {
                    s.end_open_line();
                }
            }
        });
    }

    fn clear_input(&self) {}

    fn scroll_to_latest(&self) {}

    fn set_status(&self, status: ConnectivityStatus) {
        self.with(|s| {
            if s.status != status {
                s.status = status;
                tracing::info!("Backend {}", status.label());
            }
        });
    }
}
