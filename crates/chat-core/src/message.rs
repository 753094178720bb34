//! Transcript and Message Bubbles
//!
//! The transcript is append-only. The only in-place edit is replacing a
//! bubble's text and state, which streaming delivery and the failure path use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a bubble belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Prompt typed by the user
    User,
    /// Reply from the backend
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a bubble's content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleState {
    /// Placeholder or partially streamed reply
    Pending,
    /// Final content
    #[default]
    Complete,
    /// Request failed; text carries the error notice
    Failed,
}

/// Position of a bubble in its transcript
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BubbleId(usize);

impl BubbleId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BubbleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single rendered message unit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub sender: Sender,
    pub text: String,
    pub state: BubbleState,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Bubble {
    /// CSS classes for rendering, e.g. `"message assistant pending"`
    pub fn css_class(&self) -> String {
        match self.state {
            BubbleState::Complete => format!("message {}", self.sender),
            BubbleState::Pending => format!("message {} pending", self.sender),
            BubbleState::Failed => format!("message {} error", self.sender),
        }
    }
}

/// Ordered sequence of bubbles for one page/session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bubble and return its id
    pub fn push(&mut self, sender: Sender, text: impl Into<String>, state: BubbleState) -> BubbleId {
        let id = BubbleId(self.bubbles.len());
        self.bubbles.push(Bubble {
            id,
            sender,
            text: text.into(),
            state,
            created_at: Utc::now(),
        });
        id
    }

    /// Replace the text and state of an existing bubble.
    ///
    /// Returns `false` if `id` does not belong to this transcript.
    pub fn replace(&mut self, id: BubbleId, text: impl Into<String>, state: BubbleState) -> bool {
        match self.bubbles.get_mut(id.0) {
            Some(bubble) => {
                bubble.text = text.into();
                bubble.state = state;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.get(id.0)
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn last(&self) -> Option<&Bubble> {
        self.bubbles.last()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// `(sender, text)` pairs in order
    pub fn entries(&self) -> Vec<(Sender, &str)> {
        self.bubbles.iter().map(|b| (b.sender, b.text.as_str())).collect()
    }
}
