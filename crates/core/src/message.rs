//! Message and Transcript domain types.
//!
//! These are the value objects that flow through the chat path:
//! User sends a message → Transcript records it → Provider generates a reply → Transcript trims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of turns a transcript keeps after each completed round.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

/// Unique identifier for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant
    Assistant,
    /// System instructions (persona, catalog digest)
    System,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }
}

/// The bounded, session-scoped history of a chat.
///
/// Turns are append-only; the only removal is [`Transcript::trim`], which
/// keeps the most recent `window` turns. Trimming is the caller's job once a
/// round completes, so between appending a user turn and trimming the
/// transcript may briefly hold `window + 1` turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Owning session
    pub id: SessionId,

    /// Ordered turns, oldest first
    turns: Vec<Message>,

    /// Maximum turns retained after a trim
    window: usize,

    /// When this transcript was created
    pub created_at: DateTime<Utc>,

    /// When the last turn was added
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create an empty transcript with the default window.
    pub fn new(id: SessionId) -> Self {
        Self::with_window(id, DEFAULT_HISTORY_WINDOW)
    }

    /// Create an empty transcript keeping at most `window` turns (minimum 1).
    pub fn with_window(id: SessionId, window: usize) -> Self {
        let now = Utc::now();
        Self {
            id,
            turns: Vec::new(),
            window: window.max(1),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a turn. No window check happens here.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.turns.push(message);
    }

    /// Drop the oldest turns so at most `window` remain. Returns how many were dropped.
    pub fn trim(&mut self) -> usize {
        let excess = self.turns.len().saturating_sub(self.window);
        if excess > 0 {
            self.turns.drain(..excess);
        }
        excess
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(SessionId::new())
    }
}
