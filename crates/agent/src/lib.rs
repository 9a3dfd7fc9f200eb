//! The chat side of LappyBot.
//!
//! Each chat round runs against a session-scoped, bounded transcript:
//!
//! 1. **Append** the user turn
//! 2. **Compose** the prompt: one system turn (persona + catalog digest), then the history
//! 3. **Generate** a reply through the configured provider
//! 4. **Append and trim** the reply, keeping the last few turns
//! 5. **Render** the reply for display (`**` pairs to `<b>`, newlines to `<br>`)
//!
//! Image requests skip the transcript and go to the image search backend.

pub mod chat;
pub mod markup;
pub mod prompt;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use chat::{ChatEngine, ChatReply, ChatRequest, GENERATION_APOLOGY, ReplyKind, RequestKind};
pub use prompt::{PERSONA, PromptComposer, catalog_digest, system_message};
pub use session::SessionStore;
