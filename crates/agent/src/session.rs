//! Session-scoped transcripts.
//!
//! Each session owns one [`Transcript`] behind its own `tokio::sync::Mutex`,
//! so rounds on the same session run one after another while different
//! sessions never share history. The map keeps at most `max_sessions`
//! entries and evicts the least recently used one beyond that.

use lappybot_core::message::{DEFAULT_HISTORY_WINDOW, SessionId, Transcript};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

struct SessionSlot {
    transcript: Arc<Mutex<Transcript>>,
    last_used: AtomicU64,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionSlot>>,
    clock: AtomicU64,
    window: usize,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// `window` turns per transcript, at most `max_sessions` live sessions
    /// (both floored at 1).
    pub fn new(window: usize, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            window: window.max(1),
            max_sessions: max_sessions.max(1),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The session's transcript, created empty on first use.
    pub async fn transcript(&self, id: &SessionId) -> Arc<Mutex<Transcript>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(slot) = sessions.get(id) {
                slot.last_used.store(self.tick(), Ordering::Relaxed);
                return slot.transcript.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        let now = self.tick();
        if let Some(slot) = sessions.get(id) {
            slot.last_used.store(now, Ordering::Relaxed);
            return slot.transcript.clone();
        }

        let transcript = Arc::new(Mutex::new(Transcript::with_window(id.clone(), self.window)));
        sessions.insert(
            id.clone(),
            SessionSlot {
                transcript: transcript.clone(),
                last_used: AtomicU64::new(now),
            },
        );

        while sessions.len() > self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, slot)| slot.last_used.load(Ordering::Relaxed))
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    sessions.remove(&key);
                    debug!(session = %key, "Evicted least recently used session");
                }
                None => break,
            }
        }

        transcript
    }

    /// Whether the session currently exists.
    pub async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Drop a session and its history.
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
