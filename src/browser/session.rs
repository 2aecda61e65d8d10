//! Per-request session registry
//!
//! A session is one page lifetime scoped to a single advanced-automation
//! request. The registry owns the page handle; removal closes it before
//! dropping the entry, so a session's handle is never usable after
//! teardown.

use crate::browser::PageHandle;
use crate::error::{RelayError, Result};
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A registered automation session
pub struct Session {
    pub page: Arc<dyn PageHandle>,
    pub started: Instant,
}

/// In-memory map of live sessions keyed by id
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
}

/// Time-based id with a random suffix to avoid collisions within a
/// millisecond
fn generate_session_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();

    format!("session_{}_{}", millis, suffix.to_lowercase())
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page, returning the new session id
    pub fn create(&self, page: Arc<dyn PageHandle>) -> Result<String> {
        let id = generate_session_id();
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| RelayError::LockPoisoned(e.to_string()))?;

        sessions.insert(
            id.clone(),
            Session {
                page,
                started: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Page handle of a live session
    pub fn get(&self, id: &str) -> Option<Arc<dyn PageHandle>> {
        self.sessions.lock().ok()?.get(id).map(|s| s.page.clone())
    }

    /// Elapsed time since a session was created, if it is still live
    pub fn elapsed_ms(&self, id: &str) -> Option<u128> {
        self.sessions
            .lock()
            .ok()?
            .get(id)
            .map(|s| s.started.elapsed().as_millis())
    }

    /// Ids of all live sessions
    pub fn ids(&self) -> Vec<String> {
        self.sessions
            .lock()
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions
            .lock()
            .map(|s| s.contains_key(id))
            .unwrap_or(false)
    }

    /// Tear down a session: close its page, then drop the entry
    ///
    /// The entry is removed even when the close fails; the failure is
    /// logged so the caller's own error (if any) is not masked.
    pub fn remove(&self, id: &str) {
        let session = match self.sessions.lock() {
            Ok(mut sessions) => sessions.remove(id),
            Err(e) => {
                log::error!("Session registry lock poisoned removing {}: {}", id, e);
                return;
            }
        };

        if let Some(session) = session {
            if let Err(e) = session.page.close() {
                log::warn!("Error closing page for {}: {}", id, e);
            }
        }
    }

    /// Tear down every live session (shutdown path)
    pub fn clear(&self) {
        for id in self.ids() {
            self.remove(&id);
        }
    }
}
