//! Round-robin session selection
//!
//! The pool owns the ordered list of session credentials loaded at startup and
//! a single rotation cursor. Selection returns the credential under the cursor
//! and advances it by one, modulo the pool size. The cursor is the only mutable
//! state; it is guarded by a `Mutex` held for the read-advance-return sequence
//! only, with no I/O or await points inside the critical section.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::credential::SessionCredential;
use crate::error::{Error, Result};

/// Pool of upstream session credentials.
///
/// Constructed once at startup and shared by reference (typically `Arc`)
/// across request handlers.
#[derive(Debug)]
pub struct SessionPool {
    sessions: Vec<SessionCredential>,
    /// Index of the next session to hand out. Always `< sessions.len()`
    /// when the pool is non-empty.
    cursor: Mutex<usize>,
}

impl SessionPool {
    pub fn new(sessions: Vec<SessionCredential>) -> Self {
        info!(sessions = sessions.len(), "session pool initialized");
        Self {
            sessions,
            cursor: Mutex::new(0),
        }
    }

    /// Select the session to use for a request against `model`.
    ///
    /// - empty pool: `NoSessionsAvailable`
    /// - one session: returned directly without touching the cursor
    /// - several: the session at the cursor, after which the cursor advances
    ///
    /// `model` does not influence the choice; it is carried for error context
    /// and logging.
    pub fn select(&self, model: &str) -> Result<SessionCredential> {
        let selected = match self.sessions.len() {
            0 => {
                return Err(Error::NoSessionsAvailable {
                    model: model.to_string(),
                });
            }
            1 => {
                debug!(model, index = 0, "selected only session");
                &self.sessions[0]
            }
            n => {
                let index = {
                    // A panic elsewhere while holding the lock cannot leave the
                    // cursor out of range, so a poisoned lock is still usable.
                    let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
                    let index = *cursor % n;
                    *cursor = (index + 1) % n;
                    index
                };
                debug!(model, index, "selected session");
                &self.sessions[index]
            }
        };

        metrics::counter!("session_pool_selections_total").increment(1);
        Ok(selected.clone())
    }

    /// Number of configured sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Upstream attempts a retry orchestrator may make per request: one per
    /// configured session.
    pub fn retry_budget(&self) -> usize {
        self.sessions.len()
    }
}
