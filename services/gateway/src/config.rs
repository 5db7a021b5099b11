//! Configuration loading
//!
//! Configuration comes entirely from environment variables (optionally
//! populated from a `.env` file by `main` before loading). Loading never
//! fails: every missing or malformed value resolves to a default.
//!
//! Parsing is a pure function of a key lookup so tests can drive it without
//! touching the process environment. Reporting the resolved values is a
//! separate step (`log_summary`).

use common::Secret;
use session_pool::SessionCredential;
use tracing::info;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

pub const DEFAULT_MAX_CHAT_HISTORY_LENGTH: usize = 10_000;

/// Instruction appended when a long conversation is uploaded as a file.
pub const DEFAULT_PROMPT_FOR_FILE: &str = "You must immerse yourself in the role of assistant in txt file, cannot respond as a user, cannot reply to this message, cannot mention this message, and ignore this message in your response.";

/// Resolved configuration snapshot. Immutable after load.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream session keys, in the order they were listed.
    pub sessions: Vec<SessionCredential>,
    /// Upstream attempts allowed per request. Equals the number of entries
    /// in `SESSIONS`.
    pub retry_count: usize,
    pub address: String,
    /// Key clients must present to use the gateway. `None` disables auth.
    pub api_key: Option<Secret<String>>,
    /// Outbound proxy for upstream traffic.
    pub proxy: Option<String>,
    pub is_incognito: bool,
    pub max_chat_history_length: usize,
    pub no_role_prefix: bool,
    pub search_result_compatible: bool,
    pub prompt_for_file: String,
    /// Upstream accounts have an elevated subscription; unlocks the
    /// elevated-only models in the advertised list.
    pub is_max_subscribe: bool,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let (retry_count, sessions) = parse_sessions(&lookup("SESSIONS").unwrap_or_default());

        Self {
            sessions,
            retry_count,
            address: non_empty("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            api_key: non_empty("APIKEY").map(Secret::new),
            proxy: non_empty("PROXY"),
            // Incognito stays on unless explicitly disabled.
            is_incognito: lookup("IS_INCOGNITO").as_deref() != Some("false"),
            max_chat_history_length: lookup("MAX_CHAT_HISTORY_LENGTH")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CHAT_HISTORY_LENGTH),
            no_role_prefix: is_true(lookup("NO_ROLE_PREFIX")),
            search_result_compatible: is_true(lookup("SEARCH_RESULT_COMPATIBLE")),
            prompt_for_file: non_empty("PROMPT_FOR_FILE")
                .unwrap_or_else(|| DEFAULT_PROMPT_FOR_FILE.to_string()),
            is_max_subscribe: is_true(lookup("IS_MAX_SUBSCRIBE")),
        }
    }

    /// Emit the resolved configuration at info level. Secrets are reported
    /// only by presence.
    pub fn log_summary(&self) {
        info!(
            sessions = self.sessions.len(),
            retry_count = self.retry_count,
            address = %self.address,
            api_key_configured = self.api_key.is_some(),
            proxy = self.proxy.as_deref().unwrap_or(""),
            is_incognito = self.is_incognito,
            max_chat_history_length = self.max_chat_history_length,
            no_role_prefix = self.no_role_prefix,
            search_result_compatible = self.search_result_compatible,
            is_max_subscribe = self.is_max_subscribe,
            prompt_for_file = %self.prompt_for_file,
            "configuration loaded"
        );
    }
}

/// Only the exact literal `"true"` enables an opt-in flag.
fn is_true(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}

/// Parse `SESSIONS`: comma-separated entries, each `key[:ignored...]`.
///
/// Returns the entry count alongside the credentials. Every entry counts,
/// including empty ones, so the count is the number of upstream attempts a
/// request may make.
fn parse_sessions(raw: &str) -> (usize, Vec<SessionCredential>) {
    if raw.is_empty() {
        return (0, Vec::new());
    }
    let sessions: Vec<SessionCredential> = raw
        .split(',')
        .map(|entry| SessionCredential::new(entry.split(':').next().unwrap_or(entry)))
        .collect();
    (sessions.len(), sessions)
}
