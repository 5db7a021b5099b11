//! Built-in model catalog
//!
//! Declared as an ordered slice so reverse-map construction and the
//! advertised list are stable across runs.

/// Public model name to upstream internal identifier, in advertised order.
pub const CATALOG: &[(&str, &str)] = &[
    ("claude-4-sonnet", "claude2"),
    ("claude-4-sonnet-think", "claude37sonnetthinking"),
    ("claude-4-5-sonnet", "claude45sonnet"),
    ("claude-4.5-sonnet-think", "claude45sonnetthinking"),
    ("claude-4-6-sonnet", "claude46sonnet"),
    ("claude-4.6-sonnet-think", "claude46sonnetthinking"),
    ("gemini-2.5-pro", "gemini25pro"),
    ("gemini-3-pro", "gemini30pro"),
    ("kimi-k2-thinking", "kimik2thinking"),
    ("grok", "grok"),
    ("grok-4", "grok4"),
    ("grok-4-non-thinking", "grok4nonthinking"),
    ("grok-4.1-reasoning", "grok41reasoning"),
    ("grok-4.1-non-reasoning", "grok41nonreasoning"),
    ("o3-pro", "o3pro"),
    ("o4-pro", "o4mini"),
    ("gpt-4o", "gpt4o"),
    ("gpt-4.1", "gpt41"),
    ("gpt-5.1", "gpt51"),
    ("gpt-5-think", "gpt5_thinking"),
    ("claude-4-opus", "claude40opus"),
    ("claude-4-opus-think", "claude40opusthinking"),
    ("claude-4.1-opus", "claude41opus"),
    ("claude-4.1-opus-think", "claude41opusthinking"),
    ("claude-4.5-opus", "claude45opus"),
    ("claude-4.5-opus-think", "claude45opusthinking"),
    ("claude-4.6-opus", "claude46opus"),
    ("claude-4.6-opus-think", "claude46opusthinking"),
    ("alpha", "pplx_alpha"),
    ("beta", "pplx_beta"),
    ("study", "pplx_study"),
    ("r1", "r1"),
    ("claude40sonnetthinking-labs", "claude40sonnetthinking_labs"),
    ("claude40opusthinking-labs", "claude40opusthinking_labs"),
];

/// Public names only advertised to accounts with an elevated subscription.
pub const ELEVATED_ONLY: &[&str] = &["o3-pro", "claude-4.1-opus-think"];
