//! Upstream session rotation
//!
//! The upstream provider authenticates each account by a session key rather
//! than a per-request API key. This crate holds the configured keys and hands
//! one out per logical request, rotating round-robin so load spreads across
//! accounts and a retrying caller sees a different session on each attempt.
//!
//! Rotation is purely positional: no health tracking, no weighting, and no
//! state survives a restart.

pub mod credential;
pub mod error;
pub mod pool;

pub use credential::SessionCredential;
pub use error::{Error, Result};
pub use pool::SessionPool;
