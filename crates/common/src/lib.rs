//! Common types shared by the gateway crates

mod secret;

pub use secret::Secret;
