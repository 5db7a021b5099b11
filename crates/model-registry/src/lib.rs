//! Model name translation
//!
//! Clients address models by public names (`gpt-4o`, `claude-4.5-opus`); the
//! upstream expects its own internal keys (`gpt4o`, `claude45opus`). The
//! registry holds the forward and reverse tables built from a static catalog
//! and the list of models advertised to clients, gated on whether the
//! upstream account has an elevated subscription.
//!
//! Every public name is advertised twice: as-is and with a `-search` suffix
//! that asks for search-augmented answers.

pub mod catalog;
pub mod registry;

pub use catalog::{CATALOG, ELEVATED_ONLY};
pub use registry::{
    ModelDescriptor, ModelRegistry, ResolvedRequest, SEARCH_SUFFIX, split_search_suffix,
};
