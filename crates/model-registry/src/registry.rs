//! Forward/reverse model tables and the advertised model list
//!
//! All tables are built once from an ordered catalog and never mutated. The
//! advertised list depends on the elevated-subscription flag, so a registry
//! must be built after configuration has been loaded.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::info;

use crate::catalog::{CATALOG, ELEVATED_ONLY};

/// Suffix that marks the search-augmented variant of a model.
pub const SEARCH_SUFFIX: &str = "-search";

/// One entry of the model listing served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
}

/// Upstream model chosen for a client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub upstream: String,
    pub search: bool,
}

/// Split a requested name into its base model and whether the `-search`
/// variant was asked for.
pub fn split_search_suffix(name: &str) -> (&str, bool) {
    match name.strip_suffix(SEARCH_SUFFIX) {
        Some(base) if !base.is_empty() => (base, true),
        _ => (name, false),
    }
}

/// Read-only model translation tables.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    advertised: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Build from the built-in catalog.
    pub fn new(elevated: bool) -> Self {
        Self::from_catalog(CATALOG, ELEVATED_ONLY, elevated)
    }

    /// Build from an arbitrary ordered catalog.
    ///
    /// Entries are processed in slice order. If two public names share an
    /// internal identifier, the reverse table keeps the later one; if a public
    /// name repeats, the later mapping wins but the name is advertised once,
    /// at its first position.
    pub fn from_catalog(entries: &[(&str, &str)], elevated_only: &[&str], elevated: bool) -> Self {
        let mut forward = HashMap::with_capacity(entries.len());
        let mut reverse = HashMap::with_capacity(entries.len());
        let mut order = Vec::with_capacity(entries.len());

        for (public, internal) in entries {
            if forward
                .insert((*public).to_string(), (*internal).to_string())
                .is_none()
            {
                order.push(*public);
            }
            reverse.insert((*internal).to_string(), (*public).to_string());
        }

        let gated: HashSet<&str> = elevated_only.iter().copied().collect();
        let advertised: Vec<ModelDescriptor> = order
            .into_iter()
            .filter(|name| elevated || !gated.contains(name))
            .flat_map(|name| {
                [
                    ModelDescriptor {
                        id: name.to_string(),
                    },
                    ModelDescriptor {
                        id: format!("{name}{SEARCH_SUFFIX}"),
                    },
                ]
            })
            .collect();

        info!(
            models = forward.len(),
            advertised = advertised.len(),
            elevated,
            "model registry built"
        );

        Self {
            forward,
            reverse,
            advertised,
        }
    }

    /// Upstream identifier for `public`, or `fallback` when unknown.
    pub fn resolve_upstream<'a>(&'a self, public: &str, fallback: &'a str) -> &'a str {
        self.forward.get(public).map_or(fallback, String::as_str)
    }

    /// Public name for `internal`, or `fallback` when unknown.
    pub fn resolve_public<'a>(&'a self, internal: &str, fallback: &'a str) -> &'a str {
        self.reverse.get(internal).map_or(fallback, String::as_str)
    }

    /// Resolve a name as sent by a client, honouring the `-search` suffix.
    ///
    /// Unknown base names are passed upstream verbatim.
    pub fn resolve_request(&self, requested: &str) -> ResolvedRequest {
        let (base, search) = split_search_suffix(requested);
        ResolvedRequest {
            upstream: self.resolve_upstream(base, base).to_string(),
            search,
        }
    }

    /// Models advertised to clients, base and `-search` variant for each, in
    /// catalog order.
    pub fn advertised_models(&self) -> &[ModelDescriptor] {
        &self.advertised
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &ModelRegistry) -> Vec<&str> {
        registry
            .advertised_models()
            .iter()
            .map(|m| m.id.as_str())
            .collect()
    }

    #[test]
    fn forward_lookup_and_fallback() {
        let registry = ModelRegistry::new(false);
        assert_eq!(registry.resolve_upstream("gpt-4o", "x"), "gpt4o");
        assert_eq!(registry.resolve_upstream("o4-pro", "x"), "o4mini");
        assert_eq!(registry.resolve_upstream("no-such-model", "fallback"), "fallback");
    }

    #[test]
    fn reverse_lookup_and_fallback() {
        let registry = ModelRegistry::new(false);
        assert_eq!(registry.resolve_public("claude45opus", ""), "claude-4.5-opus");
        assert_eq!(registry.resolve_public("mystery", "turbo"), "turbo");
    }

    #[test]
    fn every_catalog_name_round_trips() {
        let registry = ModelRegistry::new(true);
        for (public, _) in CATALOG {
            let internal = registry.resolve_upstream(public, "");
            assert_eq!(registry.resolve_public(internal, ""), *public);
        }
    }

    #[test]
    fn reverse_collision_keeps_later_entry() {
        let registry = ModelRegistry::from_catalog(
            &[("first", "shared"), ("second", "shared")],
            &[],
            false,
        );
        assert_eq!(registry.resolve_upstream("first", ""), "shared");
        assert_eq!(registry.resolve_public("shared", ""), "second");
    }

    #[test]
    fn repeated_public_name_advertised_once() {
        let registry =
            ModelRegistry::from_catalog(&[("m", "old"), ("n", "n1"), ("m", "new")], &[], false);
        assert_eq!(registry.resolve_upstream("m", ""), "new");
        assert_eq!(ids(&registry), vec!["m", "m-search", "n", "n-search"]);
    }

    #[test]
    fn elevated_models_hidden_without_flag() {
        let registry = ModelRegistry::new(false);
        let advertised = ids(&registry);
        for name in ELEVATED_ONLY {
            assert!(!advertised.contains(name), "{name} advertised");
            let search = format!("{name}{SEARCH_SUFFIX}");
            assert!(!advertised.contains(&search.as_str()), "{search} advertised");
        }
        assert_eq!(advertised.len(), (CATALOG.len() - ELEVATED_ONLY.len()) * 2);
    }

    #[test]
    fn elevated_models_hidden_only_from_listing() {
        let registry = ModelRegistry::new(false);
        assert_eq!(registry.resolve_upstream("o3-pro", ""), "o3pro");
    }

    #[test]
    fn elevated_flag_advertises_every_name_exactly_once() {
        let registry = ModelRegistry::new(true);
        let advertised = ids(&registry);
        assert_eq!(advertised.len(), CATALOG.len() * 2);
        for (public, _) in CATALOG {
            let search = format!("{public}{SEARCH_SUFFIX}");
            assert_eq!(advertised.iter().filter(|id| *id == public).count(), 1);
            assert_eq!(advertised.iter().filter(|id| **id == search).count(), 1);
        }
    }

    #[test]
    fn advertised_order_follows_catalog() {
        let registry = ModelRegistry::new(true);
        let advertised = ids(&registry);
        assert_eq!(
            &advertised[..4],
            &[
                "claude-4-sonnet",
                "claude-4-sonnet-search",
                "claude-4-sonnet-think",
                "claude-4-sonnet-think-search",
            ]
        );

        let rebuilt = ModelRegistry::new(true);
        assert_eq!(advertised, ids(&rebuilt));
    }

    #[test]
    fn split_search_suffix_cases() {
        assert_eq!(split_search_suffix("gpt-4o-search"), ("gpt-4o", true));
        assert_eq!(split_search_suffix("gpt-4o"), ("gpt-4o", false));
        assert_eq!(split_search_suffix("-search"), ("-search", false));
    }

    #[test]
    fn resolve_request_maps_base_and_flags_search() {
        let registry = ModelRegistry::new(false);
        assert_eq!(
            registry.resolve_request("claude-4.5-opus-search"),
            ResolvedRequest {
                upstream: "claude45opus".into(),
                search: true,
            }
        );
        assert_eq!(
            registry.resolve_request("custom-model"),
            ResolvedRequest {
                upstream: "custom-model".into(),
                search: false,
            }
        );
    }

    #[test]
    fn descriptor_serializes_as_id_object() {
        let json = serde_json::to_value(ModelDescriptor { id: "r1".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "r1" }));
    }
}
