use std::collections::HashMap;

use crate::config::RenderConfig;
use crate::diagnostics::DiagnosticsSink;

/// Element kind unknown tags fall back to.
pub const DEFAULT_KIND: &str = "div";

/// Mapping from velto tag names to concrete element kinds.
///
/// Lookups are total: unmapped tags resolve to [`DEFAULT_KIND`]. The table
/// belongs to a [`RuntimeContext`](crate::RuntimeContext) and is meant to be
/// filled at configuration time, never during a render.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    map: HashMap<String, String>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        let mut registry = Self { map: HashMap::new() };
        for (tag, kind) in [
            ("velto", "div"),
            ("content", "div"),
            ("text1", "p"),
            ("text2", "p"),
            ("button", "button"),
            ("image", "img"),
        ] {
            registry.insert(tag, kind);
        }
        registry
    }
}

impl TagRegistry {
    /// An empty registry with no built-in tags.
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Add or replace a tag mapping. Configuration-time only.
    pub fn insert(&mut self, tag: &str, kind: &str) {
        self.map.insert(tag.to_string(), kind.to_string());
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.map.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.map.contains_key(tag)
    }

    /// Resolve a tag to its element kind. Total: unknown tags fall back to
    /// [`DEFAULT_KIND`], emitting one warning when `warn_unknown_tags` is set.
    /// Tag names are matched verbatim (case-sensitive).
    pub fn resolve(&self, tag: &str, config: &RenderConfig, sink: &dyn DiagnosticsSink) -> &str {
        match self.get(tag) {
            Some(kind) => kind,
            None => {
                if config.warn_unknown_tags {
                    sink.warn(
                        &format!("Unknown velto tag <{tag}>, rendering as <{DEFAULT_KIND}>"),
                        &[("tag", tag), ("fallback", DEFAULT_KIND)],
                    );
                }
                DEFAULT_KIND
            }
        }
    }
}
