use serde::{Deserialize, Serialize};

use crate::error::VeltoResult;

/// Render-time switches, read by the conversion engine on every node and
/// attribute decision.
///
/// Set once before a render and treated as immutable while one is in flight;
/// the runtime does not guard against concurrent mutation (caller obligation,
/// expected usage is single-document, single-render-at-a-time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Reserved for future strict tag/attribute enforcement. Currently inert.
    pub strict_mode: bool,
    pub warn_unknown_tags: bool,
    pub warn_unknown_attributes: bool,
    pub allow_comments: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            warn_unknown_tags: true,
            warn_unknown_attributes: true,
            allow_comments: true,
        }
    }
}

impl RenderConfig {
    /// Load a config from YAML. Missing keys keep their defaults.
    pub fn from_yaml(source: &str) -> VeltoResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }
}
