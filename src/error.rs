use thiserror::Error;

pub type VeltoResult<T> = Result<T, VeltoError>;

/// Terminal render failures.
///
/// Unknown tags and unknown attributes are advisory only — they go through
/// the diagnostics sink as warnings and never abort a render.
#[derive(Error, Debug, Clone)]
pub enum VeltoError {
    #[error("Failed to retrieve velto source '{locator}': {reason}")]
    Retrieval { locator: String, reason: String },

    #[error("Structural parse error in velto markup: {0}")]
    StructuralParse(String),

    #[error("No <velto> root element found in the document")]
    MissingRoot,

    #[error("Mount point '{selector}' not found in the host document")]
    MissingMount { selector: String },

    #[error("Invalid behavior prefix '{prefix}': must be lowercase words with optional '-event' and ':action' parts")]
    InvalidBehaviorPrefix { prefix: String },

    #[error("Invalid runtime config: {0}")]
    Config(String),
}

impl From<roxmltree::Error> for VeltoError {
    fn from(err: roxmltree::Error) -> Self {
        VeltoError::StructuralParse(err.to_string())
    }
}

impl From<serde_yaml::Error> for VeltoError {
    fn from(err: serde_yaml::Error) -> Self {
        VeltoError::Config(err.to_string())
    }
}
