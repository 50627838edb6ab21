use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{VeltoError, VeltoResult};

/// Source retrieval boundary.
///
/// Loading is the render pipeline's only suspension point; cancellation is
/// the caller's concern (drop the future).
#[async_trait]
pub trait SourceLoader: Send + Sync {
    async fn load(&self, locator: &str) -> VeltoResult<String>;
}

/// Loads velto documents from disk, relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileLoader {
    base: PathBuf,
}

impl FileLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl SourceLoader for FileLoader {
    async fn load(&self, locator: &str) -> VeltoResult<String> {
        tokio::fs::read_to_string(self.base.join(locator))
            .await
            .map_err(|e| VeltoError::Retrieval {
                locator: locator.to_string(),
                reason: e.to_string(),
            })
    }
}

/// In-memory loader for tests and embedded documents.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    sources: HashMap<String, String>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locator: &str, source: &str) {
        self.sources.insert(locator.to_string(), source.to_string());
    }
}

#[async_trait]
impl SourceLoader for StaticLoader {
    async fn load(&self, locator: &str) -> VeltoResult<String> {
        self.sources
            .get(locator)
            .cloned()
            .ok_or_else(|| VeltoError::Retrieval {
                locator: locator.to_string(),
                reason: "no such source".to_string(),
            })
    }
}
