use std::sync::Arc;

use crate::behavior::BehaviorRegistry;
use crate::config::RenderConfig;
use crate::convert::convert;
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::{VeltoError, VeltoResult};
use crate::hooks::Hooks;
use crate::host::HostDocument;
use crate::loader::SourceLoader;
use crate::markup::{self, ROOT_TAG};
use crate::tags::TagRegistry;

/// One velto runtime: config, registries, hooks and the diagnostics sink,
/// bundled as an explicit value instead of process-wide state.
///
/// Construct once, configure, then pass by reference into renders. Multiple
/// independent runtimes can coexist in one process. Mutating a runtime while
/// one of its renders is in flight is a caller obligation to avoid; the
/// runtime takes no locks.
pub struct RuntimeContext {
    pub config: RenderConfig,
    pub tags: TagRegistry,
    pub behaviors: BehaviorRegistry,
    pub hooks: Hooks,
    pub sink: Arc<dyn DiagnosticsSink>,
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeContext {
    /// A runtime with the built-in tag table, built-in behaviors, default
    /// config and the tracing sink.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Same as [`new`](Self::new) with a custom diagnostics sink.
    pub fn with_sink(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            config: RenderConfig::default(),
            tags: TagRegistry::default(),
            behaviors: BehaviorRegistry::builtin(),
            hooks: Hooks::default(),
            sink,
        }
    }

    /// Render the document at `locator` into the host's mount point.
    ///
    /// Pipeline: retrieve source, parse it, locate the `<velto>` root, check
    /// the mount target, convert, swap. Every failure is reported through
    /// the diagnostics sink at error level and returned as the typed error;
    /// on failure the mount target's prior content is left untouched. On
    /// success the mount target's entire content is replaced.
    pub async fn render(
        &self,
        loader: &dyn SourceLoader,
        locator: &str,
        host: &mut HostDocument,
        mount_selector: &str,
    ) -> VeltoResult<()> {
        self.sink
            .info("Loading velto document", &[("locator", locator)]);

        let text = match loader.load(locator).await {
            Ok(text) => text,
            Err(err) => return self.fail(err),
        };

        let tree = match markup::parse_markup(&text) {
            Ok(tree) => tree,
            Err(err) => return self.fail(err),
        };

        let Some(root) = tree.find_element(ROOT_TAG) else {
            return self.fail(VeltoError::MissingRoot);
        };

        if !host.contains(mount_selector) {
            return self.fail(VeltoError::MissingMount {
                selector: mount_selector.to_string(),
            });
        }

        let dom = convert(self, root);
        host.mount(mount_selector, dom)?;

        self.sink.info("Render complete", &[("locator", locator)]);
        Ok(())
    }

    fn fail(&self, err: VeltoError) -> VeltoResult<()> {
        self.sink.error(&err.to_string(), &[]);
        Err(err)
    }
}
