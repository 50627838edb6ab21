//! # Velto Runtime
//!
//! A micro-templating runtime for the velto markup dialect: an XML-based
//! vocabulary of semantic tags mapped onto concrete element kinds, with
//! declarative interaction behaviors attached through attribute naming
//! conventions.
//!
//! ## Features
//! - Tag registry mapping semantic tags to element kinds, total with a
//!   generic-container fallback
//! - Ordered, first-match-wins behavior registry dispatched by attribute
//!   name prefix
//! - Recursive conversion engine preserving document order
//! - Async source loading, in-memory host document, leveled diagnostics
//!
//! ## Example
//! ```ignore
//! use std::sync::Arc;
//! use velto::{HostDocument, RuntimeContext, StaticLoader, TracingSink};
//!
//! let mut loader = StaticLoader::new();
//! loader.insert("hello.velto", r#"<velto><text1>Hi</text1></velto>"#);
//!
//! let ctx = RuntimeContext::new();
//! let mut host = HostDocument::with_mount(Arc::new(TracingSink), "app");
//! ctx.render(&loader, "hello.velto", &mut host, "#app").await?;
//! ```

pub mod behavior;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod hooks;
pub mod host;
pub mod loader;
pub mod markup;
pub mod output;
pub mod runtime;
pub mod tags;

// --- Core types ---
pub use behavior::{AttrClass, BehaviorFn, BehaviorRegistry, BEHAVIOR_NAMESPACE};
pub use config::RenderConfig;
pub use convert::convert;
pub use diagnostics::{Diagnostic, DiagnosticsSink, Level, MemorySink, TracingSink};
pub use error::{VeltoError, VeltoResult};
pub use hooks::{HookPoint, Hooks};
pub use host::HostDocument;
pub use loader::{FileLoader, SourceLoader, StaticLoader};
pub use markup::{MarkupNode, ROOT_TAG};
pub use output::{EventContext, EventKind, HostCommand, OutputElement, OutputNode};
pub use runtime::RuntimeContext;
pub use tags::{TagRegistry, DEFAULT_KIND};

/// Parse velto source text into a markup tree without rendering it.
pub fn parse_markup(source: &str) -> VeltoResult<MarkupNode> {
    markup::parse_markup(source)
}
