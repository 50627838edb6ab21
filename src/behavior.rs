use std::sync::OnceLock;

use regex::Regex;

use crate::config::RenderConfig;
use crate::diagnostics::DiagnosticsSink;
use crate::error::{VeltoError, VeltoResult};
use crate::output::{EventKind, HostCommand, OutputElement};

/// Attribute-name namespace reserved for behaviors. Unmatched names under it
/// pass through without a warning.
pub const BEHAVIOR_NAMESPACE: &str = "on-";

pub type BehaviorFn = Box<dyn Fn(&mut OutputElement, &str) + Send + Sync>;

/// One (prefix, handler) pair of the behavior registry.
pub struct BehaviorEntry {
    pub prefix: String,
    handler: BehaviorFn,
}

/// How an attribute name relates to the behavior registry.
///
/// Classification is separated from the apply/warn effects so each is
/// testable on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrClass {
    /// Matched the entry at this registry index; the handler runs and the
    /// attribute is never set verbatim.
    Behavior(usize),
    /// Unmatched but inside the reserved namespace (`on-*` or containing
    /// `:`); passes through without a warning.
    ReservedPassthrough,
    /// Unmatched plain name; passes through, warning when enabled.
    PlainPassthrough,
}

fn prefix_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z]+(-[a-z]+)*(:[a-z]+(-[a-z]+)*)?$").unwrap()
    })
}

/// Ordered collection of behavior entries.
///
/// Matching is literal string-prefix, first-match-wins, so registry order is
/// a public contract: a broader prefix registered earlier swallows every
/// more specific one registered after it. Entries should use the longest
/// distinguishing prefix needed.
#[derive(Default)]
pub struct BehaviorRegistry {
    entries: Vec<BehaviorEntry>,
}

impl BehaviorRegistry {
    /// An empty registry with no built-in behaviors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in behavior set, in its documented order.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.push("on-click:redirect", Box::new(redirect_behavior));
        registry.push("on-click:alert", Box::new(alert_behavior));
        registry.push("on-click:log", Box::new(log_behavior));
        registry.push("on-click:toggle", Box::new(toggle_behavior));
        registry.push("on-input:log", Box::new(input_log_behavior));
        registry
    }

    fn push(&mut self, prefix: &str, handler: BehaviorFn) {
        self.entries.push(BehaviorEntry {
            prefix: prefix.to_string(),
            handler,
        });
    }

    /// Append a behavior entry. Configuration-time only; the prefix must be
    /// lowercase words with optional `-event` and `:action` parts.
    pub fn register(&mut self, prefix: &str, handler: BehaviorFn) -> VeltoResult<()> {
        if !prefix_shape().is_match(prefix) {
            return Err(VeltoError::InvalidBehaviorPrefix {
                prefix: prefix.to_string(),
            });
        }
        self.push(prefix, handler);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.prefix.as_str())
    }

    /// Classify an attribute name against the registry, without side effects.
    pub fn classify(&self, name: &str) -> AttrClass {
        if let Some(index) = self
            .entries
            .iter()
            .position(|e| name.starts_with(&e.prefix))
        {
            return AttrClass::Behavior(index);
        }
        if name.starts_with(BEHAVIOR_NAMESPACE) || name.contains(':') {
            AttrClass::ReservedPassthrough
        } else {
            AttrClass::PlainPassthrough
        }
    }

    /// Apply one attribute to an element: run the first matching behavior
    /// handler, or pass the attribute through verbatim.
    pub fn apply(
        &self,
        config: &RenderConfig,
        sink: &dyn DiagnosticsSink,
        element: &mut OutputElement,
        name: &str,
        value: &str,
    ) {
        match self.classify(name) {
            AttrClass::Behavior(index) => {
                (self.entries[index].handler)(element, value);
            }
            AttrClass::ReservedPassthrough => {
                element.set_attribute(name, value);
            }
            AttrClass::PlainPassthrough => {
                if config.warn_unknown_attributes {
                    sink.warn(
                        &format!("Unknown attribute '{name}' passed through"),
                        &[("attribute", name)],
                    );
                }
                element.set_attribute(name, value);
            }
        }
    }
}

// ─── Built-in behaviors ─────────────────────────────────────────────────────

fn redirect_behavior(element: &mut OutputElement, value: &str) {
    element.mark_interactive();
    let url = value.to_string();
    element.on(EventKind::Click, move |_| {
        vec![HostCommand::Navigate(url.clone())]
    });
}

fn alert_behavior(element: &mut OutputElement, value: &str) {
    element.mark_interactive();
    let message = value.to_string();
    element.on(EventKind::Click, move |_| {
        vec![HostCommand::Alert(message.clone())]
    });
}

fn log_behavior(element: &mut OutputElement, value: &str) {
    element.mark_interactive();
    let message = value.to_string();
    element.on(EventKind::Click, move |_| {
        vec![HostCommand::Log {
            label: "click".to_string(),
            message: message.clone(),
        }]
    });
}

fn toggle_behavior(element: &mut OutputElement, value: &str) {
    element.mark_interactive();
    let selector = value.to_string();
    element.on(EventKind::Click, move |_| {
        vec![HostCommand::ToggleVisibility(selector.clone())]
    });
}

fn input_log_behavior(element: &mut OutputElement, value: &str) {
    let label = value.to_string();
    element.on(EventKind::Input, move |ctx| {
        vec![HostCommand::Log {
            label: label.clone(),
            message: ctx.value.clone().unwrap_or_default(),
        }]
    });
}
