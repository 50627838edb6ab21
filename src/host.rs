use std::sync::Arc;

use crate::diagnostics::DiagnosticsSink;
use crate::error::{VeltoError, VeltoResult};
use crate::output::{EventContext, EventKind, HostCommand, OutputElement, OutputNode};

/// Minimal selector grammar: `#id`, `.class`, or a bare element kind.
#[derive(Debug, Clone, PartialEq)]
enum Selector {
    Id(String),
    Class(String),
    Kind(String),
}

impl Selector {
    fn parse(raw: &str) -> Self {
        if let Some(id) = raw.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some(class) = raw.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else {
            Selector::Kind(raw.to_string())
        }
    }

    fn matches(&self, element: &OutputElement) -> bool {
        match self {
            Selector::Id(id) => element.attribute("id") == Some(id.as_str()),
            Selector::Class(class) => element
                .attribute("class")
                .map(|c| c.split_whitespace().any(|part| part == class))
                .unwrap_or(false),
            Selector::Kind(kind) => element.kind == *kind,
        }
    }
}

/// The host document a render mounts into.
///
/// Owns a body tree of output elements plus the observable host context the
/// built-in behaviors act on: a navigation target and an alert channel.
pub struct HostDocument {
    body: OutputElement,
    /// Where the host last navigated to, if anywhere.
    pub location: Option<String>,
    /// Messages surfaced on the user-facing alert channel.
    pub alerts: Vec<String>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl HostDocument {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            body: OutputElement::new("body"),
            location: None,
            alerts: Vec::new(),
            sink,
        }
    }

    /// A host document whose body contains one empty mount element with the
    /// given id.
    pub fn with_mount(sink: Arc<dyn DiagnosticsSink>, mount_id: &str) -> Self {
        let mut host = Self::new(sink);
        host.add_mount(mount_id);
        host
    }

    /// Append an empty mount element with the given id to the body.
    pub fn add_mount(&mut self, mount_id: &str) {
        let mut mount = OutputElement::new("div");
        mount.set_attribute("id", mount_id);
        self.body.children.push(OutputNode::Element(mount));
    }

    pub fn body(&self) -> &OutputElement {
        &self.body
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// First element matching the selector, depth-first from the body.
    pub fn query(&self, selector: &str) -> Option<&OutputElement> {
        find(&self.body, &Selector::parse(selector))
    }

    pub fn query_mut(&mut self, selector: &str) -> Option<&mut OutputElement> {
        find_mut(&mut self.body, &Selector::parse(selector))
    }

    /// Replace the mount target's entire content with the given tree.
    ///
    /// Nothing is mutated when the selector resolves to no element.
    pub fn mount(&mut self, selector: &str, node: OutputNode) -> VeltoResult<()> {
        let target = self
            .query_mut(selector)
            .ok_or_else(|| VeltoError::MissingMount {
                selector: selector.to_string(),
            })?;
        target.children.clear();
        target.children.push(node);
        Ok(())
    }

    /// Dispatch a click to the first element matching the selector.
    /// Returns false when nothing matches.
    pub fn click(&mut self, selector: &str) -> bool {
        self.dispatch(selector, EventKind::Click, None)
    }

    /// Dispatch an input-change event: updates the element's `value`
    /// attribute, then fires its input listeners.
    pub fn input(&mut self, selector: &str, value: &str) -> bool {
        self.dispatch(selector, EventKind::Input, Some(value.to_string()))
    }

    fn dispatch(&mut self, selector: &str, kind: EventKind, value: Option<String>) -> bool {
        let commands = {
            let Some(element) = self.query_mut(selector) else {
                return false;
            };
            if kind == EventKind::Input {
                if let Some(value) = &value {
                    element.set_attribute("value", value);
                }
            }
            element.fire(kind, &EventContext { value })
        };
        for command in commands {
            self.apply(command);
        }
        true
    }

    fn apply(&mut self, command: HostCommand) {
        match command {
            HostCommand::Navigate(url) => {
                self.location = Some(url);
            }
            HostCommand::Alert(message) => {
                self.alerts.push(message);
            }
            HostCommand::Log { label, message } => {
                self.sink.info(&message, &[("label", &label)]);
            }
            HostCommand::ToggleVisibility(selector) => {
                if let Some(element) = self.query_mut(&selector) {
                    element.visible = !element.visible;
                }
            }
        }
    }
}

fn find<'a>(element: &'a OutputElement, selector: &Selector) -> Option<&'a OutputElement> {
    if selector.matches(element) {
        return Some(element);
    }
    element
        .children
        .iter()
        .filter_map(OutputNode::as_element)
        .find_map(|child| find(child, selector))
}

fn find_mut<'a>(
    element: &'a mut OutputElement,
    selector: &Selector,
) -> Option<&'a mut OutputElement> {
    if selector.matches(element) {
        return Some(element);
    }
    for child in &mut element.children {
        if let OutputNode::Element(child) = child {
            if let Some(found) = find_mut(child, selector) {
                return Some(found);
            }
        }
    }
    None
}
