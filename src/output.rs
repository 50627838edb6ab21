use std::fmt;

/// Events an [`OutputElement`] listener can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Input,
}

/// Payload passed to listeners when an event is dispatched.
///
/// `value` carries the element's current value for input events and is
/// `None` for clicks.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    pub value: Option<String>,
}

/// Side effects a listener asks the host document to perform.
///
/// Listeners never touch the tree they live in; they return commands and the
/// host applies them after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Navigate the host context to the given location.
    Navigate(String),
    /// Surface a message on the host's user-facing alert channel.
    Alert(String),
    /// Report a labeled message through the diagnostics sink.
    Log { label: String, message: String },
    /// Invert the visibility of the first element matching the selector.
    /// Silent no-op when nothing matches.
    ToggleVisibility(String),
}

pub type ListenerFn = Box<dyn Fn(&EventContext) -> Vec<HostCommand> + Send + Sync>;

/// A node of the materialized output tree.
pub enum OutputNode {
    Element(OutputElement),
    Text(String),
    Comment(String),
}

/// A concrete element produced by the conversion engine.
///
/// Created fresh on every render; never reused across renders. Listeners are
/// bound once at conversion time and torn down implicitly when the subtree
/// is discarded by the next full rebuild.
pub struct OutputElement {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<OutputNode>,
    pub visible: bool,
    /// Pointer-interactive affordance, marked at bind time by click behaviors.
    pub interactive: bool,
    listeners: Vec<(EventKind, ListenerFn)>,
}

impl OutputElement {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            visible: true,
            interactive: false,
            listeners: Vec::new(),
        }
    }

    /// Set an attribute verbatim, replacing any existing value for the name.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.attributes.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            self.attributes.push((name.to_string(), value.to_string()));
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn mark_interactive(&mut self) {
        self.interactive = true;
    }

    /// Bind a listener for the given event kind.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&EventContext) -> Vec<HostCommand> + Send + Sync + 'static,
    {
        self.listeners.push((kind, Box::new(listener)));
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Fire all listeners bound to `kind`, in binding order, collecting the
    /// commands they produce.
    pub fn fire(&self, kind: EventKind, ctx: &EventContext) -> Vec<HostCommand> {
        self.listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .flat_map(|(_, listener)| listener(ctx))
            .collect()
    }

    /// Structural equality: kind, attributes, visibility, interactivity and
    /// children, ignoring listeners.
    pub fn same_shape(&self, other: &OutputElement) -> bool {
        self.kind == other.kind
            && self.attributes == other.attributes
            && self.visible == other.visible
            && self.interactive == other.interactive
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(f, "{pad}<{}", self.kind)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{value}\"")?;
        }
        if !self.visible {
            write!(f, " (hidden)")?;
        }
        if self.interactive {
            write!(f, " (interactive)")?;
        }
        if self.children.is_empty() {
            return writeln!(f, " />");
        }
        writeln!(f, ">")?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        writeln!(f, "{pad}</{}>", self.kind)
    }
}

impl OutputNode {
    pub fn as_element(&self) -> Option<&OutputElement> {
        match self {
            OutputNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, OutputNode::Comment(_))
    }

    pub fn same_shape(&self, other: &OutputNode) -> bool {
        match (self, other) {
            (OutputNode::Text(a), OutputNode::Text(b)) => a == b,
            (OutputNode::Comment(a), OutputNode::Comment(b)) => a == b,
            (OutputNode::Element(a), OutputNode::Element(b)) => a.same_shape(b),
            _ => false,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            OutputNode::Element(el) => el.write_indented(f, depth),
            OutputNode::Text(text) => {
                if text.trim().is_empty() {
                    Ok(())
                } else {
                    writeln!(f, "{pad}{:?}", text)
                }
            }
            OutputNode::Comment(text) => writeln!(f, "{pad}<!--{text}-->"),
        }
    }
}

impl fmt::Debug for OutputElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputElement")
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("visible", &self.visible)
            .field("interactive", &self.interactive)
            .field("children", &self.children)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl fmt::Debug for OutputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputNode::Element(el) => el.fmt(f),
            OutputNode::Text(text) => f.debug_tuple("Text").field(text).finish(),
            OutputNode::Comment(text) => f.debug_tuple("Comment").field(text).finish(),
        }
    }
}

impl fmt::Display for OutputElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl fmt::Display for OutputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
