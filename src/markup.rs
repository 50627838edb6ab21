use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{VeltoError, VeltoResult};

/// The reserved root tag every velto document must contain.
pub const ROOT_TAG: &str = "velto";

/// Synthetic wrapper tag. Carries namespace declarations for the behavior
/// prefixes used in the source, since the dialect writes `on-click:alert`
/// style attribute names without declaring them.
const WRAPPER: &str = "_velto_wrap_";

/// URI scheme used for the injected declarations; encodes the original
/// prefix so attribute names can be reconstructed verbatim.
const PREFIX_URI: &str = "velto-prefix:";

/// A parsed velto markup node.
///
/// Produced by [`parse_markup`] and read-only afterwards; the conversion
/// engine consumes it by reference and the tree is dropped after one render
/// pass. Attributes keep their document order.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
    Comment(String),
}

impl MarkupNode {
    pub fn is_element(&self) -> bool {
        matches!(self, MarkupNode::Element { .. })
    }

    /// Tag name for element nodes, `None` for text/comment nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Finds the first element with the given tag, in document order,
    /// starting from this node itself.
    pub fn find_element(&self, tag_name: &str) -> Option<&MarkupNode> {
        match self {
            MarkupNode::Element { tag, children, .. } => {
                if tag == tag_name {
                    return Some(self);
                }
                children.iter().find_map(|c| c.find_element(tag_name))
            }
            _ => None,
        }
    }
}

fn prefixed_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Za-z][A-Za-z0-9_-]*):[A-Za-z][A-Za-z0-9_-]*\s*=").unwrap()
    })
}

/// Wrap the source in a synthetic root declaring every `prefix:` found in
/// it, so the namespace-aware parser accepts the dialect's attribute names.
fn wrap(source: &str) -> String {
    let prefixes: BTreeSet<&str> = prefixed_attr()
        .captures_iter(source)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|p| *p != "xmlns" && *p != "xml")
        .collect();

    let mut decls = String::new();
    for prefix in prefixes {
        decls.push_str(&format!(" xmlns:{prefix}=\"{PREFIX_URI}{prefix}\""));
    }
    format!("<{WRAPPER}{decls}>{source}</{WRAPPER}>")
}

/// Parse velto source text into an owned markup tree.
///
/// Returns the document's root element node. Malformed input yields a single
/// [`StructuralParse`](crate::VeltoError::StructuralParse) error — there are
/// no partial trees.
pub fn parse_markup(source: &str) -> VeltoResult<MarkupNode> {
    let wrapped = wrap(source);
    let doc = roxmltree::Document::parse(&wrapped)?;

    let mut elements = doc.root_element().children().filter(|n| n.is_element());
    let first = elements
        .next()
        .ok_or_else(|| VeltoError::StructuralParse("no elements in document".to_string()))?;
    if elements.next().is_some() {
        return Err(VeltoError::StructuralParse(
            "multiple root elements in document".to_string(),
        ));
    }

    Ok(build(first))
}

fn build(node: roxmltree::Node) -> MarkupNode {
    if node.is_text() {
        return MarkupNode::Text(node.text().unwrap_or_default().to_string());
    }
    if node.is_comment() {
        return MarkupNode::Comment(node.text().unwrap_or_default().to_string());
    }

    let attributes = node.attributes().map(attribute_pair).collect();

    let children = node
        .children()
        .filter(|c| c.is_element() || c.is_text() || c.is_comment())
        .map(build)
        .collect();

    MarkupNode::Element {
        tag: node.tag_name().name().to_string(),
        attributes,
        children,
    }
}

/// Reconstruct the verbatim attribute name: prefixes injected by [`wrap`]
/// are folded back into `prefix:local` form.
fn attribute_pair(attr: roxmltree::Attribute) -> (String, String) {
    let name = match attr.namespace().and_then(|uri| uri.strip_prefix(PREFIX_URI)) {
        Some(prefix) => format!("{prefix}:{}", attr.name()),
        None => attr.name().to_string(),
    };
    (name, attr.value().to_string())
}
