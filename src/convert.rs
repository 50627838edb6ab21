use crate::markup::MarkupNode;
use crate::output::{OutputElement, OutputNode};
use crate::runtime::RuntimeContext;

/// Convert one markup node into an output node.
///
/// Recursive and depth-first. Attributes are applied before children are
/// appended, so behavior handlers bind against an attribute-complete,
/// child-empty element. Child order is preserved. Total: conversion never
/// fails — unknown tags and attributes degrade per the registries.
pub fn convert(ctx: &RuntimeContext, node: &MarkupNode) -> OutputNode {
    match node {
        MarkupNode::Text(text) => OutputNode::Text(text.clone()),

        // Suppressed comments are replaced with an empty text placeholder
        // rather than dropped, keeping child indexes stable.
        MarkupNode::Comment(text) => {
            if ctx.config.allow_comments {
                OutputNode::Comment(text.clone())
            } else {
                OutputNode::Text(String::new())
            }
        }

        MarkupNode::Element {
            tag,
            attributes,
            children,
        } => {
            let kind = ctx.tags.resolve(tag, &ctx.config, ctx.sink.as_ref());
            let mut element = OutputElement::new(kind);

            for (name, value) in attributes {
                ctx.behaviors
                    .apply(&ctx.config, ctx.sink.as_ref(), &mut element, name, value);
            }

            for child in children {
                element.children.push(convert(ctx, child));
            }

            OutputNode::Element(element)
        }
    }
}
