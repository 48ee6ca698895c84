//! The generic encode walker
//!
//! [`to_element`] renders a [`Node`] through its descriptors into an
//! [`Element`] tree, and [`encode`] serializes that tree back to markup
//! text. Attributes whose render half returns `None` are omitted; a content
//! payload and child elements are mutually exclusive.

use super::{ContentKind, Node};
use crate::markup::escape_cdata;

/// One element ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Text(String),
    CData(String),
    Children(Vec<Element>),
}

/// Walk `node`'s descriptors into an [`Element`].
pub fn to_element<N: Node>(node: &N) -> Element {
    let mut attributes = Vec::new();
    for field in N::ATTRIBUTES {
        if let Some(value) = (field.render)(node) {
            attributes.push((field.name.to_string(), value));
        }
    }

    let mut body = Body::Empty;
    if let Some(content) = N::CONTENT {
        if let Some(text) = (content.render)(node) {
            body = match content.kind {
                ContentKind::Text => Body::Text(text),
                ContentKind::CData => Body::CData(text),
            };
        }
    }
    if matches!(body, Body::Empty) {
        let mut children = Vec::new();
        for field in N::CHILDREN {
            (field.encode)(node, &mut children);
        }
        if !children.is_empty() {
            body = Body::Children(children);
        }
    }

    Element {
        name: N::TAG.to_string(),
        attributes,
        body,
    }
}

/// Serialize an element tree, one element per line, children indented by
/// one `indent` unit per level.
pub fn encode(element: &Element, indent: &str) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0, indent);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize, indent: &str) {
    for _ in 0..depth {
        out.push_str(indent);
    }
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }

    match &element.body {
        Body::Empty => out.push_str("/>"),
        Body::Text(text) => {
            out.push('>');
            out.push_str(text);
            close_tag(out, &element.name);
        }
        Body::CData(text) => {
            out.push_str("><![CDATA[");
            out.push_str(&escape_cdata(text));
            out.push_str("]]>");
            close_tag(out, &element.name);
        }
        Body::Children(children) => {
            out.push('>');
            for child in children {
                out.push('\n');
                write_element(out, child, depth + 1, indent);
            }
            out.push('\n');
            for _ in 0..depth {
                out.push_str(indent);
            }
            close_tag(out, &element.name);
        }
    }
}

fn close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
