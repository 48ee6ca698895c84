//! Generic structural codec between token streams and typed entities
//!
//! Each entity declares an explicit schema descriptor: ordered attribute
//! bindings, child-element bindings, and at most one text/CData content
//! binding. One generic walker interprets the descriptors in both
//! directions, so there is a single decode implementation and a single
//! encode implementation with no runtime type inspection.
//!
//! Decoding runs in two phases per entity: generic field mapping driven by
//! the descriptors, then the entity's own [`validate`](Node::validate)
//! predicate, which can reject a structurally well-formed element and
//! reports the dotted/bracketed field path of the violation.

pub mod decode;
pub mod encode;

pub use decode::{Decoder, ValidateContext};
pub use encode::{encode, to_element, Body, Element};

use crate::core::{ErrorKind, ParseError, Spanned, ValidationError};

/// Binding for one `name="value"` attribute.
pub struct AttrField<N> {
    pub name: &'static str,
    /// Parse the attribute text into the node; an [`ErrorKind`] is located
    /// at the attribute by the walker.
    pub apply: fn(&mut N, &str) -> Result<(), ErrorKind>,
    /// Render the field back to attribute text; `None` omits the attribute.
    pub render: fn(&N) -> Option<String>,
}

/// Binding for one child element tag.
pub struct ChildField<N> {
    pub name: &'static str,
    pub decode: fn(&mut N, &mut Decoder<'_>, crate::markup::StartElement) -> Result<(), ParseError>,
    /// Append the field's elements; repeated sub-entities become siblings
    /// with the same tag.
    pub encode: fn(&N, &mut Vec<Element>),
}

/// Binding for the single text or CData payload of an element. Mutually
/// exclusive with child elements when encoding.
pub struct ContentField<N> {
    pub kind: ContentKind,
    pub apply: fn(&mut N, Spanned<String>),
    pub render: fn(&N) -> Option<String>,
}

impl<N> Clone for ContentField<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for ContentField<N> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    CData,
}

/// A decodable, encodable entity.
pub trait Node: Default + 'static {
    /// Canonical element tag used when encoding.
    const TAG: &'static str;
    const ATTRIBUTES: &'static [AttrField<Self>];
    const CHILDREN: &'static [ChildField<Self>];
    const CONTENT: Option<ContentField<Self>>;

    /// Entity-specific invariants, checked after generic mapping.
    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError>;

    /// Record the source range of the element this node was decoded from.
    fn set_location(&mut self, _range: crate::core::Range) {}
}

/// `Some` for a non-empty string, used by omit-when-empty attribute fields.
pub fn some_nonempty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse a boolean attribute value.
pub fn parse_bool(value: &str) -> Result<bool, ErrorKind> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ErrorKind::InvalidFormat),
    }
}

/// Render a flag attribute, omitted when unset.
pub fn render_flag(value: bool) -> Option<String> {
    value.then(|| "true".to_string())
}
