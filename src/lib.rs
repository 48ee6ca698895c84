//! # tagdoc
//!
//! Compiler for machine-checkable API documentation embedded as tagged
//! comment blocks in arbitrary source code.
//!
//! A block-discovery collaborator hands over raw text regions; the
//! [`markup`] tokenizer turns each into a token stream with byte-accurate
//! source positions, the [`codec`] decodes tokens into the typed [`schema`]
//! entities while validating cross-field invariants, and the validated
//! [`document`] tree feeds downstream renderers. The [`mock`] engine reuses
//! the same schema to validate and fabricate JSON payloads.

pub mod codec;
pub mod core;
pub mod document;
pub mod markup;
pub mod mock;
pub mod schema;

pub use crate::core::{
    Block, ErrorKind, FormatError, Location, ParseError, Position, Range, SyntaxError,
    ValidationError,
};
pub use crate::document::{decode_block, parse, CancelToken, Document, Entry};
pub use crate::schema::{Callback, Description, Enum, Example, Param, Request, Semver, Status, Type};
