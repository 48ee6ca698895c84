//! Tokenizer for the tag-markup language embedded in documentation blocks
//!
//! The grammar is a small XML-shaped tag language without namespaces,
//! entities or DTDs:
//!
//!     <name attr="value">...</name>       element
//!     <name attr="value"/>                self-closing element
//!     <?name attr="value"?>               processing instruction
//!     <!-- text -->                       comment
//!     <![CDATA[ text ]]>                  character data
//!
//! Attribute values are double-quoted with no in-value escaping. A literal
//! `]]>` inside character data is written as `]]]]><![CDATA[>`.
//!
//! [`Scanner`] is the rune cursor the tokenizer is built on, and [`Parser`]
//! turns one [`Block`](crate::core::Block) into a lazy token sequence with
//! exact source ranges.

pub mod parser;
pub mod scanner;
pub mod token;

pub use parser::Parser;
pub use scanner::Scanner;
pub use token::{
    escape_cdata, Attribute, CData, Comment, EndElement, Instruction, StartElement, Text, Token,
};
