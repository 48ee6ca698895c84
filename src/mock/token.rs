//! Token definitions for JSON payloads
//!
//! The tokens are defined with the logos derive macro. The validator runs a
//! well-formedness pre-check before lexing, so the token walk can assume
//! structural sanity and treat `:` and `,` as separators only.

use logos::Logos;

/// All tokens of a JSON payload.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum JsonToken {
    #[token("{")]
    ObjectStart,

    #[token("}")]
    ObjectEnd,

    #[token("[")]
    ArrayStart,

    #[token("]")]
    ArrayEnd,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // Quoted string, escapes left to the consumer
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,

    #[regex(r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?")]
    Number,
}
