//! Error types for decoding and conformance checking
//!
//! Three families, never bare strings:
//!
//! - [`SyntaxError`]: malformed markup, always carries an exact source
//!   location. Recoverable at block granularity.
//! - [`ValidationError`]: well-formed markup that violates the schema,
//!   located by field path.
//! - [`FormatError`]: a JSON payload that does not conform to a schema,
//!   located by field path only since JSON owns its own byte positions.
//!
//! Every error names a machine-readable [`ErrorKind`] so callers can match
//! or localize without parsing message text.

use super::block::Location;
use serde::Serialize;
use std::fmt;

/// Machine-readable error keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// A required field or child element is missing.
    Required,
    /// A value does not match its lexical grammar.
    InvalidFormat,
    /// A value is well-formed but not allowed here.
    InvalidValue,
    /// Two sibling values share a key that must be unique.
    DuplicateValue,
    /// A construct was opened but its terminator never appeared.
    NotFoundEndTag,
    /// The markup itself is malformed.
    InvalidMarkup,
    /// A name does not resolve against the schema.
    NotFound,
}

impl ErrorKind {
    /// Stable key for matching and message-catalog lookup.
    pub fn key(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidFormat => "invalid-format",
            ErrorKind::InvalidValue => "invalid-value",
            ErrorKind::DuplicateValue => "duplicate-value",
            ErrorKind::NotFoundEndTag => "not-found-end-tag",
            ErrorKind::InvalidMarkup => "invalid-markup",
            ErrorKind::NotFound => "not-found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorKind::Required => "required value is missing",
            ErrorKind::InvalidFormat => "invalid format",
            ErrorKind::InvalidValue => "invalid value",
            ErrorKind::DuplicateValue => "duplicate value",
            ErrorKind::NotFoundEndTag => "end tag not found",
            ErrorKind::InvalidMarkup => "invalid markup",
            ErrorKind::NotFound => "not found",
        };
        f.write_str(msg)
    }
}

/// Malformed markup, located at an exact source range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxError {
    pub location: Location,
    /// Field path or the construct that failed (for example `<!--`).
    pub field: String,
    pub kind: ErrorKind,
    /// Optional format argument, such as the offending value.
    pub value: Option<String>,
}

impl SyntaxError {
    pub fn new(location: Location, field: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            location,
            field: field.into(),
            kind,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.location)?;
        if !self.field.is_empty() {
            write!(f, "{}: ", self.field)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(value) = &self.value {
            write!(f, " ({value})")?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// A schema violation in well-formed markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub location: Location,
    /// Dotted/bracketed ancestry, for example `/param/enum/@male`.
    pub field: String,
    pub kind: ErrorKind,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(location: Location, field: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            location,
            field: field.into(),
            kind,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.location)?;
        if !self.field.is_empty() {
            write!(f, "{}: ", self.field)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(value) = &self.value {
            write!(f, " ({value})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A JSON payload that does not conform to a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatError {
    /// Dotted field path within the payload; empty at the root.
    pub field: String,
    pub kind: ErrorKind,
    pub value: Option<String>,
}

impl FormatError {
    pub fn new(field: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.field.is_empty() {
            write!(f, "{}: ", self.field)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(value) = &self.value {
            write!(f, " ({value})")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormatError {}

/// Any error produced while decoding one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseError {
    Syntax(SyntaxError),
    Validation(ValidationError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax(e) => e.kind,
            ParseError::Validation(e) => e.kind,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ParseError::Syntax(e) => &e.field,
            ParseError::Validation(e) => &e.field,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            ParseError::Syntax(e) => &e.location,
            ParseError::Validation(e) => &e.location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(e) => e.fmt(f),
            ParseError::Validation(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        ParseError::Validation(err)
    }
}
