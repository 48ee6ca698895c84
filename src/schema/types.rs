//! Scalar value types shared across entities
//!
//! [`Type`] is the closed set of parameter types. [`Semver`] and [`Status`]
//! are validated newtypes used by deprecation markers and response codes.
//! The lexical grammars live here as compiled regular expressions so that
//! enum-value checks and version checks stay deterministic.

use crate::core::ErrorKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static SEMVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    )
    .expect("semver pattern")
});

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("integer pattern"));

/// The declared type of a parameter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    #[default]
    None,
    Bool,
    Object,
    Number,
    String,
}

impl Type {
    /// Case-insensitive parse over the five canonical literals. Anything
    /// else is a decode error, never a silent default.
    pub fn parse(value: &str) -> Result<Type, ErrorKind> {
        match value.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Type::None),
            "bool" => Ok(Type::Bool),
            "object" => Ok(Type::Object),
            "number" => Ok(Type::Number),
            "string" => Ok(Type::String),
            _ => Err(ErrorKind::InvalidFormat),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::None => "none",
            Type::Bool => "bool",
            Type::Object => "object",
            Type::Number => "number",
            Type::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `major.minor.patch` version string, marking "deprecated since".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Semver(String);

impl Semver {
    pub fn parse(value: &str) -> Result<Semver, ErrorKind> {
        if SEMVER.is_match(value) {
            Ok(Semver(value.to_string()))
        } else {
            Err(ErrorKind::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status(u16);

impl Status {
    pub fn parse(value: &str) -> Result<Status, ErrorKind> {
        let code: u16 = value.parse().map_err(|_| ErrorKind::InvalidFormat)?;
        if (100..=599).contains(&code) {
            Ok(Status(code))
        } else {
            Err(ErrorKind::InvalidValue)
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check a string against the integer lexical grammar.
pub(crate) fn is_integer_literal(value: &str) -> bool {
    INTEGER.is_match(value)
}

/// Check a string against the boolean lexical grammar.
pub(crate) fn is_bool_literal(value: &str) -> bool {
    value == "true" || value == "false"
}
