//! Streaming JSON validation against a parameter tree
//!
//! The walker keeps two stacks: container states mirroring the nesting
//! (in-array, in-object, awaiting-value) and the property names leading to
//! the current value. Each scalar resolves its name path against the schema
//! tree, checks its JSON kind against the declared type (skipped for
//! `null`), and checks enum membership. Malformed JSON is rejected up front
//! with a `serde_json` well-formedness pass, so the token walk itself only
//! reasons about conformance.

use super::token::JsonToken;
use crate::core::{ErrorKind, FormatError};
use crate::schema::{Param, Type};
use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Inside `[ ... ]`.
    Array,
    /// Inside `{ ... }`.
    Object,
    /// A property name was read, its value is pending.
    Value,
}

/// Check `payload` against `param`.
///
/// A missing schema accepts only the literal `null` payload; a `none` typed
/// schema accepts the empty payload.
pub fn validate(param: Option<&Param>, payload: &[u8]) -> Result<(), FormatError> {
    let Some(param) = param else {
        let text = std::str::from_utf8(payload)
            .map_err(|_| FormatError::new("", ErrorKind::InvalidFormat))?;
        if text.trim() == "null" {
            return Ok(());
        }
        return Err(FormatError::new("", ErrorKind::InvalidFormat));
    };

    let text =
        std::str::from_utf8(payload).map_err(|_| FormatError::new("", ErrorKind::InvalidFormat))?;
    if param.ty == Type::None && text.trim().is_empty() {
        return Ok(());
    }
    if serde_json::from_str::<serde_json::Value>(text).is_err() {
        return Err(FormatError::new("", ErrorKind::InvalidFormat));
    }

    Walker {
        root: param,
        states: Vec::new(),
        names: Vec::new(),
    }
    .run(text)
}

struct Walker<'a> {
    root: &'a Param,
    states: Vec<State>,
    names: Vec<String>,
}

impl<'a> Walker<'a> {
    fn run(mut self, text: &str) -> Result<(), FormatError> {
        let mut lexer = JsonToken::lexer(text);
        while let Some(token) = lexer.next() {
            let token =
                token.map_err(|_| FormatError::new(self.field(), ErrorKind::InvalidFormat))?;
            match token {
                JsonToken::Str => {
                    let value = unescape(lexer.slice())?;
                    match self.states.last() {
                        Some(State::Value) => {
                            self.check(Some(Type::String), &value)?;
                            self.pop_value();
                        }
                        Some(State::Array) => self.check(Some(Type::String), &value)?,
                        Some(State::Object) => {
                            // Property name: its value decides validity.
                            self.states.push(State::Value);
                            self.names.push(value);
                        }
                        None => self.check(Some(Type::String), &value)?,
                    }
                }
                JsonToken::True => {
                    self.check(Some(Type::Bool), "true")?;
                    self.pop_value();
                }
                JsonToken::False => {
                    self.check(Some(Type::Bool), "false")?;
                    self.pop_value();
                }
                JsonToken::Number => {
                    self.check(Some(Type::Number), lexer.slice())?;
                    self.pop_value();
                }
                JsonToken::Null => {
                    // null is valid for any declared type.
                    self.check(None, "null")?;
                    self.pop_value();
                }
                JsonToken::ObjectStart => self.states.push(State::Object),
                JsonToken::ArrayStart => self.states.push(State::Array),
                JsonToken::ObjectEnd | JsonToken::ArrayEnd => {
                    self.names.pop();
                    self.states.pop();
                    // A closed container that was itself a property value
                    // also retires its awaiting-value frame.
                    if matches!(self.states.last(), Some(State::Value)) {
                        self.states.pop();
                    }
                }
                JsonToken::Colon | JsonToken::Comma => {}
            }
        }
        Ok(())
    }

    /// Validate one scalar at the current path. `ty` is `None` for JSON
    /// null, which matches any declared type.
    fn check(&self, ty: Option<Type>, text: &str) -> Result<(), FormatError> {
        let field = self.field();
        let param = self
            .resolve()
            .ok_or_else(|| FormatError::new(field.clone(), ErrorKind::NotFound))?;

        let Some(ty) = ty else {
            return Ok(());
        };
        if param.ty != ty {
            return Err(FormatError::new(field, ErrorKind::InvalidFormat).with_value(text));
        }
        if param.is_enum() && !param.enums.iter().any(|e| e.value == text) {
            return Err(FormatError::new(field, ErrorKind::InvalidValue).with_value(text));
        }
        Ok(())
    }

    /// Pop the awaiting-value frame a scalar terminates; scalars inside an
    /// array leave the stacks alone.
    fn pop_value(&mut self) {
        if matches!(self.states.last(), Some(State::Value)) {
            self.states.pop();
            self.names.pop();
        }
    }

    /// Resolve the name stack against the tree; the empty path is the root.
    fn resolve(&self) -> Option<&'a Param> {
        let mut param = self.root;
        for name in &self.names {
            param = param.child(name)?;
        }
        Some(param)
    }

    fn field(&self) -> String {
        self.names.join(".")
    }
}

fn unescape(slice: &str) -> Result<String, FormatError> {
    serde_json::from_str(slice).map_err(|_| FormatError::new("", ErrorKind::InvalidFormat))
}
