//! The generic decode walker
//!
//! [`Decoder`] drives a [`Parser`] token stream into any [`Node`]
//! implementation. Unknown attributes and unknown child elements are
//! skipped, mirroring how the markup is allowed to carry annotations the
//! schema does not model. Field paths accumulate along the element
//! ancestry, so an error raised deep inside a child already carries its
//! ancestors' path prefix when it surfaces.

use super::Node;
use crate::core::{
    Block, ErrorKind, Location, ParseError, Range, SyntaxError, ValidationError,
};
use crate::markup::{Parser, StartElement, Token};

/// Location and field-path context handed to entity validation.
pub struct ValidateContext {
    pub location: Location,
    pub field: String,
}

impl ValidateContext {
    pub fn new(location: Location, field: String) -> Self {
        Self { location, field }
    }

    /// Build a [`ValidationError`] at this element, with `suffix` appended
    /// to the field path (for example `/@name` or `/param`).
    pub fn error(&self, suffix: &str, kind: ErrorKind) -> ValidationError {
        ValidationError::new(
            self.location.clone(),
            format!("{}{}", self.field, suffix),
            kind,
        )
    }
}

pub struct Decoder<'a> {
    parser: Parser<'a>,
    segments: Vec<String>,
}

impl<'a> Decoder<'a> {
    pub fn new(block: &'a Block) -> Self {
        Self {
            parser: Parser::new(block),
            segments: Vec::new(),
        }
    }

    /// Decode the block's root element into `N`.
    pub fn decode<N: Node>(&mut self) -> Result<N, ParseError> {
        match self.next_start()? {
            Some(start) => self.decode_element(start),
            None => Err(ParseError::Syntax(self.empty_input_error())),
        }
    }

    /// Skip leading comments, instructions and blank text, returning the
    /// first start element, or `None` on clean exhaustion.
    pub fn next_start(&mut self) -> Result<Option<StartElement>, ParseError> {
        loop {
            match self.parser.next_token().map_err(ParseError::Syntax)? {
                None => return Ok(None),
                Some(Token::StartElement(start)) => return Ok(Some(start)),
                Some(Token::Comment(_)) | Some(Token::Instruction(_)) => {}
                Some(ref token) if token.is_blank_text() => {}
                Some(token) => {
                    return Err(ParseError::Syntax(SyntaxError::new(
                        self.location(token.range()),
                        self.field_path(),
                        ErrorKind::InvalidMarkup,
                    )))
                }
            }
        }
    }

    /// Decode one element whose start tag has already been read.
    pub fn decode_element<N: Node>(&mut self, start: StartElement) -> Result<N, ParseError> {
        self.segments.push(start.name.value.clone());
        let result = self.decode_element_inner(&start);
        self.segments.pop();
        result
    }

    pub fn location(&self, range: Range) -> Location {
        Location::new(self.parser.uri(), range)
    }

    fn decode_element_inner<N: Node>(&mut self, start: &StartElement) -> Result<N, ParseError> {
        let mut node = N::default();
        node.set_location(start.range);

        for attr in &start.attributes {
            let Some(field) = N::ATTRIBUTES.iter().find(|f| f.name == attr.name.value) else {
                continue;
            };
            (field.apply)(&mut node, &attr.value.value).map_err(|kind| {
                ParseError::Syntax(
                    SyntaxError::new(
                        self.location(attr.value.range),
                        format!("{}/@{}", self.field_path(), attr.name.value),
                        kind,
                    )
                    .with_value(attr.value.value.clone()),
                )
            })?;
        }

        if !start.self_closing {
            loop {
                match self.parser.next_token().map_err(ParseError::Syntax)? {
                    None => {
                        return Err(ParseError::Syntax(SyntaxError::new(
                            self.location(start.range),
                            self.field_path(),
                            ErrorKind::NotFoundEndTag,
                        )))
                    }
                    Some(Token::StartElement(child)) => {
                        match N::CHILDREN.iter().find(|f| f.name == child.name.value) {
                            Some(field) => (field.decode)(&mut node, self, child)?,
                            None => self.skip_element(&child)?,
                        }
                    }
                    Some(Token::EndElement(end)) => {
                        if end.name.value == start.name.value {
                            break;
                        }
                        return Err(ParseError::Syntax(
                            SyntaxError::new(
                                self.location(end.range),
                                self.field_path(),
                                ErrorKind::InvalidMarkup,
                            )
                            .with_value(end.name.value),
                        ));
                    }
                    Some(Token::Text(text)) => {
                        if let Some(content) = N::CONTENT {
                            (content.apply)(&mut node, text.value);
                        }
                    }
                    Some(Token::CData(cdata)) => {
                        if let Some(content) = N::CONTENT {
                            (content.apply)(&mut node, cdata.value);
                        }
                    }
                    Some(Token::Comment(_)) | Some(Token::Instruction(_)) => {}
                }
            }
        }

        let ctx = ValidateContext::new(self.location(start.range), self.field_path());
        node.validate(&ctx).map_err(ParseError::Validation)?;
        Ok(node)
    }

    /// Consume a balanced element subtree without interpreting it.
    fn skip_element(&mut self, start: &StartElement) -> Result<(), ParseError> {
        if start.self_closing {
            return Ok(());
        }
        let mut depth = 1usize;
        loop {
            match self.parser.next_token().map_err(ParseError::Syntax)? {
                None => {
                    return Err(ParseError::Syntax(SyntaxError::new(
                        self.location(start.range),
                        start.name.value.clone(),
                        ErrorKind::NotFoundEndTag,
                    )))
                }
                Some(Token::StartElement(inner)) if !inner.self_closing => depth += 1,
                Some(Token::EndElement(_)) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn field_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    fn empty_input_error(&self) -> SyntaxError {
        let pos = self.parser.position();
        SyntaxError::new(
            self.location(Range::new(pos, pos)),
            "",
            ErrorKind::InvalidMarkup,
        )
    }
}
