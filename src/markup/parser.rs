//! The markup tokenizer
//!
//! A single-character-lookahead state machine over [`Scanner`]. A leading
//! `<` classifies the construct: `<?` instruction, `<![CDATA[` character
//! data, `</` end element, `<!--` comment, anything else a start element.
//! All other input is text content running to the next `<` or end of input.
//!
//! Clean end of input with no open construct is the only non-error
//! termination and is reported as `Ok(None)`; every structural failure is a
//! located [`SyntaxError`] with a machine-readable kind.

use super::scanner::Scanner;
use super::token::{
    Attribute, CData, Comment, EndElement, Instruction, StartElement, Text, Token,
};
use crate::core::{Block, ErrorKind, Location, Position, Range, Spanned, SyntaxError};

pub(crate) const CDATA_START: &str = "<![CDATA[";
pub(crate) const CDATA_END: &str = "]]>";
pub(crate) const CDATA_ESCAPE: &str = "]]]]><![CDATA[>";

pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(block: &'a Block) -> Self {
        Self {
            scanner: Scanner::new(block),
        }
    }

    pub fn uri(&self) -> &str {
        self.scanner.uri()
    }

    pub fn position(&self) -> Position {
        self.scanner.position()
    }

    /// Read the next token, `Ok(None)` on clean exhaustion.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        if self.scanner.at_end() {
            return Ok(None);
        }

        let pos = self.scanner.position();
        let lead = self.scanner.next(1);
        if lead.is_empty() {
            return Ok(None);
        }
        if lead != "<" {
            // Part of text content, hand it back.
            self.scanner.rollback();
            return self.parse_text().map(Some);
        }

        if self.scanner.matches("?") {
            self.parse_instruction(pos).map(Some)
        } else if self.scanner.matches("![CDATA[") {
            self.parse_cdata(pos).map(Some)
        } else if self.scanner.matches("/") {
            self.parse_end_element(pos).map(Some)
        } else if self.scanner.matches("!--") {
            self.parse_comment(pos).map(Some)
        } else {
            self.parse_start_element(pos).map(Some)
        }
    }

    fn parse_text(&mut self) -> Result<Token, SyntaxError> {
        let start = self.scanner.position();
        let data = match self.scanner.delim_until('<', false) {
            Some(data) => data,
            None => self.scanner.all(),
        };
        let range = Range::new(start, self.scanner.position());
        Ok(Token::Text(Text {
            value: Spanned::new(data.to_string(), range),
            range,
        }))
    }

    fn parse_comment(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let start = self.scanner.position();
        let data = match self.scanner.delim_until_str("-->", false) {
            Some(data) => data,
            None => return Err(self.point_error("<!--", ErrorKind::NotFoundEndTag)),
        };
        let end = self.scanner.position();
        self.scanner.next(3);

        Ok(Token::Comment(Comment {
            value: Spanned::new(data.to_string(), Range::new(start, end)),
            range: Range::new(pos, self.scanner.position()),
        }))
    }

    fn parse_start_element(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        self.scanner.spaces(0);

        let start = self.scanner.position();
        let name = self
            .scanner
            .delim_func(|c| c.is_whitespace() || c == '/' || c == '>', false);
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(self.point_error("", ErrorKind::InvalidMarkup)),
        };
        let name = Spanned::new(name, Range::new(start, self.scanner.position()));

        let attributes = self.parse_attributes()?;

        if self.scanner.matches("/>") {
            return Ok(Token::StartElement(StartElement {
                name,
                attributes,
                self_closing: true,
                range: Range::new(pos, self.scanner.position()),
            }));
        }
        if self.scanner.matches(">") {
            return Ok(Token::StartElement(StartElement {
                name,
                attributes,
                self_closing: false,
                range: Range::new(pos, self.scanner.position()),
            }));
        }

        Err(self.point_error(&name.value, ErrorKind::NotFoundEndTag))
    }

    fn parse_end_element(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let start = self.scanner.position();
        let name = match self.scanner.delim_until('>', false) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(self.point_error("", ErrorKind::InvalidMarkup)),
        };
        let end = self.scanner.position();
        self.scanner.next(1);

        Ok(Token::EndElement(EndElement {
            name: Spanned::new(name, Range::new(start, end)),
            range: Range::new(pos, self.scanner.position()),
        }))
    }

    fn parse_cdata(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let start = self.scanner.position();
        let mut value = String::new();

        loop {
            let chunk = match self.scanner.delim_until_str(CDATA_END, false) {
                Some(chunk) => chunk,
                None => {
                    return Err(self.range_error(
                        pos,
                        self.scanner.position(),
                        CDATA_START,
                        ErrorKind::NotFoundEndTag,
                    ))
                }
            };
            value.push_str(chunk);

            // A terminator preceded by "]]" may be the middle of the escape
            // sequence; roll back two runes and test the full escape.
            if chunk.ends_with("]]") {
                let terminator = self.scanner.position();
                self.scanner.move_to(terminator.rewind(']').rewind(']'));
                if self.scanner.matches(CDATA_ESCAPE) {
                    value.push('>');
                    continue;
                }
                self.scanner.move_to(terminator);
            }
            break;
        }

        let end = self.scanner.position();
        self.scanner.next(CDATA_END.chars().count());

        Ok(Token::CData(CData {
            value: Spanned::new(value, Range::new(start, end)),
            range: Range::new(pos, self.scanner.position()),
        }))
    }

    fn parse_instruction(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let (name, name_range) = self.get_name();
        if name.is_empty() {
            return Err(self.point_error("", ErrorKind::InvalidMarkup));
        }
        let name = Spanned::new(name.to_string(), name_range);

        let attributes = self.parse_attributes()?;

        if self.scanner.matches("?>") {
            return Ok(Token::Instruction(Instruction {
                name,
                attributes,
                range: Range::new(pos, self.scanner.position()),
            }));
        }

        Err(self.point_error("<?", ErrorKind::NotFoundEndTag))
    }

    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, SyntaxError> {
        let mut attributes = Vec::new();
        while let Some(attr) = self.parse_attribute()? {
            attributes.push(attr);
        }
        self.scanner.spaces(0);
        Ok(attributes)
    }

    fn parse_attribute(&mut self) -> Result<Option<Attribute>, SyntaxError> {
        self.scanner.spaces(0);
        let start = self.scanner.position();

        let (name, name_range) = self.get_name();
        if name.is_empty() {
            return Ok(None);
        }
        let name = Spanned::new(name.to_string(), name_range);

        self.scanner.spaces(0);
        if !self.scanner.matches("=") {
            return Err(self.point_error(&name.value, ErrorKind::InvalidMarkup));
        }

        self.scanner.spaces(0);
        if !self.scanner.matches("\"") {
            return Err(self.point_error(&name.value, ErrorKind::InvalidMarkup));
        }

        let value_start = self.scanner.position();
        if self.scanner.delim_until('"', true).is_none() {
            return Err(self.point_error(&name.value, ErrorKind::InvalidMarkup));
        }
        let value_end = self.scanner.position().rewind('"');
        let value = Spanned::new(
            self.scanner
                .slice(value_start.offset, value_end.offset)
                .to_string(),
            Range::new(value_start, value_end),
        );

        Ok(Some(Attribute {
            name,
            value,
            range: Range::new(start, self.scanner.position()),
        }))
    }

    /// Consume a name: everything up to a structural rune or whitespace.
    fn get_name(&mut self) -> (&'a str, Range) {
        let start = self.scanner.position();
        loop {
            if self.scanner.at_end() {
                break;
            }
            let consumed = self.scanner.next(1);
            let Some(ch) = consumed.chars().next() else {
                break;
            };
            if matches!(ch, '"' | '=' | '<' | '>' | '?' | '/') || ch.is_whitespace() {
                self.scanner.rollback();
                break;
            }
        }
        let end = self.scanner.position();
        (
            self.scanner.slice(start.offset, end.offset),
            Range::new(start, end),
        )
    }

    fn point_error(&self, field: &str, kind: ErrorKind) -> SyntaxError {
        let pos = self.scanner.position();
        self.range_error(pos, pos, field, kind)
    }

    fn range_error(&self, start: Position, end: Position, field: &str, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(
            Location::new(self.scanner.uri(), Range::new(start, end)),
            field,
            kind,
        )
    }
}
