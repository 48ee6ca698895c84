//! Block fan-out and document aggregation
//!
//! Blocks decode independently, so [`parse`] fans them out as blocking
//! worker tasks and collects results through the join: appends are
//! serialized in the orchestrator, and the document is only visible once
//! every outstanding worker has been joined. One failing block contributes
//! one error and never aborts its siblings.
//!
//! Cancellation is cooperative: a [`CancelToken`] stops new dispatch, while
//! in-flight workers run to completion and have their results discarded.

use crate::codec::{to_element, Decoder, Element};
use crate::core::{Block, ErrorKind, ParseError, ValidationError};
use crate::schema::{Callback, Param, Request};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;

/// One top-level entity decoded from a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Entry {
    Param(Param),
    Request(Request),
    Callback(Callback),
}

impl Entry {
    pub fn to_element(&self) -> Element {
        match self {
            Entry::Param(param) => to_element(param),
            Entry::Request(request) => to_element(request),
            Entry::Callback(callback) => to_element(callback),
        }
    }
}

/// The validated document tree all blocks decode into.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Document {
    pub entries: Vec<Entry>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cooperative cancellation flag shared between the caller and [`parse`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Decode one block into its top-level entity.
///
/// The root element must be `param`, `request` or `callback`; the tag is
/// matched case-insensitively.
pub fn decode_block(block: &Block) -> Result<Entry, ParseError> {
    let mut decoder = Decoder::new(block);
    let start = match decoder.next_start()? {
        Some(start) => start,
        None => {
            let pos = crate::core::Range::default();
            return Err(ParseError::Syntax(crate::core::SyntaxError::new(
                decoder.location(pos),
                "",
                ErrorKind::InvalidMarkup,
            )));
        }
    };

    let name = start.name.value.clone();
    if name.eq_ignore_ascii_case("param") {
        Ok(Entry::Param(decoder.decode_element(start)?))
    } else if name.eq_ignore_ascii_case("request") {
        Ok(Entry::Request(decoder.decode_element(start)?))
    } else if name.eq_ignore_ascii_case("callback") {
        Ok(Entry::Callback(decoder.decode_element(start)?))
    } else {
        Err(ParseError::Validation(
            ValidationError::new(
                decoder.location(start.range),
                format!("/{name}"),
                ErrorKind::NotFound,
            )
            .with_value(name),
        ))
    }
}

/// Decode `blocks` concurrently into one document.
///
/// Returns the aggregated document plus one error per failing block. The
/// result is complete only with respect to blocks dispatched before
/// cancellation was observed.
pub async fn parse(blocks: Vec<Block>, cancel: CancelToken) -> (Document, Vec<ParseError>) {
    tracing::debug!(blocks = blocks.len(), "decoding documentation blocks");

    let mut workers = JoinSet::new();
    for block in blocks {
        if cancel.is_cancelled() {
            tracing::debug!("cancellation observed, no further blocks scheduled");
            break;
        }
        workers.spawn_blocking(move || decode_block(&block));
    }

    let mut document = Document::default();
    let mut errors = Vec::new();
    while let Some(joined) = workers.join_next().await {
        let result = match joined {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => continue,
        };
        if cancel.is_cancelled() {
            tracing::trace!("discarding block result after cancellation");
            continue;
        }
        match result {
            Ok(entry) => document.entries.push(entry),
            Err(err) => {
                tracing::trace!(error = %err, "block failed to decode");
                errors.push(err);
            }
        }
    }

    (document, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_block_dispatches_on_root_tag() {
        let block = Block::new(
            "mem:a.c",
            0,
            r#"<param name="age" type="number" summary="age"/>"#,
        );
        assert!(matches!(decode_block(&block), Ok(Entry::Param(_))));

        let block = Block::new("mem:a.c", 0, r#"<Request type="string" mimetype="json"/>"#);
        assert!(matches!(decode_block(&block), Ok(Entry::Request(_))));
    }

    #[test]
    fn test_unknown_root_tag() {
        let block = Block::new("mem:a.c", 0, "<api/>");
        let err = decode_block(&block).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.field(), "/api");
    }

    #[test]
    fn test_empty_block() {
        let block = Block::new("mem:a.c", 0, "  \n ");
        let err = decode_block(&block).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMarkup);
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.clone().is_cancelled());
    }
}
