//! Recursive-descent parser: turns a token stream into a [`Value`].
//!
//! The grammar carries no type tags, so the shape of each collection is
//! decided by its first committed entry: a keyed entry makes it a map, an
//! unkeyed one a list. Every later entry must agree.
//!
//! ```text
//! document   := "" | collection | SCALAR
//! collection := "(" entry ("," entry)* ")"
//! entry      := (KEY "=")? SCALAR | (KEY "=")? collection
//! ```
//!
//! # Key design decisions
//!
//! - **One frame per collection**: `parse_frame` recurses on `(` and returns on
//!   the matching `)`. The root frame is the only one allowed to end at the end
//!   of the token stream, and the only place a bare scalar is a whole document.
//! - **Explicit cursor**: the token position lives in a [`Cursor`] passed down
//!   by `&mut`, so nested frames advance the same stream.
//! - **No depth limit**: nesting is bounded by the thread stack. Inputs in this
//!   domain are a handful of levels deep.

use crate::error::{ParseError, Result, SyntaxError};
use crate::tokenizer::{tokenize, Token, TokenValue};
use crate::value::{insert_entry, Value};

/// Parse one property string.
///
/// The empty string short-circuits to [`Value::Null`] without tokenizing.
/// Any malformed fragment fails the whole parse; there is no partial result.
pub fn parse_value(input: &str) -> Result<Value> {
    if input.is_empty() {
        return Ok(Value::Null);
    }
    let tokens = tokenize(input)?;
    parse(&tokens)
}

/// Parse an already tokenized stream.
///
/// An empty stream yields [`Value::Null`].
pub fn parse(tokens: &[Token<'_>]) -> Result<Value> {
    let mut cursor = Cursor::new(tokens);
    parse_frame(&mut cursor, FrameKind::Root)
}

/// Position in the token stream shared by all frames of one parse.
struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn advance(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Byte offset just past the last token, used for end-of-input errors.
    fn end_offset(&self) -> usize {
        self.tokens
            .last()
            .map_or(0, |t| t.offset + t.text.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Nested,
}

/// Collection under construction. Its shape is fixed by the first commit.
#[derive(Debug, Default)]
enum Collection {
    #[default]
    Unset,
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Collection {
    fn into_value(self) -> Value {
        match self {
            Collection::List(items) => Value::List(items),
            Collection::Map(entries) => Value::Map(entries),
            // a frame only closes after committing at least one entry
            Collection::Unset => Value::Null,
        }
    }
}

/// State of one nesting level.
#[derive(Debug, Default)]
struct Frame {
    pending_key: Option<String>,
    pending_value: Option<Value>,
    collection: Collection,
}

impl Frame {
    fn set_pending_value(&mut self, value: Value, token: &Token<'_>) -> Result<()> {
        if self.pending_value.is_some() {
            return Err(syntax(SyntaxError::UnexpectedScalar, token.offset));
        }
        self.pending_value = Some(value);
        Ok(())
    }

    /// Move the pending (key, value) pair into the collection.
    ///
    /// `missing` is the error to raise when there is no pending value, which
    /// depends on whether a `,` or a `)` triggered the commit.
    fn commit(&mut self, token: &Token<'_>, missing: SyntaxError) -> Result<()> {
        let value = self
            .pending_value
            .take()
            .ok_or_else(|| syntax(missing, token.offset))?;

        self.collection = match (self.pending_key.take(), std::mem::take(&mut self.collection)) {
            (Some(key), Collection::Unset) => Collection::Map(vec![(key, value)]),
            (Some(key), Collection::Map(mut entries)) => {
                insert_entry(&mut entries, key, value);
                Collection::Map(entries)
            }
            (None, Collection::Unset) => Collection::List(vec![value]),
            (None, Collection::List(mut items)) => {
                items.push(value);
                Collection::List(items)
            }
            (Some(_), Collection::List(_)) | (None, Collection::Map(_)) => {
                return Err(syntax(SyntaxError::MixedCollectionShape, token.offset));
            }
        };
        Ok(())
    }

    /// Resolve the frame when the token stream runs out.
    fn finish(self, kind: FrameKind, end_offset: usize) -> Result<Value> {
        match (kind, self) {
            (
                FrameKind::Root,
                Frame {
                    pending_key: None,
                    pending_value,
                    collection: Collection::Unset,
                },
            ) => Ok(pending_value.unwrap_or(Value::Null)),
            _ => Err(syntax(SyntaxError::UnexpectedEndOfInput, end_offset)),
        }
    }
}

fn parse_frame(cursor: &mut Cursor<'_, '_>, kind: FrameKind) -> Result<Value> {
    let mut frame = Frame::default();

    while let Some(token) = cursor.advance() {
        match token.value {
            TokenValue::OpenParen => {
                if frame.pending_value.is_some() {
                    return Err(syntax(SyntaxError::UnexpectedOpenParen, token.offset));
                }
                frame.pending_value = Some(parse_frame(cursor, FrameKind::Nested)?);
            }
            TokenValue::Key(key) => {
                if frame.pending_key.is_some() {
                    return Err(syntax(SyntaxError::UnexpectedKey, token.offset));
                }
                frame.pending_key = Some(key.to_string());
            }
            TokenValue::Float(f) => frame.set_pending_value(Value::Float(f), token)?,
            TokenValue::Integer(n) => frame.set_pending_value(Value::Integer(n), token)?,
            TokenValue::String(s) => frame.set_pending_value(Value::String(s.to_string()), token)?,
            TokenValue::Separator => frame.commit(token, SyntaxError::UnexpectedSeparator)?,
            TokenValue::CloseParen => {
                // the root frame has no `(` of its own to close
                if kind == FrameKind::Root {
                    return Err(syntax(SyntaxError::UnexpectedCloseParen, token.offset));
                }
                frame.commit(token, SyntaxError::UnexpectedCloseParen)?;
                return Ok(frame.collection.into_value());
            }
        }
    }

    frame.finish(kind, cursor.end_offset())
}

fn syntax(error: SyntaxError, offset: usize) -> ParseError {
    ParseError::Syntax { error, offset }
}
