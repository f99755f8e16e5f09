//! Error types for tokenizing, parsing and coercing property values.

use thiserror::Error;

use crate::tokenizer::TokenKind;

/// Grammar violations detected by the parser.
///
/// Kept separate from [`ParseError`] so callers can match on the exact kind
/// without caring where in the input it happened.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A `(` appeared while a value was already pending in the collection.
    #[error("unexpected open paren")]
    UnexpectedOpenParen,

    /// A `,` with no pending value before it.
    #[error("unexpected separator")]
    UnexpectedSeparator,

    /// A `)` with no pending value before it, or with no `(` to close.
    #[error("unexpected close paren")]
    UnexpectedCloseParen,

    /// A second key before the first key received its value.
    #[error("unexpected key")]
    UnexpectedKey,

    /// A second scalar before the first was committed.
    #[error("unexpected scalar")]
    UnexpectedScalar,

    /// Keyed and unkeyed entries inside the same collection.
    #[error("mixed keyed and unkeyed entries in one collection")]
    MixedCollectionShape,

    /// The token stream ran out with an open collection or a dangling key.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Errors raised when reading typed records out of a parsed [`Value`](crate::Value).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}` should be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a keyed collection, found {0}")]
    NotAMap(&'static str),

    #[error("expected a list, found {0}")]
    NotAList(&'static str),

    #[error("failed to parse class path: [{0}]")]
    BadClassPath(String),
}

/// Everything that can go wrong turning a property string into a value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No token rule matched. `remaining` holds the start of the unscanned text.
    #[error("invalid token at byte {offset}: {remaining:?}")]
    Tokenize { offset: usize, remaining: String },

    /// A token rule matched without consuming anything.
    #[error("empty {kind:?} token at byte {offset}")]
    EmptyToken { offset: usize, kind: TokenKind },

    /// An integer literal does not fit in an `i64`.
    #[error("integer out of range at byte {offset}: {text}")]
    IntegerOverflow { offset: usize, text: String },

    #[error("syntax error at byte {offset}: {error}")]
    Syntax { error: SyntaxError, offset: usize },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl ParseError {
    /// The syntax error kind, if this is a grammar violation.
    pub fn syntax(&self) -> Option<SyntaxError> {
        match self {
            ParseError::Syntax { error, .. } => Some(*error),
            _ => None,
        }
    }
}

/// Convenience alias used throughout docs-value-core.
pub type Result<T> = std::result::Result<T, ParseError>;
