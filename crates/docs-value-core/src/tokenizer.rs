//! Tokenizer: splits a property string into typed tokens.
//!
//! Scanning is first-match-wins over a fixed, ordered rule list. There is no
//! longest-match across rules, so the order below is load-bearing:
//!
//! 1. `(`
//! 2. `)`
//! 3. `,`
//! 4. key: identifier characters followed by `=`
//! 5. float: digits `.` digits
//! 6. integer: digits
//! 7. string: identifier characters
//!
//! Keys are tried before strings so `Foo=bar` does not lex as the string `Foo`,
//! and floats before integers so `1.5` does not lex as `1`. Whitespace belongs
//! to no rule and is rejected.

use crate::error::{ParseError, Result};

/// How much of the unscanned input is echoed back in a tokenize error.
const ERROR_CONTEXT_CHARS: usize = 20;

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Separator,
    Key,
    Float,
    Integer,
    String,
}

impl TokenKind {
    /// Every kind, in match priority order.
    pub const ORDERED: [TokenKind; 7] = [
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::Separator,
        TokenKind::Key,
        TokenKind::Float,
        TokenKind::Integer,
        TokenKind::String,
    ];

    /// Length in bytes of this kind's match at the start of `text`, if any.
    fn match_len(self, text: &str) -> Option<usize> {
        let bytes = text.as_bytes();
        match self {
            TokenKind::OpenParen => literal(bytes, b'('),
            TokenKind::CloseParen => literal(bytes, b')'),
            TokenKind::Separator => literal(bytes, b','),
            TokenKind::Key => {
                let len = run_len(bytes, is_ident_byte);
                (len > 0 && bytes.get(len) == Some(&b'=')).then_some(len + 1)
            }
            TokenKind::Float => {
                let int_len = run_len(bytes, |b| b.is_ascii_digit());
                if int_len == 0 || bytes.get(int_len) != Some(&b'.') {
                    return None;
                }
                let frac_len = run_len(&bytes[int_len + 1..], |b| b.is_ascii_digit());
                (frac_len > 0).then_some(int_len + 1 + frac_len)
            }
            TokenKind::Integer => non_empty(run_len(bytes, |b| b.is_ascii_digit())),
            TokenKind::String => non_empty(run_len(bytes, is_ident_byte)),
        }
    }
}

/// Decoded payload of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue<'a> {
    OpenParen,
    CloseParen,
    Separator,
    /// Key text without the trailing `=`.
    Key(&'a str),
    Float(f64),
    Integer(i64),
    String(&'a str),
}

/// One token: its decoded value plus the exact source text it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub value: TokenValue<'a>,
    /// Exact matched substring; its length is how far the cursor advanced.
    pub text: &'a str,
    /// Byte offset of `text` in the tokenized input.
    pub offset: usize,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self.value {
            TokenValue::OpenParen => TokenKind::OpenParen,
            TokenValue::CloseParen => TokenKind::CloseParen,
            TokenValue::Separator => TokenKind::Separator,
            TokenValue::Key(_) => TokenKind::Key,
            TokenValue::Float(_) => TokenKind::Float,
            TokenValue::Integer(_) => TokenKind::Integer,
            TokenValue::String(_) => TokenKind::String,
        }
    }
}

/// Tokenize a whole property string.
///
/// Fails on the first position where no rule matches. The sum of all token
/// text lengths always equals `input.len()` on success.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let remaining = &input[offset..];
        let token = next_token(remaining, offset)?;
        offset += token.text.len();
        tokens.push(token);
    }

    Ok(tokens)
}

/// Match the highest-priority rule at the start of `remaining`.
fn next_token(remaining: &str, offset: usize) -> Result<Token<'_>> {
    for kind in TokenKind::ORDERED {
        let Some(len) = kind.match_len(remaining) else {
            continue;
        };
        if len == 0 {
            return Err(ParseError::EmptyToken { offset, kind });
        }
        let text = &remaining[..len];
        return Ok(Token {
            value: decode(kind, text, offset)?,
            text,
            offset,
        });
    }

    Err(ParseError::Tokenize {
        offset,
        remaining: remaining.chars().take(ERROR_CONTEXT_CHARS).collect(),
    })
}

/// Turn matched text into the payload for its kind.
fn decode(kind: TokenKind, text: &str, offset: usize) -> Result<TokenValue<'_>> {
    Ok(match kind {
        TokenKind::OpenParen => TokenValue::OpenParen,
        TokenKind::CloseParen => TokenValue::CloseParen,
        TokenKind::Separator => TokenValue::Separator,
        TokenKind::Key => TokenValue::Key(&text[..text.len() - 1]),
        // digits.digits never fails to parse; oversized values become infinity
        TokenKind::Float => TokenValue::Float(text.parse().unwrap_or(f64::INFINITY)),
        TokenKind::Integer => {
            let n = text.parse().map_err(|_| ParseError::IntegerOverflow {
                offset,
                text: text.to_string(),
            })?;
            TokenValue::Integer(n)
        }
        TokenKind::String => TokenValue::String(text),
    })
}

/// Characters allowed in keys and bare strings: ASCII alphanumerics plus
/// the punctuation found in engine object paths.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'\\' | b'/' | b'.' | b'\'' | b'"' | b'_' | b'-')
}

fn literal(bytes: &[u8], expected: u8) -> Option<usize> {
    (bytes.first() == Some(&expected)).then_some(1)
}

fn run_len(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

fn non_empty(len: usize) -> Option<usize> {
    (len > 0).then_some(len)
}
