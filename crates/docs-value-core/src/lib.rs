//! # docs-value-core
//!
//! Tokenizer and parser for the parenthesised property grammar found in game
//! data dumps, where nested arrays, keyed structures and scalars are all
//! packed into a single string:
//!
//! ```text
//! (ItemClass=BlueprintGeneratedClass'"/Game/.../Desc_Wire.Desc_Wire_C"',Amount=8)
//! ```
//!
//! The grammar has no type tags. Integers, floats and strings are told apart
//! by their lexical shape, and a collection is a map or a list depending on
//! whether its entries carry `Key=` prefixes.
//!
//! ## Quick start
//!
//! ```rust
//! use docs_value_core::{parse_value, Value};
//!
//! let value = parse_value("(R=0,G=0.5,B=1,A=1)").unwrap();
//! assert_eq!(value.get("G"), Some(&Value::Float(0.5)));
//!
//! let list = parse_value("((1,2),(3,4))").unwrap();
//! assert_eq!(list.to_json(), serde_json::json!([[1, 2], [3, 4]]));
//! ```
//!
//! ## Modules
//!
//! - [`tokenizer`]: property string → tokens
//! - [`parser`]: tokens → [`Value`]
//! - [`value`]: the generic `Value` tree
//! - [`records`]: typed views (`Color`, `ItemAmount`, `Range`, class paths)
//! - [`error`]: error types for tokenize, syntax and field failures

pub mod error;
pub mod parser;
pub mod records;
pub mod tokenizer;
pub mod value;

pub use error::{FieldError, ParseError, SyntaxError};
pub use parser::{parse, parse_value};
pub use records::{parse_as, FromValue};
pub use tokenizer::{tokenize, Token, TokenKind, TokenValue};
pub use value::Value;
