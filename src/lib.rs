//! # toml_tree
//!
//! A streaming parser turning TOML text into an ordered tree of dynamic
//! values.
//!
//! ## Key Features
//!
//! - **Single pass**: reads characters one at a time from any
//!   `Iterator<Item = char>`, with a growable lookahead buffer for the few
//!   places the grammar needs more than one character of context
//! - **Order preserving**: tables keep their keys in document order
//! - **Comments kept**: comments are attached to the entry or table header
//!   they precede
//! - **Strict by default**: duplicate keys, redeclared tables and malformed
//!   literals are errors, never silently merged
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::{from_str, Value};
//!
//! let toml = r#"
//! ## Server settings
//! [server]
//! host = "localhost"
//! port = 8080
//!
//! [[server.routes]]
//! path = "/"
//!
//! [[server.routes]]
//! path = "/health"
//! "#;
//!
//! let table = from_str(toml).unwrap();
//! let server = table.get("server").and_then(Value::as_table).unwrap();
//! assert_eq!(server.get("port").and_then(Value::as_integer), Some(8080));
//! assert_eq!(table.comment("server"), Some(" Server settings"));
//!
//! let routes = server.get("routes").and_then(Value::as_array).unwrap();
//! assert_eq!(routes.len(), 2);
//! ```
//!
//! ## Options
//!
//! ```rust
//! use toml_tree::{from_str_with_options, ParserOptions};
//!
//! let options = ParserOptions::lenient().with_retain_comments(false);
//! let table = from_str_with_options("ключ = 'значение' # note", options).unwrap();
//! assert_eq!(table.get("ключ").and_then(|v| v.as_str()), Some("значение"));
//! assert_eq!(table.comment("ключ"), None);
//! ```
//!
//! ## Building blocks
//!
//! The character plumbing the parser runs on is public as well:
//! [`CharDeque`], a growable ring buffer of characters, and
//! [`LookaheadInput`], which adds peeking and push-back to any character
//! iterator.

pub mod datetime;
pub mod deque;
pub mod error;
pub mod input;
pub mod macros;
pub mod options;
pub mod parser;
mod scalar;
mod structure;
pub mod table;
pub mod value;

pub use datetime::Datetime;
pub use deque::CharDeque;
pub use error::{BufferError, Error, Result};
pub use input::LookaheadInput;
pub use options::ParserOptions;
pub use parser::Parser;
pub use table::Table;
pub use value::Value;

use std::io;

/// Parses a TOML document with default options.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_str;
///
/// let table = from_str("answer = 42").unwrap();
/// assert_eq!(table.get("answer").and_then(|v| v.as_integer()), Some(42));
/// ```
///
/// # Errors
///
/// Returns an error describing the first problem in the document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Table> {
    Parser::new().parse_str(s)
}

/// Parses a TOML document with custom options.
///
/// # Errors
///
/// Returns an error describing the first problem in the document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ParserOptions) -> Result<Table> {
    Parser::with_options(options).parse_str(s)
}

/// Parses a TOML document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_reader;
/// use std::io::Cursor;
///
/// let table = from_reader(Cursor::new(b"[a]\nb = 1")).unwrap();
/// assert!(table.get_path(&["a", "b"]).is_some());
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or a parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Table>
where
    R: io::Read,
{
    Parser::new().parse_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_nested() {
        let table = from_str("a.b.c = 1\n[d.e]\nf = 2").unwrap();
        assert_eq!(table.get_path(&["a", "b", "c"]), Some(&Value::Integer(1)));
        assert_eq!(table.get_path(&["d", "e", "f"]), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_from_str_with_options_strictness() {
        assert!(from_str("ключ = 1").is_err());
        assert!(from_str_with_options("ключ = 1", ParserOptions::lenient()).is_ok());
    }

    #[test]
    fn test_from_reader() {
        let table = from_reader(std::io::Cursor::new("x = 'y'")).unwrap();
        assert_eq!(table.get("x"), Some(&Value::from("y")));
    }
}
