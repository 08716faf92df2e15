//! Error types for TOML parsing.
//!
//! Every failure is reported through a single [`Error`] enum. The variants keep
//! the distinctions callers usually care about (bad literal, duplicate key,
//! redeclared table, truncated input) and each one carries the offending text
//! or key path. Errors returned by a parse also carry the line and column
//! where parsing stopped.
//!
//! ## Error Categories
//!
//! - **Literal errors**: malformed strings, numbers, booleans and date-times
//! - **Structural errors**: duplicate keys, redeclared tables, invalid parents
//! - **Truncated input**: the input ended inside a string, table or array
//! - **Buffer errors**: internal misuse of the character buffer (a bug if seen)
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{from_str, Error};
//!
//! let result = from_str("k = 1\nk = 2");
//! assert!(matches!(result, Err(Error::DuplicateKey { .. })));
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use std::borrow::Borrow;
use thiserror::Error;

/// All the ways a parse can fail.
///
/// Errors returned by a parse carry the `line` and `col` (both 1-based) of the
/// last character read before the failure. Errors built outside a parse leave
/// both at 0; see [`Error::position`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading the input stream
    #[error("IO error: {0}")]
    Io(String),

    /// Unknown character after `\` in a basic string, or an escape that does
    /// not encode a Unicode scalar value
    #[error("Invalid escape sequence{}: \\{sequence}", location(.line, .col))]
    InvalidEscapeSequence {
        line: usize,
        col: usize,
        sequence: String,
    },

    /// The input ended inside an open string, table, array or header
    #[error("Unexpected end of input{}, expected {expected}", location(.line, .col))]
    UnexpectedEndOfInput {
        line: usize,
        col: usize,
        expected: String,
    },

    /// Malformed number literal
    #[error("Invalid number literal '{literal}'{}: {reason}", location(.line, .col))]
    InvalidNumberLiteral {
        line: usize,
        col: usize,
        literal: String,
        reason: String,
    },

    /// `t`/`f` not followed by the rest of `true`/`false`
    #[error("Invalid value '{literal}'{}, expected the boolean value {expected}", location(.line, .col))]
    InvalidBooleanLiteral {
        line: usize,
        col: usize,
        literal: String,
        expected: bool,
    },

    /// Something shaped like a date or time that is not a valid one
    #[error("Invalid date-time literal '{literal}'{}: {reason}", location(.line, .col))]
    InvalidDatetime {
        line: usize,
        col: usize,
        literal: String,
        reason: String,
    },

    /// Empty key or a character outside the accepted bare-key alphabet
    #[error("Invalid key '{key}'{}: {reason}", location(.line, .col))]
    InvalidKey {
        line: usize,
        col: usize,
        key: String,
        reason: String,
    },

    /// A table header names a table that already holds non-table entries
    #[error("Table [{path}] has been declared twice{}", location(.line, .col))]
    DuplicateTableDeclaration {
        line: usize,
        col: usize,
        path: String,
    },

    /// A key is defined twice in the same table
    #[error("Key '{key}' has been defined twice{}", location(.line, .col))]
    DuplicateKey {
        line: usize,
        col: usize,
        key: String,
    },

    /// A header's parent path goes through a value that is not a table
    #[error("Cannot create entry [{path}]{}: '{parent}' is not a table", location(.line, .col))]
    InvalidParent {
        line: usize,
        col: usize,
        path: String,
        parent: String,
    },

    /// Any other grammar violation
    #[error("Syntax error{}: {msg}", location(.line, .col))]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
    },

    /// Misuse of the internal character buffer
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),
}

/// Renders ` at line L, column C`, or nothing for an error with no position.
fn location<L: Borrow<usize>>(line: L, col: L) -> String {
    match *line.borrow() {
        0 => String::new(),
        line => format!(" at line {}, column {}", line, col.borrow()),
    }
}

/// Errors raised by [`CharDeque`](crate::CharDeque).
///
/// The parser never triggers these on any input; seeing one wrapped in
/// [`Error::Buffer`] means a bug in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("the buffer is empty")]
    Empty,

    #[error("no element at index {index} (size {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("cannot take {requested} elements from a buffer of size {size}")]
    InsufficientElements { requested: usize, size: usize },
}

impl Error {
    /// Creates a syntax error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::syntax("expected '=' after key");
    /// assert!(err.to_string().contains("expected '='"));
    /// ```
    pub fn syntax<T: ToString>(msg: T) -> Self {
        Error::Syntax {
            line: 0,
            col: 0,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(expected: &str) -> Self {
        Error::UnexpectedEndOfInput {
            line: 0,
            col: 0,
            expected: expected.to_string(),
        }
    }

    pub fn invalid_escape(sequence: &str) -> Self {
        Error::InvalidEscapeSequence {
            line: 0,
            col: 0,
            sequence: sequence.to_string(),
        }
    }

    /// Creates an invalid number error carrying the literal and the reason.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::invalid_number("1__0", "doubled underscore");
    /// assert!(err.to_string().contains("1__0"));
    /// ```
    pub fn invalid_number(literal: &str, reason: &str) -> Self {
        Error::InvalidNumberLiteral {
            line: 0,
            col: 0,
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_boolean(literal: &str, expected: bool) -> Self {
        Error::InvalidBooleanLiteral {
            line: 0,
            col: 0,
            literal: literal.to_string(),
            expected,
        }
    }

    pub fn invalid_datetime(literal: &str, reason: &str) -> Self {
        Error::InvalidDatetime {
            line: 0,
            col: 0,
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_key(key: &str, reason: &str) -> Self {
        Error::InvalidKey {
            line: 0,
            col: 0,
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn duplicate_table(path: &[String]) -> Self {
        Error::DuplicateTableDeclaration {
            line: 0,
            col: 0,
            path: join_path(path),
        }
    }

    pub fn duplicate_key(path: &[String]) -> Self {
        Error::DuplicateKey {
            line: 0,
            col: 0,
            key: join_path(path),
        }
    }

    pub fn invalid_parent(path: &[String], parent: &[String]) -> Self {
        Error::InvalidParent {
            line: 0,
            col: 0,
            path: join_path(path),
            parent: join_path(parent),
        }
    }

    /// Creates an I/O error for stream reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` a parse failed at, if known.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::from_str;
    ///
    /// let err = from_str("a = 1\na = 2").unwrap_err();
    /// assert_eq!(err.position(), Some((2, 5)));
    /// assert!(err.to_string().ends_with("at line 2, column 5"));
    /// ```
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Io(_) | Error::Buffer(_) => None,
            Error::InvalidEscapeSequence { line, col, .. }
            | Error::UnexpectedEndOfInput { line, col, .. }
            | Error::InvalidNumberLiteral { line, col, .. }
            | Error::InvalidBooleanLiteral { line, col, .. }
            | Error::InvalidDatetime { line, col, .. }
            | Error::InvalidKey { line, col, .. }
            | Error::DuplicateTableDeclaration { line, col, .. }
            | Error::DuplicateKey { line, col, .. }
            | Error::InvalidParent { line, col, .. }
            | Error::Syntax { line, col, .. } => (*line > 0).then_some((*line, *col)),
        }
    }

    /// Stamps a position on a grammar error; I/O and buffer errors are
    /// returned unchanged.
    pub(crate) fn at(mut self, at_line: usize, at_col: usize) -> Self {
        match &mut self {
            Error::Io(_) | Error::Buffer(_) => {}
            Error::InvalidEscapeSequence { line, col, .. }
            | Error::UnexpectedEndOfInput { line, col, .. }
            | Error::InvalidNumberLiteral { line, col, .. }
            | Error::InvalidBooleanLiteral { line, col, .. }
            | Error::InvalidDatetime { line, col, .. }
            | Error::InvalidKey { line, col, .. }
            | Error::DuplicateTableDeclaration { line, col, .. }
            | Error::DuplicateKey { line, col, .. }
            | Error::InvalidParent { line, col, .. }
            | Error::Syntax { line, col, .. } => {
                *line = at_line;
                *col = at_col;
            }
        }
        self
    }
}

/// Renders a key path the way it would be written in a header.
pub(crate) fn join_path(path: &[String]) -> String {
    path.join(".")
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_dotted() {
        let path = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            Error::duplicate_table(&path).to_string(),
            "Table [a.b] has been declared twice"
        );
        assert_eq!(
            Error::invalid_parent(&path, &path[..1]).to_string(),
            "Cannot create entry [a.b]: 'a' is not a table"
        );
    }

    #[test]
    fn test_position_is_rendered_once_stamped() {
        let err = Error::duplicate_key(&["k".to_string()]);
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "Key 'k' has been defined twice");

        let err = err.at(3, 7);
        assert_eq!(err.position(), Some((3, 7)));
        assert_eq!(
            err.to_string(),
            "Key 'k' has been defined twice at line 3, column 7"
        );
        assert_eq!(
            Error::syntax("expected '='").at(1, 2).to_string(),
            "Syntax error at line 1, column 2: expected '='"
        );
    }

    #[test]
    fn test_io_errors_have_no_position() {
        let err = Error::io("broken pipe").at(4, 1);
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "IO error: broken pipe");
    }

    #[test]
    fn test_buffer_error_converts() {
        let err: Error = BufferError::Empty.into();
        assert_eq!(err, Error::Buffer(BufferError::Empty));
        assert!(err.to_string().contains("empty"));
    }
}
