//! Configuration options for the TOML parser.
//!
//! [`ParserOptions`] is fixed before a parse starts and stays immutable while
//! parsing. Only [`bare_key_leniency`](ParserOptions::bare_key_leniency) and
//! [`retain_comments`](ParserOptions::retain_comments) change what the parser
//! produces; the capacity hints only tune allocations.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Parser, ParserOptions};
//!
//! let options = ParserOptions::new()
//!     .with_bare_key_leniency(true)
//!     .with_initial_string_capacity(64);
//!
//! let table = Parser::with_options(options).parse_str("héllo = 1").unwrap();
//! assert_eq!(table.get("héllo").and_then(|v| v.as_integer()), Some(1));
//! ```

use serde::{Deserialize, Serialize};

/// Settings for a [`Parser`](crate::Parser).
///
/// Implements `Serialize` and `Deserialize` so an application can keep the
/// parser settings inside its own configuration; missing fields take their
/// default values.
///
/// # Examples
///
/// ```rust
/// use toml_tree::ParserOptions;
///
/// let options = ParserOptions::default();
/// assert!(!options.bare_key_leniency);
/// assert!(options.retain_comments);
/// assert_eq!(options.initial_string_capacity, 16);
/// assert_eq!(options.initial_sequence_capacity, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Accept any printable character in unquoted keys instead of only
    /// `A-Za-z0-9_-`.
    pub bare_key_leniency: bool,
    /// Initial capacity of the buffers strings are built in.
    pub initial_string_capacity: usize,
    /// Initial capacity of arrays and arrays of tables.
    pub initial_sequence_capacity: usize,
    /// Attach comments to the entries they precede. When `false`, comments are
    /// skipped.
    pub retain_comments: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            bare_key_leniency: false,
            initial_string_capacity: 16,
            initial_sequence_capacity: 10,
            retain_comments: true,
        }
    }
}

impl ParserOptions {
    /// Creates default options (strict bare keys, comments retained).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options accepting the wide bare-key alphabet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::ParserOptions;
    ///
    /// assert!(ParserOptions::lenient().bare_key_leniency);
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        ParserOptions {
            bare_key_leniency: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_bare_key_leniency(mut self, lenient: bool) -> Self {
        self.bare_key_leniency = lenient;
        self
    }

    /// Sets the initial capacity of string buffers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::ParserOptions;
    ///
    /// let options = ParserOptions::new().with_initial_string_capacity(128);
    /// assert_eq!(options.initial_string_capacity, 128);
    /// ```
    #[must_use]
    pub fn with_initial_string_capacity(mut self, capacity: usize) -> Self {
        self.initial_string_capacity = capacity;
        self
    }

    /// Sets the initial capacity of parsed arrays.
    #[must_use]
    pub fn with_initial_sequence_capacity(mut self, capacity: usize) -> Self {
        self.initial_sequence_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_retain_comments(mut self, retain: bool) -> Self {
        self.retain_comments = retain;
        self
    }
}
