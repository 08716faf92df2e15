//! Parser entry points.
//!
//! A [`Parser`] holds immutable [`ParserOptions`]; every call to one of its
//! `parse_*` methods runs an independent session over its own input, so a
//! single parser can be shared between threads.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Parser, Value};
//!
//! let parser = Parser::new();
//! let table = parser
//!     .parse_str("title = \"example\"\n\n[[products]]\nname = \"Hammer\"\n\n[[products]]\nname = \"Nail\"")
//!     .unwrap();
//!
//! let products = table.get("products").and_then(Value::as_array).unwrap();
//! assert_eq!(products.len(), 2);
//! ```

use crate::input::LookaheadInput;
use crate::{Error, ParserOptions, Result, Table};
use std::io::Read;

/// A reusable TOML parser.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Creates a parser with default options.
    #[must_use]
    pub fn new() -> Self {
        Parser::default()
    }

    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Parser { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a complete document.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; no partial result is produced.
    pub fn parse_str(&self, input: &str) -> Result<Table> {
        self.parse_chars(input.chars())
    }

    /// Parses a document from any character source.
    pub fn parse_chars<I>(&self, chars: I) -> Result<Table>
    where
        I: IntoIterator<Item = char>,
    {
        let mut table = Table::new();
        self.parse_into(chars, &mut table)?;
        Ok(table)
    }

    /// Reads `reader` to the end and parses it as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails or the input is not UTF-8.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Table> {
        let mut buf = String::new();
        reader
            .read_to_string(&mut buf)
            .map_err(|e| Error::io(&e.to_string()))?;
        self.parse_str(&buf)
    }

    /// Parses a document into an existing table.
    ///
    /// Keys already present in `destination` take part in duplicate
    /// detection as if they had been declared earlier in the document. On
    /// error, `destination` may hold part of the document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Error, Parser, Table, Value};
    ///
    /// let parser = Parser::new();
    /// let mut config = Table::new();
    /// config.insert("name".to_string(), Value::from("default"));
    ///
    /// parser.parse_into("port = 80".chars(), &mut config).unwrap();
    /// assert_eq!(config.len(), 2);
    ///
    /// let err = parser.parse_into("name = \"again\"".chars(), &mut config);
    /// assert!(matches!(err, Err(Error::DuplicateKey { .. })));
    /// ```
    pub fn parse_into<I>(&self, chars: I, destination: &mut Table) -> Result<()>
    where
        I: IntoIterator<Item = char>,
    {
        let mut session = Session::new(chars.into_iter(), &self.options);
        log::debug!(
            "parsing document (lenient keys: {}, comments: {})",
            self.options.bare_key_leniency,
            self.options.retain_comments
        );
        match session.run(destination) {
            Ok(()) => {
                log::debug!("parsed {} top-level entries", destination.len());
                Ok(())
            }
            Err(err) => {
                let (line, col) = session.input.position();
                let err = err.at(line, col);
                log::debug!("parse failed: {}", err);
                Err(err)
            }
        }
    }
}

/// Where a session is in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Key/value lines before the first header.
    Root,
    /// Between headed sections.
    Headers,
    Done,
}

/// State of one parse: the input, the options and the comment waiting to be
/// attached to the next entry.
pub(crate) struct Session<'o, I> {
    pub(crate) input: LookaheadInput<I>,
    pub(crate) options: &'o ParserOptions,
    pending_comment: Option<String>,
}

impl<'o, I: Iterator<Item = char>> Session<'o, I> {
    pub(crate) fn new(source: I, options: &'o ParserOptions) -> Self {
        Session {
            input: LookaheadInput::with_capacity(source, options.initial_string_capacity),
            options,
            pending_comment: None,
        }
    }

    fn run(&mut self, root: &mut Table) -> Result<()> {
        let mut state = State::Root;
        while state != State::Done {
            state = match state {
                State::Root => {
                    self.parse_table_body(root)?;
                    State::Headers
                }
                State::Headers => match self.input.read() {
                    Some('[') => {
                        let is_array = self.input.peek() == Some('[');
                        if is_array {
                            self.input.skip_peeks();
                        }
                        self.parse_table_header(root, is_array)?;
                        State::Headers
                    }
                    Some(c) => {
                        return Err(Error::syntax(format!(
                            "expected a table header, found {:?}",
                            c
                        )))
                    }
                    None => State::Done,
                },
                State::Done => State::Done,
            };
        }
        if let Some(comment) = self.pending_comment.take() {
            log::trace!("dropping trailing comment {:?}", comment);
        }
        Ok(())
    }

    pub(crate) fn string_buffer(&self) -> String {
        String::with_capacity(self.options.initial_string_capacity)
    }

    /// Reads the next character that is not a space or tab.
    pub(crate) fn read_non_space(&mut self) -> Option<char> {
        loop {
            match self.input.read()? {
                ' ' | '\t' => {}
                c => return Some(c),
            }
        }
    }

    /// Reads the next character that is not whitespace, a line break or part
    /// of a comment. Skipped comments become pending when `record_comments`
    /// is set.
    pub(crate) fn read_useful(&mut self, record_comments: bool) -> Option<char> {
        loop {
            match self.input.read()? {
                ' ' | '\t' | '\r' | '\n' => {}
                '#' => {
                    let text = self.read_comment();
                    if record_comments {
                        self.add_comment(text);
                    }
                }
                c => return Some(c),
            }
        }
    }

    /// Reads the rest of a comment line, without the `#` and the line break.
    fn read_comment(&mut self) -> String {
        let mut text = self.input.read_until(&['\n']);
        if text.ends_with('\r') {
            text.pop();
        }
        text
    }

    /// Consumes the end of a value or header line, returning its trailing
    /// comment if there is one.
    pub(crate) fn finish_line(&mut self) -> Result<Option<String>> {
        match self.read_non_space() {
            None | Some('\n') => Ok(None),
            Some('\r') if self.input.peek() == Some('\n') => {
                self.input.skip(1);
                Ok(None)
            }
            Some('#') => Ok(Some(self.read_comment())),
            Some(c) => Err(Error::syntax(format!(
                "expected a line break after the value, found {:?}",
                c
            ))),
        }
    }

    fn add_comment(&mut self, text: String) {
        if !self.options.retain_comments {
            return;
        }
        match &mut self.pending_comment {
            Some(pending) => {
                pending.push('\n');
                pending.push_str(&text);
            }
            None => self.pending_comment = Some(text),
        }
    }

    /// Takes the pending comment, with `trailing` appended to it.
    pub(crate) fn take_comment(&mut self, trailing: Option<String>) -> Option<String> {
        if let Some(text) = trailing {
            self.add_comment(text);
        }
        self.pending_comment.take()
    }
}
