//! Character input with unbounded lookahead and push-back.
//!
//! [`LookaheadInput`] wraps any `Iterator<Item = char>` and keeps the
//! characters that were peeked or pushed back in a [`CharDeque`]. Reads always
//! drain that buffer before pulling from the underlying iterator, so `peek`,
//! `push_back` and `read` can be interleaved freely.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::LookaheadInput;
//!
//! let mut input = LookaheadInput::from_str("\"\"\"text");
//! assert_eq!(input.read(), Some('"'));
//!
//! // Two more quotes: a multi-line string opener.
//! if input.peek_at(0) == Some('"') && input.peek_at(1) == Some('"') {
//!     input.skip_peeks();
//! }
//! assert_eq!(input.read_until(&[' ']), "text");
//! ```

use crate::deque::CharDeque;
use crate::{Error, Result};

/// A character source supporting arbitrary lookahead and push-back.
///
/// The input also tracks the position of the last consumed character. Peeking
/// does not move it; pushing a character back moves it back by one.
pub struct LookaheadInput<I> {
    source: I,
    /// Characters pulled from `source` but not yet consumed, front first.
    buffer: CharDeque,
    line: usize,
    col: usize,
    /// Column of the last newline consumed, restored when it is pushed back.
    prev_col: usize,
}

impl<'a> LookaheadInput<std::str::Chars<'a>> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        LookaheadInput::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> LookaheadInput<I> {
    pub fn new(source: I) -> Self {
        Self::with_capacity(source, 16)
    }

    /// Creates an input whose lookahead buffer starts with room for
    /// `capacity` characters.
    pub fn with_capacity(source: I, capacity: usize) -> Self {
        LookaheadInput {
            source,
            buffer: CharDeque::with_capacity(capacity),
            line: 1,
            col: 0,
            prev_col: 0,
        }
    }

    /// Line and column (both 1-based) of the last consumed character, or
    /// `(1, 0)` before anything is read. A consumed line break sits one
    /// column past the end of the line it closes.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        if self.col == 0 && self.line > 1 {
            (self.line - 1, self.prev_col + 1)
        } else {
            (self.line, self.col)
        }
    }

    fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.prev_col = self.col;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }

    fn retreat(&mut self, c: char) {
        if c == '\n' {
            self.line = self.line.saturating_sub(1).max(1);
            self.col = self.prev_col;
        } else {
            self.col = self.col.saturating_sub(1);
        }
    }

    /// Consumes and returns the next character, or `None` at the end of input.
    pub fn read(&mut self) -> Option<char> {
        let c = match self.buffer.pop_front() {
            Ok(c) => c,
            Err(_) => self.source.next()?,
        };
        self.advance(c);
        Some(c)
    }

    /// Like [`read`](Self::read), but the end of input is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfInput`] if no character is left.
    pub fn read_char(&mut self) -> Result<char> {
        self.read()
            .ok_or_else(|| Error::unexpected_eof("another character"))
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.peek_at(0)
    }

    /// Returns the character `n` positions ahead without consuming anything.
    ///
    /// `peek_at(0)` is the character the next [`read`](Self::read) returns.
    pub fn peek_at(&mut self, n: usize) -> Option<char> {
        while self.buffer.len() <= n {
            let c = self.source.next()?;
            self.buffer.push_back(c);
        }
        self.buffer.get(n).ok()
    }

    /// Marks every buffered character (peeked or pushed back) as consumed.
    pub fn skip_peeks(&mut self) {
        while let Ok(c) = self.buffer.pop_front() {
            self.advance(c);
        }
    }

    /// Consumes up to `n` characters.
    pub fn skip(&mut self, n: usize) {
        for _ in 0..n {
            if self.read().is_none() {
                break;
            }
        }
    }

    /// Makes `c` the next character to be read.
    pub fn push_back(&mut self, c: char) {
        self.retreat(c);
        self.buffer.push_front(c);
    }

    /// Makes `s` the next characters to be read, in order.
    pub fn push_back_str(&mut self, s: &str) {
        let chars: Vec<char> = s.chars().collect();
        for &c in chars.iter().rev() {
            self.retreat(c);
        }
        self.buffer.extend_front(&chars);
    }

    /// Reads characters up to, but not including, the first one contained in
    /// `stop`, or up to the end of input. The stop character is left unread.
    pub fn read_until(&mut self, stop: &[char]) -> String {
        let mut out = String::new();
        while let Some(c) = self.read() {
            if stop.contains(&c) {
                self.push_back(c);
                break;
            }
            out.push(c);
        }
        out
    }

    /// Reads exactly `n` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfInput`] if fewer than `n` remain.
    pub fn read_chars(&mut self, n: usize) -> Result<String> {
        let mut out = String::with_capacity(n);
        for _ in 0..n {
            match self.read() {
                Some(c) => out.push(c),
                None => return Err(Error::unexpected_eof(&format!("{} characters", n))),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_then_read() {
        let mut input = LookaheadInput::from_str("abc");
        assert_eq!(input.peek_at(2), Some('c'));
        assert_eq!(input.peek(), Some('a'));
        assert_eq!(input.read(), Some('a'));
        assert_eq!(input.read(), Some('b'));
        assert_eq!(input.read(), Some('c'));
        assert_eq!(input.read(), None);
        assert_eq!(input.peek_at(5), None);
    }

    #[test]
    fn test_push_back_is_lifo() {
        let mut input = LookaheadInput::from_str("z");
        input.push_back('b');
        input.push_back('a');
        assert_eq!(input.read_until(&[]), "abz");
    }

    #[test]
    fn test_push_back_str_keeps_order() {
        let mut input = LookaheadInput::from_str("!");
        input.push_back_str("ok");
        assert_eq!(input.read_chars(3).unwrap(), "ok!");
    }

    #[test]
    fn test_skip_peeks_commits_lookahead() {
        let mut input = LookaheadInput::from_str("'''rest");
        assert_eq!(input.read(), Some('\''));
        assert_eq!(input.peek_at(1), Some('\''));
        input.skip_peeks();
        assert_eq!(input.read(), Some('r'));
    }

    #[test]
    fn test_read_until_leaves_stop_char() {
        let mut input = LookaheadInput::from_str("123, 4");
        assert_eq!(input.read_until(&[',', ']']), "123");
        assert_eq!(input.peek(), Some(','));
        assert_eq!(input.read_until(&[]), ", 4");
    }

    #[test]
    fn test_read_chars_at_end() {
        let mut input = LookaheadInput::from_str("ab");
        assert!(matches!(
            input.read_chars(3),
            Err(Error::UnexpectedEndOfInput { .. })
        ));
        assert!(input.read_char().is_err());
    }

    #[test]
    fn test_interleaved_push_backs_are_lifo() {
        let mut input = LookaheadInput::from_str("z");
        input.push_back_str("cd");
        input.push_back('b');
        input.push_back_str("a");
        assert_eq!(input.read_until(&[]), "abcdz");
    }

    #[test]
    fn test_position_follows_consumption() {
        let mut input = LookaheadInput::from_str("ab\ncd\nef");
        assert_eq!(input.position(), (1, 0));
        input.peek_at(5);
        assert_eq!(input.position(), (1, 0));

        input.skip(2);
        assert_eq!(input.position(), (1, 2));
        input.skip(1);
        assert_eq!(input.position(), (1, 3));
        input.push_back('\n');
        assert_eq!(input.position(), (1, 2));

        assert_eq!(input.read_until(&['e']), "\ncd\n");
        assert_eq!(input.position(), (2, 3));
        input.skip(10);
        assert_eq!(input.position(), (3, 2));
    }

    #[test]
    fn test_skip_peeks_advances_position() {
        let mut input = LookaheadInput::from_str("x\ny");
        input.peek_at(2);
        input.skip_peeks();
        assert_eq!(input.position(), (2, 1));
    }
}
