//! Scalar literal parsing.
//!
//! The kind of a value is decided by its first significant character:
//!
//! | First char | Literal |
//! |------------|---------|
//! | `"` | basic string, multi-line basic string when followed by `""` |
//! | `'` | literal string, multi-line literal string when followed by `''` |
//! | `t`, `f` | boolean |
//! | `{`, `[` | inline table, array |
//! | anything else | number or date-time |
//!
//! Unquoted literals run until one of [`END_OF_VALUE`].

use crate::datetime::{self, Datetime};
use crate::parser::Session;
use crate::{Error, Result, Value};

/// Characters ending a number, boolean or date-time literal.
pub(crate) const END_OF_VALUE: &[char] = &['\t', ' ', '\n', '\r', ',', ']', '}', '#'];

impl<I: Iterator<Item = char>> Session<'_, I> {
    /// Parses the value following a `key =`.
    pub(crate) fn parse_value(&mut self) -> Result<Value> {
        let first = self
            .read_non_space()
            .ok_or_else(|| Error::unexpected_eof("a value"))?;
        self.parse_value_from(first)
    }

    /// Parses a value whose first character has already been read.
    pub(crate) fn parse_value_from(&mut self, first: char) -> Result<Value> {
        match first {
            '{' => self.parse_inline_table().map(Value::Table),
            '[' => self.parse_array().map(Value::Array),
            '"' => {
                let s = if self.opens_multiline('"') {
                    self.parse_multiline_basic_string()?
                } else {
                    self.parse_basic_string()?
                };
                Ok(Value::String(s))
            }
            '\'' => {
                let s = if self.opens_multiline('\'') {
                    self.parse_multiline_literal_string()?
                } else {
                    self.parse_literal_string()?
                };
                Ok(Value::String(s))
            }
            't' => self.parse_boolean(first, "rue", true),
            'f' => self.parse_boolean(first, "alse", false),
            '\n' | '\r' | '#' | ',' | ']' | '}' | '=' => Err(Error::syntax(format!(
                "expected a value, found {:?}",
                first
            ))),
            _ => {
                self.input.push_back(first);
                self.parse_number_or_datetime()
            }
        }
    }

    /// Consumes the two extra delimiters of a `"""` or `'''` opener.
    fn opens_multiline(&mut self, quote: char) -> bool {
        if self.input.peek_at(0) == Some(quote) && self.input.peek_at(1) == Some(quote) {
            self.input.skip(2);
            true
        } else {
            false
        }
    }

    /// Called after reading a `quote` inside a multi-line string. Up to two
    /// quotes right before the closing delimiter belong to the content.
    fn closes_multiline(&mut self, quote: char) -> bool {
        if self.input.peek_at(0) == Some(quote)
            && self.input.peek_at(1) == Some(quote)
            && self.input.peek_at(2) != Some(quote)
        {
            self.input.skip(2);
            true
        } else {
            false
        }
    }

    /// A line break right after the opening delimiter is not part of the string.
    fn trim_leading_newline(&mut self) {
        match self.input.peek() {
            Some('\n') => self.input.skip(1),
            Some('\r') if self.input.peek_at(1) == Some('\n') => self.input.skip(2),
            _ => {}
        }
    }

    /// Parses a basic string. The opening quote must already be consumed.
    pub(crate) fn parse_basic_string(&mut self) -> Result<String> {
        let mut out = self.string_buffer();
        loop {
            match self.input.read() {
                Some('"') => return Ok(out),
                Some('\\') => {
                    let c = self.input.read_char()?;
                    out.push(self.parse_escape(c)?);
                }
                Some('\n') => return Err(Error::syntax("newline in a single-line string")),
                Some(c) => out.push(c),
                None => return Err(Error::unexpected_eof("a closing '\"'")),
            }
        }
    }

    /// Parses a literal string. The opening quote must already be consumed.
    pub(crate) fn parse_literal_string(&mut self) -> Result<String> {
        let out = self.input.read_until(&['\'', '\n']);
        match self.input.read() {
            Some('\'') => Ok(out),
            Some(_) => Err(Error::syntax("newline in a single-line string")),
            None => Err(Error::unexpected_eof("a closing \"'\"")),
        }
    }

    fn parse_multiline_basic_string(&mut self) -> Result<String> {
        self.trim_leading_newline();
        let mut out = self.string_buffer();
        loop {
            let c = self
                .input
                .read()
                .ok_or_else(|| Error::unexpected_eof("a closing '\"\"\"'"))?;
            match c {
                '"' if self.closes_multiline('"') => return Ok(out),
                '\\' => match self.input.read_char()? {
                    next @ (' ' | '\t' | '\r' | '\n') => self.skip_line_continuation(next)?,
                    next => out.push(self.parse_escape(next)?),
                },
                _ => out.push(c),
            }
        }
    }

    fn parse_multiline_literal_string(&mut self) -> Result<String> {
        self.trim_leading_newline();
        let mut out = self.string_buffer();
        loop {
            let c = self
                .input
                .read()
                .ok_or_else(|| Error::unexpected_eof("a closing \"'''\""))?;
            if c == '\'' && self.closes_multiline('\'') {
                return Ok(out);
            }
            out.push(c);
        }
    }

    /// Handles a backslash that ends a line in a multi-line basic string: the
    /// line break and every whitespace or line break after it are dropped.
    /// `first` is the character read right after the backslash.
    fn skip_line_continuation(&mut self, first: char) -> Result<()> {
        if first != '\n' {
            let rest = self.input.read_until(&['\n']);
            if !rest.chars().all(|c| matches!(c, ' ' | '\t' | '\r')) {
                return Err(Error::invalid_escape(&first.to_string()));
            }
        }
        while matches!(self.input.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.input.skip(1);
        }
        Ok(())
    }

    /// Decodes an escape sequence; `c` is the character after the backslash.
    fn parse_escape(&mut self, c: char) -> Result<char> {
        match c {
            '"' | '\\' => Ok(c),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.parse_unicode_escape(c, 4),
            'U' => self.parse_unicode_escape(c, 8),
            _ => Err(Error::invalid_escape(&c.to_string())),
        }
    }

    fn parse_unicode_escape(&mut self, marker: char, len: usize) -> Result<char> {
        let hex = self.input.read_chars(len)?;
        let invalid = || Error::invalid_escape(&format!("{}{}", marker, hex));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(invalid)
    }

    fn parse_boolean(&mut self, first: char, rest: &str, value: bool) -> Result<Value> {
        let remaining = self.input.read_until(END_OF_VALUE);
        if remaining == rest {
            Ok(Value::Boolean(value))
        } else {
            Err(Error::invalid_boolean(
                &format!("{}{}", first, remaining),
                value,
            ))
        }
    }

    fn parse_number_or_datetime(&mut self) -> Result<Value> {
        let mut literal = self.input.read_until(END_OF_VALUE);
        if !datetime::looks_like_datetime(&literal) {
            return parse_number(&literal);
        }
        // `1979-05-27 07:32:00`: a space may separate the date and the time.
        if datetime::is_full_date(&literal)
            && self.input.peek_at(0) == Some(' ')
            && self.input.peek_at(1).map_or(false, |c| c.is_ascii_digit())
        {
            self.input.skip(1);
            literal.push(' ');
            literal.push_str(&self.input.read_until(END_OF_VALUE));
        }
        literal.parse::<Datetime>().map(Value::Datetime)
    }
}

/// Parses a decimal integer or float literal, underscores included.
///
/// Integers that fit in an `i32` become [`Value::Integer`], larger ones
/// [`Value::Long`].
pub(crate) fn parse_number(literal: &str) -> Result<Value> {
    let unsigned = literal
        .strip_prefix(['+', '-'])
        .unwrap_or(literal);
    let negative = literal.starts_with('-');
    match unsigned {
        "inf" if negative => return Ok(Value::Float(f64::NEG_INFINITY)),
        "inf" => return Ok(Value::Float(f64::INFINITY)),
        "nan" => return Ok(Value::Float(f64::NAN)),
        _ => {}
    }

    let digits = strip_underscores(literal)?;
    if digits.contains(['.', 'e', 'E']) {
        parse_float(literal, &digits)
    } else {
        parse_integer(literal, &digits)
    }
}

/// Removes digit-group underscores; each one must sit between two digits.
fn strip_underscores(literal: &str) -> Result<String> {
    if literal.is_empty() {
        return Err(Error::invalid_number(literal, "empty literal"));
    }
    if literal.starts_with('_') {
        return Err(Error::invalid_number(literal, "leading underscore"));
    }
    if literal.ends_with('_') {
        return Err(Error::invalid_number(literal, "trailing underscore"));
    }
    let mut out = String::with_capacity(literal.len());
    let mut prev: Option<char> = None;
    let mut chars = literal.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if prev == Some('_') {
                return Err(Error::invalid_number(literal, "doubled underscore"));
            }
            let next = chars.peek().copied();
            let is_digit = |c: Option<char>| c.map_or(false, |c| c.is_ascii_digit());
            if !is_digit(prev) || !(is_digit(next) || next == Some('_')) {
                return Err(Error::invalid_number(
                    literal,
                    "underscores must be between digits",
                ));
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    Ok(out)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn has_leading_zero(s: &str) -> bool {
    s.len() > 1 && s.starts_with('0')
}

fn parse_integer(literal: &str, digits: &str) -> Result<Value> {
    let unsigned = digits.strip_prefix(['+', '-']).unwrap_or(digits);
    if !all_digits(unsigned) {
        return Err(Error::invalid_number(literal, "not a decimal integer"));
    }
    if has_leading_zero(unsigned) {
        return Err(Error::invalid_number(literal, "leading zeros are not allowed"));
    }
    let value: i64 = digits
        .parse()
        .map_err(|_| Error::invalid_number(literal, "out of range for a 64-bit integer"))?;
    Ok(Value::from(value))
}

fn parse_float(literal: &str, digits: &str) -> Result<Value> {
    let unsigned = digits.strip_prefix(['+', '-']).unwrap_or(digits);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };
    let (integral, fraction) = match mantissa.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (mantissa, None),
    };
    let valid = all_digits(integral)
        && !has_leading_zero(integral)
        && fraction.map_or(true, all_digits)
        && exponent.map_or(true, |e| all_digits(e.strip_prefix(['+', '-']).unwrap_or(e)));
    if !valid {
        return Err(Error::invalid_number(literal, "malformed float"));
    }
    digits
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|e| Error::invalid_number(literal, &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, ParserOptions};

    fn value(toml: &str) -> Result<Value> {
        let options = ParserOptions::default();
        let mut session = Session::new(toml.chars(), &options);
        session.parse_value()
    }

    fn string(toml: &str) -> String {
        match value(toml).unwrap() {
            Value::String(s) => s,
            other => panic!("Expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_string_escapes() {
        assert_eq!(string(r#""a\tb\n\"c\"""#), "a\tb\n\"c\"");
        assert_eq!(string(r#""\\ \b\f\r""#), "\\ \u{8}\u{c}\r");
        assert_eq!(string(r#""\u00e9\U0001F600""#), "é😀");
    }

    #[test]
    fn test_invalid_escapes() {
        assert!(matches!(
            value(r#""\q""#),
            Err(Error::InvalidEscapeSequence { sequence, .. }) if sequence == "q"
        ));
        assert!(matches!(
            value(r#""\uD800""#),
            Err(Error::InvalidEscapeSequence { .. })
        ));
        assert!(matches!(
            value(r#""\u+0ff""#),
            Err(Error::InvalidEscapeSequence { .. })
        ));
    }

    #[test]
    fn test_literal_strings() {
        assert_eq!(string(r"'C:\Users\nodejs'"), r"C:\Users\nodejs");
        assert_eq!(string("'''\nfirst\n  second'''"), "first\n  second");
        assert_eq!(string("''''quoted'''"), "'quoted");
        assert_eq!(string("''"), "");
    }

    #[test]
    fn test_multiline_basic_strings() {
        assert_eq!(string("\"\"\"\nhello\"\"\""), "hello");
        assert_eq!(string("\"\"\"\r\nhello\"\"\""), "hello");
        assert_eq!(string("\"\"\"a\"b\"\"c\"\"\""), "a\"b\"\"c");
        assert_eq!(string("\"\"\"ends with quote\"\"\"\""), "ends with quote\"");
        assert_eq!(string("\"\"\"\"\"\""), "");
    }

    #[test]
    fn test_line_ending_backslash() {
        let toml = "\"\"\"\nThe quick \\\n\n    brown \\   \n  fox.\"\"\"";
        assert_eq!(string(toml), "The quick brown fox.");
        assert!(matches!(
            value("\"\"\"a \\ b\"\"\""),
            Err(Error::InvalidEscapeSequence { .. })
        ));
    }

    #[test]
    fn test_unterminated_strings() {
        for toml in ["\"abc", "'abc", "\"\"\"abc\"\"", "'''abc", "\"abc\\"] {
            assert!(
                matches!(value(toml), Err(Error::UnexpectedEndOfInput { .. })),
                "{:?} should hit the end of input",
                toml
            );
        }
        assert!(matches!(value("\"a\nb\""), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(value("true").unwrap(), Value::Boolean(true));
        assert_eq!(value("false]").unwrap(), Value::Boolean(false));
        assert!(matches!(
            value("truthy"),
            Err(Error::InvalidBooleanLiteral { literal, expected: true, .. }) if literal == "truthy"
        ));
        assert!(matches!(
            value("fals"),
            Err(Error::InvalidBooleanLiteral { .. })
        ));
    }

    #[test]
    fn test_integers() {
        assert_eq!(parse_number("1_000").unwrap(), Value::Integer(1000));
        assert_eq!(parse_number("+99").unwrap(), Value::Integer(99));
        assert_eq!(parse_number("-17").unwrap(), Value::Integer(-17));
        assert_eq!(parse_number("0").unwrap(), Value::Integer(0));
        assert_eq!(parse_number("2147483647").unwrap(), Value::Integer(i32::MAX));
        assert_eq!(parse_number("2147483648").unwrap(), Value::Long(2_147_483_648));
        assert_eq!(
            parse_number("-9_223_372_036_854_775_808").unwrap(),
            Value::Long(i64::MIN)
        );
    }

    #[test]
    fn test_invalid_numbers() {
        for literal in [
            "_100",
            "100_",
            "1__0",
            "+_1",
            "1_.5",
            "012",
            "9223372036854775808",
            "1.",
            ".5",
            "1e",
            "0x1F",
            "abc",
            "",
        ] {
            assert!(
                matches!(parse_number(literal), Err(Error::InvalidNumberLiteral { .. })),
                "{:?} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_floats() {
        assert_eq!(parse_number("3.25").unwrap(), Value::Float(3.25));
        assert_eq!(parse_number("-0.01").unwrap(), Value::Float(-0.01));
        assert_eq!(parse_number("5e+22").unwrap(), Value::Float(5e22));
        assert_eq!(parse_number("6.626E-34").unwrap(), Value::Float(6.626e-34));
        assert_eq!(parse_number("224_617.445_991").unwrap(), Value::Float(224_617.445_991));
        assert_eq!(parse_number("-inf").unwrap(), Value::Float(f64::NEG_INFINITY));
        assert!(parse_number("nan").unwrap().as_float().unwrap().is_nan());
    }

    #[test]
    fn test_value_stops_at_delimiters() {
        let options = ParserOptions::default();
        let mut session = Session::new("42, 7]".chars(), &options);
        assert_eq!(session.parse_value().unwrap(), Value::Integer(42));
        assert_eq!(session.input.read(), Some(','));
    }

    #[test]
    fn test_datetimes() {
        assert!(matches!(
            value("1979-05-27T07:32:00Z").unwrap(),
            Value::Datetime(Datetime::OffsetDateTime(_))
        ));
        assert!(matches!(
            value("1979-05-27 07:32:00").unwrap(),
            Value::Datetime(Datetime::LocalDateTime(_))
        ));
        assert!(matches!(
            value("1979-05-27 # date only").unwrap(),
            Value::Datetime(Datetime::LocalDate(_))
        ));
        assert!(matches!(
            value("07:32:00").unwrap(),
            Value::Datetime(Datetime::LocalTime(_))
        ));
        assert!(matches!(
            value("1979-02-30"),
            Err(Error::InvalidDatetime { .. })
        ));
    }

    #[test]
    fn test_string_capacity_option_is_only_a_hint() {
        let options = ParserOptions::new().with_initial_string_capacity(0);
        let table = Parser::with_options(options)
            .parse_str("s = \"a fairly long string value\"")
            .unwrap();
        assert_eq!(
            table.get("s").and_then(|v| v.as_str()),
            Some("a fairly long string value")
        );
    }
}
