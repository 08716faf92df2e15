//! Date and time values.
//!
//! TOML has four temporal forms, each mapped to a `chrono` type:
//!
//! | Literal | Variant |
//! |---------|---------|
//! | `1979-05-27T07:32:00Z`, `1979-05-27 07:32:00-07:00` | [`Datetime::OffsetDateTime`] |
//! | `1979-05-27T07:32:00.999` | [`Datetime::LocalDateTime`] |
//! | `1979-05-27` | [`Datetime::LocalDate`] |
//! | `07:32:00` | [`Datetime::LocalTime`] |
//!
//! The date/time separator may be `T`, `t` or a single space. Seconds are
//! required; fractional seconds are optional.

use crate::{Error, Result};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone,
};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// A TOML date, time, or date-time.
///
/// # Examples
///
/// ```rust
/// use toml_tree::Datetime;
///
/// let dt: Datetime = "1979-05-27T07:32:00Z".parse().unwrap();
/// assert!(dt.offset().is_some());
/// assert_eq!(dt.to_string(), "1979-05-27T07:32:00Z");
///
/// let date: Datetime = "1979-05-27".parse().unwrap();
/// assert!(date.time().is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datetime {
    OffsetDateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
}

impl Datetime {
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Datetime::OffsetDateTime(dt) => Some(dt.date_naive()),
            Datetime::LocalDateTime(dt) => Some(dt.date()),
            Datetime::LocalDate(d) => Some(*d),
            Datetime::LocalTime(_) => None,
        }
    }

    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Datetime::OffsetDateTime(dt) => Some(dt.time()),
            Datetime::LocalDateTime(dt) => Some(dt.time()),
            Datetime::LocalDate(_) => None,
            Datetime::LocalTime(t) => Some(*t),
        }
    }

    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Datetime::OffsetDateTime(dt) => Some(*dt.offset()),
            _ => None,
        }
    }
}

/// Whether a value literal has the shape of a date (`dddd-`) or a time (`dd:`).
pub(crate) fn looks_like_datetime(literal: &str) -> bool {
    let b = literal.as_bytes();
    let digits = |n: usize| b[..n].iter().all(u8::is_ascii_digit);
    (b.len() >= 5 && b[4] == b'-' && digits(4)) || (b.len() >= 3 && b[2] == b':' && digits(2))
}

/// Whether `literal` is exactly a `YYYY-MM-DD` date, which a space-separated
/// time may follow.
pub(crate) fn is_full_date(literal: &str) -> bool {
    literal.len() == 10 && looks_like_datetime(literal)
}

fn parse_date(literal: &str, date: &str) -> Result<NaiveDate> {
    if date.len() != 10 || date.as_bytes()[7] != b'-' {
        return Err(Error::invalid_datetime(literal, "expected a YYYY-MM-DD date"));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| Error::invalid_datetime(literal, &e.to_string()))
}

fn parse_time(literal: &str, time: &str) -> Result<NaiveTime> {
    let b = time.as_bytes();
    if b.len() < 8 || b[2] != b':' || b[5] != b':' {
        return Err(Error::invalid_datetime(literal, "expected a HH:MM:SS time"));
    }
    NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map_err(|e| Error::invalid_datetime(literal, &e.to_string()))
}

/// Splits `07:32:00-07:00` into the time and its offset, if any.
fn split_offset<'a>(literal: &str, rest: &'a str) -> Result<(&'a str, Option<FixedOffset>)> {
    if let Some(time) = rest.strip_suffix(['Z', 'z']) {
        return Ok((time, FixedOffset::east_opt(0)));
    }
    let Some(idx) = rest.rfind(['+', '-']) else {
        return Ok((rest, None));
    };
    let (time, offset) = rest.split_at(idx);
    let b = offset.as_bytes();
    if b.len() != 6 || b[3] != b':' {
        return Err(Error::invalid_datetime(literal, "expected a +HH:MM offset"));
    }
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| Error::invalid_datetime(literal, "invalid offset digits"))
    };
    let hours = parse(&offset[1..3])?;
    let minutes = parse(&offset[4..6])?;
    if hours > 23 || minutes > 59 {
        return Err(Error::invalid_datetime(literal, "offset out of range"));
    }
    let mut seconds = hours * 3600 + minutes * 60;
    if b[0] == b'-' {
        seconds = -seconds;
    }
    let offset = FixedOffset::east_opt(seconds)
        .ok_or_else(|| Error::invalid_datetime(literal, "offset out of range"))?;
    Ok((time, Some(offset)))
}

impl FromStr for Datetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !s.is_ascii() {
            return Err(Error::invalid_datetime(s, "unexpected character"));
        }
        let b = s.as_bytes();
        if b.len() < 5 || b[4] != b'-' {
            return parse_time(s, s).map(Datetime::LocalTime);
        }

        let date = parse_date(s, &s[..s.len().min(10)])?;
        if s.len() == 10 {
            return Ok(Datetime::LocalDate(date));
        }
        if !matches!(b[10], b'T' | b't' | b' ') {
            return Err(Error::invalid_datetime(
                s,
                "expected 'T' or a space between date and time",
            ));
        }

        let (time, offset) = split_offset(s, &s[11..])?;
        let naive = date.and_time(parse_time(s, time)?);
        match offset {
            None => Ok(Datetime::LocalDateTime(naive)),
            Some(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(Datetime::OffsetDateTime)
                .ok_or_else(|| Error::invalid_datetime(s, "ambiguous local time")),
        }
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datetime::OffsetDateTime(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Datetime::LocalDateTime(dt) => {
                write!(f, "{}", dt.format(&format!("{}T{}", DATE_FORMAT, TIME_FORMAT)))
            }
            Datetime::LocalDate(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Datetime::LocalTime(t) => write!(f, "{}", t.format(TIME_FORMAT)),
        }
    }
}

impl Serialize for Datetime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
