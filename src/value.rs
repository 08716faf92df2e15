//! Dynamic value representation for parsed TOML.
//!
//! This module provides the [`Value`] enum, the closed set of things a TOML
//! document can hold. The parser builds variants directly; callers inspect
//! them with the `is_*`/`as_*` accessors or by matching.
//!
//! ## Integer widths
//!
//! Integers are narrowed to the smallest width that represents them exactly:
//! values fitting in an `i32` become [`Value::Integer`], the rest
//! [`Value::Long`]. [`Value::as_integer`] reads either as an `i64`.
//!
//! ```rust
//! use toml_tree::{from_str, Value};
//!
//! let table = from_str("small = 42\nbig = 5_000_000_000").unwrap();
//! assert_eq!(table.get("small"), Some(&Value::Integer(42)));
//! assert_eq!(table.get("big"), Some(&Value::Long(5_000_000_000)));
//! assert_eq!(table.get("big").and_then(|v| v.as_integer()), Some(5_000_000_000));
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use toml_tree::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::{Datetime, Error, Table};
use serde::{Serialize, Serializer};
use std::fmt;

/// Any value that can appear in a TOML document.
///
/// Arrays of tables are plain [`Value::Array`]s whose elements are all
/// [`Value::Table`]s.
///
/// # Examples
///
/// ```rust
/// use toml_tree::Value;
///
/// let text = Value::from("hello");
/// let num = Value::from(42);
///
/// assert!(text.is_string());
/// assert!(num.is_integer());
/// assert_eq!(num.type_name(), "integer");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i32),
    Long(i64),
    Float(f64),
    Boolean(bool),
    Datetime(Datetime),
    Table(Table),
    Array(Vec<Value>),
}

impl Value {
    /// Returns `true` if the value is an integer of either width.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Long(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::Datetime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` for an array whose elements are all tables.
    ///
    /// An empty array counts, since `[[header]]` may append to it.
    #[must_use]
    pub fn is_array_of_tables(&self) -> bool {
        match self {
            Value::Array(items) => items.iter().all(Value::is_table),
            _ => false,
        }
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns either integer width as an `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Value;
    ///
    /// assert_eq!(Value::Integer(7).as_integer(), Some(7));
    /// assert_eq!(Value::Long(1 << 40).as_integer(), Some(1 << 40));
    /// assert_eq!(Value::Float(7.0).as_integer(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) | Value::Long(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Datetime(_) => "datetime",
            Value::Table(_) => "table",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Long(l) => write!(f, "{}", l),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Datetime(dt) => write!(f, "{}", dt),
            Value::Table(t) => write!(f, "{{table with {} entries}}", t.len()),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i32(*i),
            Value::Long(l) => serializer.serialize_i64(*l),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Datetime(dt) => dt.serialize(serializer),
            Value::Table(t) => t.serialize(serializer),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_integer()
            .ok_or_else(|| Error::syntax(format!("expected integer, found {}", value.type_name())))
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Integer(i) => Ok(f64::from(i)),
            Value::Long(l) => Ok(l as f64),
            _ => Err(Error::syntax(format!(
                "expected float, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::syntax(format!("expected boolean, found {}", value.type_name())))
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(Error::syntax(format!(
                "expected string, found {}",
                value.type_name()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

/// Narrows to [`Value::Integer`] when the value fits in an `i32`.
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(small) => Value::Integer(small),
            Err(_) => Value::Long(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Datetime> for Value {
    fn from(value: Datetime) -> Self {
        Value::Datetime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}
