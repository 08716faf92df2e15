//! Ordered, commentable table type.
//!
//! [`Table`] wraps an [`IndexMap`] so entries keep the order they were written
//! in, and keeps a second map holding the comment attached to each key, if any.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Value::from("Alice"));
//! table.insert("age".to_string(), Value::from(30));
//! table.set_comment("age", " in years");
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(table.comment("age"), Some(" in years"));
//! ```

use crate::Value;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// An ordered map of keys to values, with optional per-key comments.
///
/// Two tables are equal when their entries are equal; comments are ignored.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("first".to_string(), Value::from(1));
/// table.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: IndexMap<String, Value>,
    comments: IndexMap<String, String>,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Table::default()
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table already contained this key, the old value is returned and
    /// the key keeps its position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Removes a key along with its comment, keeping the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.comments.shift_remove(key);
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Follows `path` through nested tables.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::from_str;
    ///
    /// let table = from_str("[server.http]\nport = 8080").unwrap();
    /// let port = table.get_path(&["server", "http", "port"]);
    /// assert_eq!(port.and_then(|v| v.as_integer()), Some(8080));
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get(key)?.as_table()?;
        }
        current.get(last)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn entry(&mut self, key: String) -> Entry<'_, String, Value> {
        self.entries.entry(key)
    }

    /// Returns the comment attached to `key`.
    #[must_use]
    pub fn comment(&self, key: &str) -> Option<&str> {
        self.comments.get(key).map(String::as_str)
    }

    /// Attaches a comment to `key`, replacing any previous one. The text is
    /// stored without the leading `#`.
    pub fn set_comment(&mut self, key: &str, comment: &str) -> Option<String> {
        self.comments.insert(key.to_string(), comment.to_string())
    }

    /// Iterates over `(key, comment)` pairs in the order they were attached.
    pub fn comments(&self) -> indexmap::map::Iter<'_, String, String> {
        self.comments.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Returns an iterator over the key-value pairs of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table {
            entries: IndexMap::from_iter(iter),
            comments: IndexMap::new(),
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_comments() {
        let mut a = Table::new();
        a.insert("k".to_string(), Value::from(1));
        let mut b = a.clone();
        b.set_comment("k", "note");
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_drops_comment_and_keeps_order() {
        let mut table: Table = vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
            ("c".to_string(), Value::from(3)),
        ]
        .into_iter()
        .collect();
        table.set_comment("b", "gone");
        assert_eq!(table.remove("b"), Some(Value::from(2)));
        assert_eq!(table.comment("b"), None);
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_get_path_stops_at_non_table() {
        let mut inner = Table::new();
        inner.insert("x".to_string(), Value::from(1));
        let mut table = Table::new();
        table.insert("t".to_string(), Value::Table(inner));
        assert_eq!(table.get_path(&["t", "x"]), Some(&Value::from(1)));
        assert_eq!(table.get_path(&["t", "x", "y"]), None);
        assert_eq!(table.get_path(&[]), None);
    }
}
