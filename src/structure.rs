//! Keys, arrays, inline tables, table bodies and table headers.
//!
//! A document is a root table body followed by any number of headed
//! sections. Each `[a.b]` or `[[a.b]]` header is resolved against the root
//! table: every segment but the last must name a table, or an array of
//! tables whose last element is used, and missing segments are created as
//! empty tables along the way.

use crate::error::join_path;
use crate::parser::Session;
use crate::{Error, Result, Table, Value};

impl<I: Iterator<Item = char>> Session<'_, I> {
    fn is_bare_key_char(&self, c: char) -> bool {
        if self.options.bare_key_leniency {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '=' | '.' | '[' | ']' | '{' | '}' | '#' | '"' | '\'' | ',')
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '-'
        }
    }

    /// Parses a single key segment starting with `first`.
    fn parse_key(&mut self, first: char) -> Result<String> {
        match first {
            '"' => self.parse_basic_string(),
            '\'' => self.parse_literal_string(),
            c if self.is_bare_key_char(c) => {
                let mut key = self.string_buffer();
                key.push(c);
                while let Some(c) = self.input.peek() {
                    if !self.is_bare_key_char(c) {
                        break;
                    }
                    key.push(c);
                    self.input.skip(1);
                }
                Ok(key)
            }
            c => Err(Error::invalid_key(
                &c.to_string(),
                "character not allowed in a bare key",
            )),
        }
    }

    /// Parses a dotted key such as `a."b.c".d` up to and including `end`.
    ///
    /// `first` is the first character of the key, already read.
    pub(crate) fn parse_key_path(&mut self, first: char, end: char) -> Result<Vec<String>> {
        let mut path = Vec::new();
        let mut c = first;
        loop {
            path.push(self.parse_key(c)?);
            match self.read_non_space() {
                Some('.') => {
                    c = self
                        .read_non_space()
                        .ok_or_else(|| Error::unexpected_eof("a key after '.'"))?;
                }
                Some(found) if found == end => return Ok(path),
                Some(found) => {
                    return Err(Error::syntax(format!(
                        "expected '.' or '{}' after key '{}', found {:?}",
                        end,
                        join_path(&path),
                        found
                    )))
                }
                None => {
                    return Err(Error::unexpected_eof(&format!(
                        "'{}' after key '{}'",
                        end,
                        join_path(&path)
                    )))
                }
            }
        }
    }

    /// Parses `{ k = v, ... }`. The opening brace is already consumed.
    pub(crate) fn parse_inline_table(&mut self) -> Result<Table> {
        let mut table = Table::new();
        let mut c = self
            .read_non_space()
            .ok_or_else(|| Error::unexpected_eof("'}'"))?;
        if c == '}' {
            return Ok(table);
        }
        loop {
            let path = self.parse_key_path(c, '=')?;
            let value = self.parse_value()?;
            insert_dotted(&mut table, &path, value)?;
            match self.read_non_space() {
                Some(',') => {}
                Some('}') => return Ok(table),
                Some(other) => {
                    return Err(Error::syntax(format!(
                        "expected ',' or '}}' in inline table, found {:?}",
                        other
                    )))
                }
                None => return Err(Error::unexpected_eof("'}'")),
            }
            c = self
                .read_non_space()
                .ok_or_else(|| Error::unexpected_eof("'}'"))?;
            if c == '}' {
                return Err(Error::syntax("trailing comma in inline table"));
            }
        }
    }

    /// Parses `[ v, ... ]`. The opening bracket is already consumed.
    ///
    /// Newlines, comments and a trailing comma are allowed; comments inside
    /// arrays are dropped.
    pub(crate) fn parse_array(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(self.options.initial_sequence_capacity);
        loop {
            let c = self
                .read_useful(false)
                .ok_or_else(|| Error::unexpected_eof("']'"))?;
            if c == ']' {
                return Ok(values);
            }
            values.push(self.parse_value_from(c)?);
            match self.read_useful(false) {
                Some(',') => {}
                Some(']') => return Ok(values),
                Some(other) => {
                    return Err(Error::syntax(format!(
                        "expected ',' or ']' in array, found {:?}",
                        other
                    )))
                }
                None => return Err(Error::unexpected_eof("']'")),
            }
        }
    }

    /// Parses `key = value` lines into `table` until a header or the end of
    /// input. The `[` opening the next header is left unread.
    pub(crate) fn parse_table_body(&mut self, table: &mut Table) -> Result<()> {
        loop {
            let first = match self.read_useful(true) {
                Some('[') => {
                    self.input.push_back('[');
                    return Ok(());
                }
                Some(c) => c,
                None => return Ok(()),
            };
            let path = self.parse_key_path(first, '=')?;
            let value = self.parse_value()?;
            let trailing = self.finish_line()?;
            let comment = self.take_comment(trailing);
            let container = insert_dotted(table, &path, value)?;
            if let (Some(comment), Some(leaf)) = (comment, path.last()) {
                container.set_comment(leaf, &comment);
            }
        }
    }

    /// Parses a table header and its body. The opening `[` (or `[[` when
    /// `is_array` is set) is already consumed.
    pub(crate) fn parse_table_header(&mut self, root: &mut Table, is_array: bool) -> Result<()> {
        let first = self
            .read_non_space()
            .ok_or_else(|| Error::unexpected_eof("a table name"))?;
        let path = self.parse_key_path(first, ']')?;
        if is_array {
            match self.input.read() {
                Some(']') => {}
                Some(_) => {
                    return Err(Error::syntax(format!(
                        "expected ']]' to close [[{}]]",
                        join_path(&path)
                    )))
                }
                None => return Err(Error::unexpected_eof("']]'")),
            }
        }
        let trailing = self.finish_line()?;
        let comment = self.take_comment(trailing);

        let parent = resolve_parent(root, &path)?;
        let Some(leaf) = path.last() else {
            return Err(Error::syntax("empty table name"));
        };
        if let Some(comment) = comment {
            parent.set_comment(leaf, &comment);
        }
        if is_array {
            self.declare_array_element(parent, leaf, &path)
        } else {
            self.declare_table(parent, leaf, &path)
        }
    }

    /// `[a.b]`: creates the table, or merges into one that was only created
    /// implicitly as the parent of other tables.
    fn declare_table(&mut self, parent: &mut Table, leaf: &str, path: &[String]) -> Result<()> {
        let slot = parent
            .entry(leaf.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        let Value::Table(table) = slot else {
            return Err(Error::duplicate_table(path));
        };
        if table.values().any(|v| !is_subtable(v)) {
            return Err(Error::duplicate_table(path));
        }
        if table.is_empty() {
            log::trace!("declaring table [{}]", join_path(path));
        } else {
            log::trace!("merging into implicit table [{}]", join_path(path));
        }
        self.parse_table_body(table)
    }

    /// `[[a.b]]`: appends a new table to the array at `a.b`.
    fn declare_array_element(
        &mut self,
        parent: &mut Table,
        leaf: &str,
        path: &[String],
    ) -> Result<()> {
        let capacity = self.options.initial_sequence_capacity;
        let slot = parent
            .entry(leaf.to_string())
            .or_insert_with(|| Value::Array(Vec::with_capacity(capacity)));
        let appendable = slot.is_array_of_tables();
        let items = match slot {
            Value::Array(items) if appendable => items,
            Value::Table(_) => return Err(Error::duplicate_table(path)),
            _ => return Err(Error::duplicate_key(path)),
        };
        log::trace!(
            "appending element {} to [[{}]]",
            items.len(),
            join_path(path)
        );
        let mut table = Table::new();
        self.parse_table_body(&mut table)?;
        items.push(Value::Table(table));
        Ok(())
    }
}

/// Entries an implicitly created table may already hold: tables, and arrays
/// of tables declared with `[[...]]` below it.
fn is_subtable(value: &Value) -> bool {
    match value {
        Value::Table(_) => true,
        Value::Array(items) => !items.is_empty() && value.is_array_of_tables(),
        _ => false,
    }
}

/// Inserts `value` at a dotted `path` below `table`, creating intermediate
/// tables as needed. Returns the table holding the final key.
pub(crate) fn insert_dotted<'t>(
    table: &'t mut Table,
    path: &[String],
    value: Value,
) -> Result<&'t mut Table> {
    let Some((leaf, parents)) = path.split_last() else {
        return Err(Error::syntax("empty key"));
    };
    let mut current = table;
    for (depth, key) in parents.iter().enumerate() {
        current = match current
            .entry(key.clone())
            .or_insert_with(|| Value::Table(Table::new()))
        {
            Value::Table(inner) => inner,
            _ => return Err(Error::duplicate_key(&path[..=depth])),
        };
    }
    if current.contains_key(leaf) {
        return Err(Error::duplicate_key(path));
    }
    current.insert(leaf.clone(), value);
    Ok(current)
}

/// Walks every segment of a header path but the last, returning the table
/// the last segment belongs in.
pub(crate) fn resolve_parent<'t>(root: &'t mut Table, path: &[String]) -> Result<&'t mut Table> {
    let parents = &path[..path.len().saturating_sub(1)];
    let mut current = root;
    for (depth, key) in parents.iter().enumerate() {
        let slot = current.entry(key.clone()).or_insert_with(|| {
            log::trace!("creating implicit table [{}]", join_path(&parents[..=depth]));
            Value::Table(Table::new())
        });
        let descendable = slot.is_array_of_tables();
        current = match slot {
            Value::Table(inner) => inner,
            Value::Array(items) if descendable => match items.last_mut() {
                Some(Value::Table(inner)) => inner,
                _ => return Err(Error::invalid_parent(path, &parents[..=depth])),
            },
            _ => return Err(Error::invalid_parent(path, &parents[..=depth])),
        };
    }
    Ok(current)
}
