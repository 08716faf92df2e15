/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become [`Value::Table`](crate::Value::Table)s with their keys in
/// the order written; any other expression goes through `Value::from`.
/// Negative numbers inside arrays and tables must be parenthesized.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{from_str, toml_value, Value};
///
/// let expected = toml_value!({
///     "title": "example",
///     "owner": { "name": "Tom", "age": (-1) },
///     "ports": [8000, 8001]
/// });
///
/// let parsed = from_str(
///     "title = \"example\"\nports = [8000, 8001]\n[owner]\nname = \"Tom\"\nage = -1",
/// )
/// .unwrap();
/// assert_eq!(Value::Table(parsed), expected);
/// ```
#[macro_export]
macro_rules! toml_value {
    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml_value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml_value!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
