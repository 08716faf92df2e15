use toml_tree::{from_str, toml_value, Table, Value};

#[test]
fn test_toml_value_macro_booleans() {
    assert_eq!(toml_value!(true), Value::Boolean(true));
    assert_eq!(toml_value!(false), Value::Boolean(false));
}

#[test]
fn test_toml_value_macro_numbers() {
    assert_eq!(toml_value!(42), Value::Integer(42));
    assert_eq!(toml_value!(-123), Value::Integer(-123));
    assert_eq!(toml_value!(1_i64 << 40), Value::Long(1 << 40));
    assert_eq!(toml_value!(3.5), Value::Float(3.5));
}

#[test]
fn test_toml_value_macro_strings() {
    assert_eq!(toml_value!("hello"), Value::from("hello"));
    let owned = String::from("owned");
    assert_eq!(toml_value!(owned), Value::String("owned".to_string()));
}

#[test]
fn test_toml_value_macro_nested() {
    let value = toml_value!({
        "database": {
            "ports": [8000, 8001],
            "enabled": true
        },
        "matrix": [[1, 2], [(-3), 4]],
        "empty": {}
    });

    let table = value.as_table().unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.get_path(&["database", "ports"]),
        Some(&Value::Array(vec![Value::Integer(8000), Value::Integer(8001)]))
    );
    assert_eq!(
        table.get("matrix"),
        Some(&Value::Array(vec![
            Value::Array(vec![Value::Integer(1), Value::Integer(2)]),
            Value::Array(vec![Value::Integer(-3), Value::Integer(4)]),
        ]))
    );
    assert_eq!(table.get("empty"), Some(&Value::Table(Table::new())));
}

#[test]
fn test_toml_value_macro_trailing_commas() {
    assert_eq!(toml_value!([1, 2,]), toml_value!([1, 2]));
    assert_eq!(toml_value!({ "a": 1, }), toml_value!({ "a": 1 }));
}

#[test]
fn test_toml_value_macro_matches_parsed_document() {
    let parsed = from_str("[[points]]\nx = 1\ny = 2\n\n[[points]]\nx = 7\ny = 8").unwrap();
    assert_eq!(
        Value::Table(parsed),
        toml_value!({
            "points": [{ "x": 1, "y": 2 }, { "x": 7, "y": 8 }]
        })
    );
}
