use std::collections::BTreeMap;

use bytes::Bytes;

use super::*;

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), "integer");

    let value = Value::string("test");
    assert_eq!(value.as_str(), Some("test"));
    assert_eq!(value.as_bytes().map(|b| b.as_ref()), Some(&b"test"[..]));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert_eq!(value.into_list(), Some(vec![]));
}

#[test]
fn test_as_str_rejects_invalid_utf8() {
    let value = Value::Bytes(Bytes::from_static(b"\xff"));
    assert!(value.as_bytes().is_some());
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_dict_lookup() {
    let mut dict = BTreeMap::new();
    dict.insert(Bytes::from_static(b"port"), Value::Integer(6881));
    let value = Value::from(dict);

    assert_eq!(value.get(b"port"), Some(&Value::Integer(6881)));
    assert_eq!(value.get(b"ip"), None);
    assert_eq!(Value::Integer(1).get(b"port"), None);
    assert_eq!(value.into_dict().map(|d| d.len()), Some(1));
}

#[test]
fn test_conversions() {
    assert_eq!(Value::from(-1i64), Value::Integer(-1));
    assert_eq!(Value::from("a"), Value::from(String::from("a")));
    assert_eq!(
        Value::from(Bytes::from_static(b"a")),
        Value::string("a")
    );
    assert_eq!(
        Value::from(vec![Value::Integer(1)]),
        Value::List(vec![Value::Integer(1)])
    );
}

#[test]
fn test_display() {
    let mut dict = BTreeMap::new();
    dict.insert(Bytes::from_static(b"a"), Value::List(vec![Value::Integer(1), Value::string("x")]));
    dict.insert(Bytes::from_static(b"b"), Value::Bytes(Bytes::from_static(b"\xff")));
    assert_eq!(
        Value::Dict(dict).to_string(),
        r#"{"a": [1, "x"], "b": b"\xff"}"#
    );
}
