use std::collections::BTreeMap;
use std::io;

use bytes::Bytes;

use super::*;
use crate::decode::decode;

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)).unwrap(), b"i42e");
    assert_eq!(encode(&Value::Integer(-3)).unwrap(), b"i-3e");
    assert_eq!(encode(&Value::Integer(0)).unwrap(), b"i0e");
    assert_eq!(
        encode(&Value::Integer(i64::MIN)).unwrap(),
        b"i-9223372036854775808e"
    );
}

#[test]
fn test_encode_string() {
    assert_eq!(encode(&Value::string("spam")).unwrap(), b"4:spam");
    assert_eq!(encode(&Value::string("")).unwrap(), b"0:");
    // Length counts UTF-8 bytes, not characters.
    assert_eq!(encode("żółw").unwrap(), "7:żółw".as_bytes());
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![Value::string("spam"), Value::Integer(42)]);
    assert_eq!(encode(&list).unwrap(), b"l4:spami42ee");
    assert_eq!(encode(&Value::List(vec![])).unwrap(), b"le");
}

#[test]
fn test_encode_dict_sorted_by_key() {
    let mut dict = BTreeMap::new();
    dict.insert(Bytes::from_static(b"foo"), Value::Integer(42));
    dict.insert(Bytes::from_static(b"bar"), Value::string("spam"));
    assert_eq!(
        encode(&Value::Dict(dict)).unwrap(),
        b"d3:bar4:spam3:fooi42ee"
    );
    assert_eq!(encode(&Value::Dict(BTreeMap::new())).unwrap(), b"de");
}

#[test]
fn test_write_dict_keeps_given_order() {
    let mut encoder = Encoder::new(Vec::new());
    encoder
        .write_dict([("foo", Value::Integer(42)), ("bar", Value::string("spam"))])
        .unwrap();
    assert_eq!(encoder.into_inner().unwrap(), b"d3:fooi42e3:bar4:spame");
}

#[test]
fn test_native_types() {
    assert_eq!(encode(&7i32).unwrap(), b"i7e");
    assert_eq!(encode(&7u32).unwrap(), b"i7e");
    assert_eq!(encode(&7u64).unwrap(), b"i7e");
    assert_eq!(encode(&7usize).unwrap(), b"i7e");
    assert_eq!(encode(&String::from("hi")).unwrap(), b"2:hi");
    assert_eq!(encode(&Bytes::from_static(b"hi")).unwrap(), b"2:hi");
    assert_eq!(encode(&[1i64, 2, 3][..]).unwrap(), b"li1ei2ei3ee");
    assert_eq!(encode(&Some(5i64)).unwrap(), b"i5e");

    let mut files: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    files.insert("b".into(), vec![2]);
    files.insert("a".into(), vec![]);
    assert_eq!(encode(&files).unwrap(), b"d1:ale1:bli2eee");
}

#[test]
fn test_unsupported_values() {
    assert!(matches!(
        encode(&u64::MAX),
        Err(BencodeError::Unsupported(_))
    ));
    assert!(matches!(
        encode(&None::<i64>),
        Err(BencodeError::Unsupported(_))
    ));
    assert!(matches!(
        encode(&vec![Some(1i64), None]),
        Err(BencodeError::Unsupported(_))
    ));
}

#[test]
fn test_encoder_sequence() {
    let mut encoder = Encoder::new(Vec::new());
    encoder.write_integer(1).unwrap();
    encoder.write_string(b"ab").unwrap();
    encoder.write(&Value::List(vec![])).unwrap();
    assert_eq!(encoder.get_ref(), b"i1e2:able");
}

#[test]
fn test_encode_to_writer() {
    let mut out = Vec::new();
    encode_to(&Value::string("x"), &mut out).unwrap();
    encode_to("y", &mut out).unwrap();
    assert_eq!(out, b"1:x1:y");
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_io_errors_propagate() {
    let mut encoder = Encoder::new(FailingWriter);
    match encoder.write_integer(1) {
        Err(BencodeError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded).unwrap(), original);
}

#[test]
fn test_roundtrip_nested() {
    for data in [
        &b"le"[..],
        b"de",
        b"0:",
        b"l4:spaml1:aed1:a1:bee",
        b"d4:listl4:spami42eee",
        b"li-1ei0eli9223372036854775807eee",
    ] {
        let decoded = decode(data).unwrap();
        assert_eq!(encode(&decoded).unwrap(), data);
    }
}
