use std::collections::BTreeMap;
use std::io::Write;

use bytes::Bytes;
use tracing::debug;

use crate::constants::{DICT_TAG, END_TAG, LIST_TAG};
use crate::error::{BencodeError, Result};
use crate::value::Value;

/// Writes bencoded values to a byte sink.
///
/// Every call writes one complete value straight to the sink. Nothing is
/// buffered or read back; a failed write leaves the sink holding whatever
/// was written before the failure.
///
/// # Examples
///
/// ```
/// use bencodec::{Encoder, Value};
///
/// let mut encoder = Encoder::new(Vec::new());
/// encoder.write_integer(42).unwrap();
/// encoder.write_string("spam").unwrap();
/// encoder.write_list(&[Value::Integer(1), Value::string("two")]).unwrap();
/// assert_eq!(encoder.into_inner().unwrap(), b"i42e4:spamli1e3:twoe");
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the sink and hands it back.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Writes `i<decimal>e`.
    pub fn write_integer(&mut self, value: i64) -> Result<()> {
        write!(self.writer, "i{}e", value)?;
        Ok(())
    }

    /// Writes `<byte length>:<bytes>`. Text is written as its UTF-8 bytes.
    pub fn write_string<S: AsRef<[u8]> + ?Sized>(&mut self, s: &S) -> Result<()> {
        let bytes = s.as_ref();
        write!(self.writer, "{}:", bytes.len())?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Writes `l`, every item in iteration order, then `e`.
    pub fn write_list<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: ToBencode,
    {
        self.writer.write_all(&[LIST_TAG])?;
        for item in items {
            item.encode(self)?;
        }
        self.writer.write_all(&[END_TAG])?;
        Ok(())
    }

    /// Writes `d`, each key and value in iteration order, then `e`.
    ///
    /// Entries are not sorted. Pass a [`BTreeMap`] (or pre-sorted pairs) for
    /// canonical output.
    pub fn write_dict<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: ToBencode,
    {
        self.writer.write_all(&[DICT_TAG])?;
        for (key, value) in entries {
            self.write_string(key.as_ref())?;
            value.encode(self)?;
        }
        self.writer.write_all(&[END_TAG])?;
        Ok(())
    }

    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Integer(i) => self.write_integer(*i),
            Value::Bytes(b) => self.write_string(b),
            Value::List(l) => self.write_list(l),
            Value::Dict(d) => self.write_dict(d),
        }
    }

    /// Writes any value that has a bencode rendering.
    pub fn write<T: ToBencode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }
}

/// Types that can be written as bencode.
///
/// Implemented for [`Value`] and for the native types matching its
/// variants: integers, text and bytes, slices and vectors, and byte-keyed
/// [`BTreeMap`]s.
///
/// # Examples
///
/// ```
/// use bencodec::encode;
/// use std::collections::BTreeMap;
///
/// let mut info = BTreeMap::new();
/// info.insert("length", 1024i64);
/// info.insert("piece length", 16384i64);
/// assert_eq!(encode(&info).unwrap(), b"d6:lengthi1024e12:piece lengthi16384ee");
/// ```
pub trait ToBencode {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()>;
}

impl ToBencode for Value {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_value(self)
    }
}

impl<T: ToBencode + ?Sized> ToBencode for &T {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl ToBencode for i64 {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_integer(*self)
    }
}

impl ToBencode for i32 {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_integer(i64::from(*self))
    }
}

impl ToBencode for u32 {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_integer(i64::from(*self))
    }
}

impl ToBencode for u64 {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_integer(signed(*self)?)
    }
}

impl ToBencode for usize {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_integer(signed(*self as u64)?)
    }
}

fn signed(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| {
        debug!(value, "integer out of range for bencode");
        BencodeError::Unsupported(format!(
            "integer {} exceeds the signed 64-bit range",
            value
        ))
    })
}

impl ToBencode for str {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_string(self)
    }
}

impl ToBencode for String {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_string(self)
    }
}

impl ToBencode for Bytes {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_string(self)
    }
}

impl<T: ToBencode> ToBencode for [T] {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_list(self)
    }
}

impl<T: ToBencode> ToBencode for Vec<T> {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_list(self)
    }
}

impl<K: AsRef<[u8]>, V: ToBencode> ToBencode for BTreeMap<K, V> {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        encoder.write_dict(self)
    }
}

impl<T: ToBencode> ToBencode for Option<T> {
    fn encode<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
        match self {
            Some(value) => value.encode(encoder),
            None => Err(BencodeError::Unsupported(
                "bencode has no representation for an absent value".into(),
            )),
        }
    }
}

/// Encodes a value to a new byte vector.
///
/// # Examples
///
/// ```
/// use bencodec::{encode, Value};
///
/// assert_eq!(encode(&Value::Integer(-3)).unwrap(), b"i-3e");
/// assert_eq!(encode("").unwrap(), b"0:");
/// assert_eq!(encode(&vec!["spam", "eggs"]).unwrap(), b"l4:spam4:eggse");
/// ```
pub fn encode<T: ToBencode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Encodes a value into `writer`.
pub fn encode_to<T: ToBencode + ?Sized, W: Write>(value: &T, writer: W) -> Result<()> {
    let mut encoder = Encoder::new(writer);
    encoder.write(value)?;
    encoder.flush()
}

#[cfg(test)]
mod tests;
