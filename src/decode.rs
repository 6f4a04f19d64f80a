use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::{DecoderConfig, IntegerPolicy};
use crate::constants::{DICT_TAG, END_TAG, INTEGER_TAG, LENGTH_SEPARATOR, LIST_TAG};
use crate::error::{BencodeError, Result};
use crate::value::Value;

/// Initial buffer for string payloads; grows as bytes actually arrive.
const INITIAL_STRING_CAPACITY: usize = 4096;

/// Reads bencoded values from a byte source.
///
/// The decoder pulls exactly the bytes of the values it is asked for, plus at
/// most one byte of lookahead which it holds itself. It does no other
/// buffering, so wrap slow sources in a [`std::io::BufReader`] if needed.
///
/// # Examples
///
/// ```
/// use bencodec::{Decoder, Value};
///
/// let mut decoder = Decoder::new(&b"i42e4:spam"[..]);
/// assert_eq!(decoder.read_value().unwrap(), Some(Value::Integer(42)));
/// assert_eq!(decoder.read_value().unwrap(), Some(Value::string("spam")));
/// assert_eq!(decoder.read_value().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    peeked: Option<u8>,
    config: DecoderConfig,
    depth: usize,
    failed: bool,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            peeked: None,
            config,
            depth: 0,
            failed: false,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Mutable access to the source. Reading from it directly while a byte
    /// is held in lookahead will skip that byte.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Releases the underlying source. A byte held in lookahead is dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads the next value.
    ///
    /// Returns `Ok(None)` if the source is exhausted before the first byte of
    /// a value. Running out of input after that is
    /// [`BencodeError::UnexpectedEof`].
    ///
    /// Integers, lists and dictionaries are recognised by their tag byte;
    /// anything else is read as a string, so a stray byte surfaces as a
    /// malformed string length.
    pub fn read_value(&mut self) -> Result<Option<Value>> {
        let tag = match self.peek_byte()? {
            Some(tag) => tag,
            None => return Ok(None),
        };
        trace!(tag = %tag.escape_ascii(), depth = self.depth, "reading value");

        let value = match tag {
            INTEGER_TAG => Value::Integer(self.read_integer()?),
            LIST_TAG => Value::List(self.read_list()?),
            DICT_TAG => Value::Dict(self.read_dict()?),
            _ => Value::Bytes(self.read_string()?),
        };
        Ok(Some(value))
    }

    /// Reads an integer of the form `i` `-`? digit+ `e`.
    ///
    /// Leading zeros and `-0` are accepted; `i-0e` reads as `0`. Values
    /// outside the `i64` range are handled per
    /// [`DecoderConfig::integer_policy`].
    pub fn read_integer(&mut self) -> Result<i64> {
        self.expect_tag(INTEGER_TAG, "integer")?;

        let mut value: i64 = 0;
        let mut negative = false;
        let mut read_digit = false;
        loop {
            let cur = self.force_read()?;
            match cur {
                b'-' if !negative && !read_digit => negative = true,
                b'0'..=b'9' => {
                    read_digit = true;
                    value = self.push_digit(value, i64::from(cur - b'0'), negative)?;
                }
                END_TAG if read_digit => return Ok(value),
                END_TAG => {
                    return Err(BencodeError::Malformed {
                        reason: "integer must contain at least one digit".into(),
                        byte: Some(cur),
                    })
                }
                _ => return Err(BencodeError::unexpected(cur, "integer")),
            }
        }
    }

    // Negative values accumulate downwards so that i64::MIN is reachable.
    fn push_digit(&self, value: i64, digit: i64, negative: bool) -> Result<i64> {
        match self.config.integer_policy {
            IntegerPolicy::Checked => {
                let shifted = value.checked_mul(10);
                let next = if negative {
                    shifted.and_then(|v| v.checked_sub(digit))
                } else {
                    shifted.and_then(|v| v.checked_add(digit))
                };
                next.ok_or_else(|| BencodeError::malformed("integer overflow"))
            }
            IntegerPolicy::Wrapping => {
                let shifted = value.wrapping_mul(10);
                Ok(if negative {
                    shifted.wrapping_sub(digit)
                } else {
                    shifted.wrapping_add(digit)
                })
            }
        }
    }

    fn read_length(&mut self) -> Result<usize> {
        let mut len: usize = 0;
        let mut read_digit = false;
        loop {
            let cur = self.force_read()?;
            match cur {
                b'0'..=b'9' => {
                    read_digit = true;
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(cur - b'0')))
                        .ok_or_else(|| BencodeError::malformed("string length overflow"))?;
                }
                LENGTH_SEPARATOR if read_digit => return Ok(len),
                LENGTH_SEPARATOR => {
                    return Err(BencodeError::Malformed {
                        reason: "string length must contain at least one digit".into(),
                        byte: Some(cur),
                    })
                }
                _ => return Err(BencodeError::unexpected(cur, "string length")),
            }
        }
    }

    /// Reads a length-prefixed string such as `4:spam`.
    ///
    /// The payload must be valid UTF-8.
    pub fn read_string(&mut self) -> Result<Bytes> {
        let len = self.read_length()?;
        if len > self.config.max_string_len {
            return Err(BencodeError::malformed(format!(
                "string length {} exceeds limit of {}",
                len, self.config.max_string_len
            )));
        }
        if len == 0 {
            return Ok(Bytes::new());
        }

        let mut buf = Vec::with_capacity(len.min(INITIAL_STRING_CAPACITY));
        if let Some(b) = self.peeked.take() {
            buf.push(b);
        }
        let remaining = (len - buf.len()) as u64;
        (&mut self.reader)
            .take(remaining)
            .read_to_end(&mut buf)
            .map_err(eof_to_unexpected)?;
        if buf.len() != len {
            return Err(BencodeError::UnexpectedEof);
        }

        std::str::from_utf8(&buf)?;
        Ok(Bytes::from(buf))
    }

    /// Reads a list such as `l4:spami42ee`.
    pub fn read_list(&mut self) -> Result<Vec<Value>> {
        self.expect_tag(LIST_TAG, "list")?;
        self.enter()?;
        let result = self.read_list_items();
        self.depth -= 1;
        result
    }

    fn read_list_items(&mut self) -> Result<Vec<Value>> {
        let mut list = Vec::new();
        while self.force_peek()? != END_TAG {
            let value = self.read_value()?.ok_or(BencodeError::UnexpectedEof)?;
            list.push(value);
        }
        self.force_read()?;
        Ok(list)
    }

    /// Reads a dictionary such as `d3:bar4:spam3:fooi42ee`.
    ///
    /// Keys are always read as strings. When a key repeats, the last value
    /// wins.
    pub fn read_dict(&mut self) -> Result<BTreeMap<Bytes, Value>> {
        self.expect_tag(DICT_TAG, "dict")?;
        self.enter()?;
        let result = self.read_dict_entries();
        self.depth -= 1;
        result
    }

    fn read_dict_entries(&mut self) -> Result<BTreeMap<Bytes, Value>> {
        let mut dict = BTreeMap::new();
        while self.force_peek()? != END_TAG {
            let key = self.read_string()?;
            let value = self.read_value()?.ok_or(BencodeError::UnexpectedEof)?;
            dict.insert(key, value);
        }
        self.force_read()?;
        Ok(dict)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(BencodeError::NestingTooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn expect_tag(&mut self, tag: u8, what: &str) -> Result<()> {
        let cur = self.force_read()?;
        if cur != tag {
            return Err(BencodeError::Malformed {
                reason: format!(
                    "{} must start with '{}', not '{}'",
                    what,
                    tag as char,
                    cur.escape_ascii()
                ),
                byte: Some(cur),
            });
        }
        Ok(())
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if let Some(b) = self.peeked.take() {
            return Ok(Some(b));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.next_byte()?;
        }
        Ok(self.peeked)
    }

    fn force_read(&mut self) -> Result<u8> {
        self.next_byte()?.ok_or(BencodeError::UnexpectedEof)
    }

    fn force_peek(&mut self) -> Result<u8> {
        self.peek_byte()?.ok_or(BencodeError::UnexpectedEof)
    }
}

/// Yields values until the source is cleanly exhausted. Iteration stops
/// after the first error.
impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_value() {
            Ok(value) => value.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

fn eof_to_unexpected(e: std::io::Error) -> BencodeError {
    if e.kind() == ErrorKind::UnexpectedEof {
        BencodeError::UnexpectedEof
    } else {
        BencodeError::Io(e)
    }
}

/// Decodes exactly one value from `data`.
///
/// Empty input is [`BencodeError::UnexpectedEof`] and bytes left over after
/// the value are [`BencodeError::TrailingData`].
///
/// # Examples
///
/// ```
/// use bencodec::{decode, BencodeError, Value};
///
/// assert_eq!(decode(b"i-3e").unwrap(), Value::Integer(-3));
/// assert!(matches!(decode(b"i42eextra"), Err(BencodeError::TrailingData)));
/// ```
pub fn decode(data: &[u8]) -> Result<Value> {
    let mut decoder = Decoder::new(data);
    let result = decoder
        .read_value()
        .and_then(|value| value.ok_or(BencodeError::UnexpectedEof))
        .and_then(|value| match decoder.peek_byte()? {
            Some(_) => Err(BencodeError::TrailingData),
            None => Ok(value),
        });
    if let Err(e) = &result {
        debug!(error = %e, len = data.len(), "rejected bencode input");
    }
    result
}

/// Decodes every value in `data`, back to back, until the input is used up.
///
/// # Examples
///
/// ```
/// use bencodec::{decode_all, Value};
///
/// let values = decode_all(b"i1ei2e").unwrap();
/// assert_eq!(values, vec![Value::Integer(1), Value::Integer(2)]);
/// ```
pub fn decode_all(data: &[u8]) -> Result<Vec<Value>> {
    let result: Result<Vec<Value>> = Decoder::new(data).collect();
    if let Err(e) = &result {
        debug!(error = %e, len = data.len(), "rejected bencode input");
    }
    result
}
