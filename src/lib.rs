//! bencodec - Bencode reading and writing over `std::io`
//!
//! Bencode is the serialization format used throughout BitTorrent for
//! `.torrent` files, tracker responses and DHT messages. It has four value
//! kinds:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:bar4:spam3:fooi42ee` → {"bar": "spam", "foo": 42} |
//!
//! [`Decoder`] pulls values from any [`std::io::Read`] with a single byte of
//! lookahead, and [`Encoder`] pushes them to any [`std::io::Write`]. The
//! [`decode`] and [`encode`] functions cover the in-memory case.
//!
//! # Examples
//!
//! ```
//! use bencodec::{decode, encode, Value};
//! use bytes::Bytes;
//! use std::collections::BTreeMap;
//!
//! let value = decode(b"l4:spaml1:aed1:a1:bee").unwrap();
//! let items = value.as_list().unwrap();
//! assert_eq!(items[0].as_str(), Some("spam"));
//! assert_eq!(items[2].get(b"a").and_then(Value::as_str), Some("b"));
//!
//! let mut torrent = BTreeMap::new();
//! torrent.insert(Bytes::from_static(b"announce"), Value::string("http://tracker.example.com/announce"));
//! torrent.insert(Bytes::from_static(b"comment"), Value::string("hi"));
//! let bytes = encode(&Value::Dict(torrent)).unwrap();
//! assert_eq!(&bytes[..], &b"d8:announce35:http://tracker.example.com/announce7:comment2:hie"[..]);
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended inside a value
//! - [`BencodeError::Malformed`] - Input breaks the grammar (bad tag, missing digit, stray sign)
//! - [`BencodeError::InvalidUtf8`] - A string payload is not UTF-8
//! - [`BencodeError::NestingTooDeep`] - Containers nest deeper than [`DecoderConfig::max_depth`]
//! - [`BencodeError::Unsupported`] - A native value has no bencode form
//! - [`BencodeError::Io`] - The underlying reader or writer failed

pub mod config;
pub mod constants;
mod decode;
mod encode;
mod error;
mod value;

pub use config::{DecoderConfig, IntegerPolicy};
pub use decode::{decode, decode_all, Decoder};
pub use encode::{encode, encode_to, Encoder, ToBencode};
pub use error::{BencodeError, Result};
pub use value::Value;
