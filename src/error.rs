use thiserror::Error;

/// Errors that can occur while reading or writing bencode.
///
/// Reaching the end of the input before a value has started is not an
/// error: [`Decoder::read_value`](crate::Decoder::read_value) reports it as
/// `Ok(None)`. Running out of input inside a value is
/// [`BencodeError::UnexpectedEof`].
#[derive(Debug, Error)]
pub enum BencodeError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The input does not follow the bencode grammar.
    #[error("malformed bencode: {reason}")]
    Malformed {
        /// Human-readable description of what went wrong.
        reason: String,
        /// The byte that triggered the failure, if there was one.
        byte: Option<u8>,
    },

    /// A string payload is not valid UTF-8.
    #[error("invalid utf-8 in string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A native value has no bencode representation.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Lists and dictionaries are nested deeper than the decoder allows.
    #[error("nesting too deep")]
    NestingTooDeep,

    /// Extra bytes follow a complete value.
    #[error("trailing data after value")]
    TrailingData,

    /// The underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        BencodeError::Malformed {
            reason: reason.into(),
            byte: None,
        }
    }

    pub(crate) fn unexpected(byte: u8, context: &str) -> Self {
        BencodeError::Malformed {
            reason: format!(
                "unexpected character '{}' when reading {}",
                byte.escape_ascii(),
                context
            ),
            byte: Some(byte),
        }
    }

    /// Returns `true` if the input ended inside a value.
    pub fn is_eof(&self) -> bool {
        matches!(self, BencodeError::UnexpectedEof)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BencodeError>;
