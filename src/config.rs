use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_LEN};

/// How the decoder treats integers that do not fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerPolicy {
    /// Reject out-of-range integers as malformed.
    #[default]
    Checked,
    /// Wrap around using two's-complement arithmetic.
    Wrapping,
}

/// Limits and policies applied by a [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```
/// use bencodec::{DecoderConfig, IntegerPolicy};
///
/// let config = DecoderConfig::default()
///     .with_max_depth(8)
///     .with_integer_policy(IntegerPolicy::Wrapping);
/// assert_eq!(config.max_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum nesting of lists and dictionaries.
    pub max_depth: usize,
    /// Largest string length prefix the decoder will accept.
    pub max_string_len: usize,
    /// Overflow handling for integers.
    pub integer_policy: IntegerPolicy,
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn with_integer_policy(mut self, integer_policy: IntegerPolicy) -> Self {
        self.integer_policy = integer_policy;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            integer_policy: IntegerPolicy::Checked,
        }
    }
}
