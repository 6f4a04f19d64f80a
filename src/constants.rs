//! Wire-format tags and decoder defaults.

// ============================================================================
// Tag bytes
// ============================================================================

/// Leading byte of an integer.
pub const INTEGER_TAG: u8 = b'i';

/// Leading byte of a list.
pub const LIST_TAG: u8 = b'l';

/// Leading byte of a dictionary.
pub const DICT_TAG: u8 = b'd';

/// Terminates integers, lists and dictionaries.
pub const END_TAG: u8 = b'e';

/// Separates a string's length prefix from its payload.
pub const LENGTH_SEPARATOR: u8 = b':';

// ============================================================================
// Decoder limits
// ============================================================================

/// Default maximum nesting of lists and dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default upper bound on a single string payload (64 MiB).
///
/// Large enough for the `pieces` field of multi-terabyte torrents.
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;
