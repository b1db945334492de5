//! # Error Types
//!
//! Errors raised by the shared field codecs.

use thiserror::Error;

/// Errors decoding hex and hex-or-decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Text contains non-hex characters or has odd length.
    #[error("invalid hex string {0:?}")]
    InvalidHex(String),

    /// Decoded bytes do not fit the fixed-width target.
    #[error("hex string has {actual} bytes, want {expected}")]
    InvalidLength { expected: usize, actual: usize },

    /// Text is neither a hex (`0x`) nor a decimal unsigned integer in range.
    #[error("invalid unsigned integer {0:?}")]
    InvalidInteger(String),
}
