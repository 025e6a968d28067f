//! Error types for the relay protocol.
//!
//! [`ProtocolError`] covers framing failures on the wire, [`ParseError`]
//! covers commands whose shape is recognised but whose fields are missing.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Framing errors raised by the line codec.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying transport failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum length.
    #[error("line too long: {actual} bytes (limit {limit})")]
    MessageTooLong {
        /// Bytes seen so far for the offending line.
        actual: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A complete line was not valid UTF-8.
    #[error("invalid utf-8 at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte.
        byte_pos: usize,
        /// Decoder diagnostic.
        details: String,
    },
}

/// A recognised command prefix with missing or empty fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `rename|` without a name.
    #[error("rename requires a name")]
    EmptyName,

    /// `to|` without a target name.
    #[error("private message requires a target")]
    MissingTarget,

    /// `to|<name>` or `to|<name>|` without content.
    #[error("private message requires content")]
    MissingContent,
}
