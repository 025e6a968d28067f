//! Error handling utilities for connection management.
//!
//! Classifies read-side failures into what the client is told and whether
//! the connection survives.

use relay_proto::{ProtocolError, Reply};

/// Classification of transport read errors for appropriate handling.
#[derive(Debug)]
pub(super) enum ReadErrorAction {
    /// Framing violation - tell the client why, then disconnect.
    FatalProtocolError { reply: Reply },
    /// I/O error - connection is broken, just log and disconnect.
    IoError,
}

/// Classify a transport read error into an actionable category.
///
/// A failed frame leaves the read stream in an unusable state, so nothing
/// here is recoverable.
pub(super) fn classify_read_error(e: &ProtocolError) -> ReadErrorAction {
    match e {
        ProtocolError::MessageTooLong { limit, .. } => ReadErrorAction::FatalProtocolError {
            reply: Reply::LineTooLong(*limit),
        },
        ProtocolError::InvalidUtf8 { .. } => ReadErrorAction::FatalProtocolError {
            reply: Reply::InvalidUtf8,
        },
        ProtocolError::Io(_) => ReadErrorAction::IoError,
    }
}
