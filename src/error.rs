//! Unified error handling for relayd.
//!
//! Command handlers return [`HandlerError`]; the connection loop turns the
//! client-visible variants into notices and labels every variant for metrics.

use relay_proto::{ParseError, Reply, Usage};
use thiserror::Error;

/// Errors that can occur during command handling.
///
/// None of these mutate shared state: a failed command leaves the registry
/// exactly as it was.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("name in use: {0}")]
    NameInUse(String),

    /// Names shaped like `ip:port` belong to unrenamed connections.
    #[error("reserved name: {0}")]
    ReservedName(String),

    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("malformed command: {0}")]
    Malformed(#[from] ParseError),

    /// The sender's own outbound queue is already closed.
    #[error("session closed")]
    SessionClosed,
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NameInUse(_) => "name_in_use",
            Self::ReservedName(_) => "reserved_name",
            Self::NoSuchUser(_) => "no_such_user",
            Self::Malformed(_) => "malformed",
            Self::SessionClosed => "session_closed",
        }
    }

    /// Convert to the notice sent back to the client.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_reply(&self) -> Option<Reply> {
        match self {
            Self::NameInUse(name) => Some(Reply::NameInUse(name.clone())),
            Self::ReservedName(name) => Some(Reply::NameReserved(name.clone())),
            Self::NoSuchUser(name) => Some(Reply::NoSuchUser(name.clone())),
            Self::Malformed(err) => Some(Reply::Usage(Usage::from(*err))),
            Self::SessionClosed => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
