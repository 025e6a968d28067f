//! Server to client lines.
//!
//! Broadcasts are tagged `[<address>]<name>: <text>`; everything else is a
//! plain notice line. `Display` renders the line without its terminator.

use std::fmt;

use crate::error::ParseError;

/// Text of the join announcement.
pub const JOINED: &str = "joined";

/// Text of the leave announcement.
pub const LEFT: &str = "left";

/// Which command a usage notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// `rename|<name>`
    Rename,
    /// `to|<name>|<content>`
    Private,
}

impl Usage {
    /// Expected syntax, as shown to the user.
    pub fn syntax(self) -> &'static str {
        match self {
            Usage::Rename => "rename|<name>",
            Usage::Private => "to|<name>|<message>",
        }
    }
}

impl From<ParseError> for Usage {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::EmptyName => Usage::Rename,
            ParseError::MissingTarget | ParseError::MissingContent => Usage::Private,
        }
    }
}

/// A line sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Public message from a session, also used for join/leave notices.
    Broadcast {
        /// Remote address of the speaker.
        addr: String,
        /// Display name of the speaker.
        name: String,
        /// Message body.
        text: String,
    },
    /// One entry of a `who` listing.
    Online {
        /// Remote address of the listed session.
        addr: String,
        /// Display name of the listed session.
        name: String,
    },
    /// The sender's rename succeeded.
    Renamed(String),
    /// The requested name is held by another session.
    NameInUse(String),
    /// The requested name has the shape of a connection address.
    NameReserved(String),
    /// No online session has this name.
    NoSuchUser(String),
    /// A recognised command was malformed.
    Usage(Usage),
    /// Point-to-point message.
    Private {
        /// Display name of the sender.
        from: String,
        /// Message body.
        text: String,
    },
    /// The session was evicted for inactivity.
    Kicked,
    /// An inbound line exceeded the limit; the connection is closed.
    LineTooLong(usize),
    /// An inbound line was not UTF-8; the connection is closed.
    InvalidUtf8,
}

impl Reply {
    /// Public message tagged with the speaker's address and name.
    pub fn broadcast(addr: &str, name: &str, text: &str) -> Self {
        Reply::Broadcast {
            addr: addr.to_string(),
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    /// Join announcement for a session.
    pub fn joined(addr: &str, name: &str) -> Self {
        Self::broadcast(addr, name, JOINED)
    }

    /// Leave announcement for a session.
    pub fn left(addr: &str, name: &str) -> Self {
        Self::broadcast(addr, name, LEFT)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Broadcast { addr, name, text } => write!(f, "[{addr}]{name}: {text}"),
            Reply::Online { addr, name } => write!(f, "[{addr}]{name}: online"),
            Reply::Renamed(name) => write!(f, "you are now known as {name}"),
            Reply::NameInUse(name) => write!(f, "name {name} is already in use"),
            Reply::NameReserved(name) => {
                write!(f, "name {name} is reserved for connection addresses")
            }
            Reply::NoSuchUser(name) => write!(f, "no such user: {name}"),
            Reply::Usage(usage) => write!(f, "usage: {}", usage.syntax()),
            Reply::Private { from, text } => write!(f, "{from} (private): {text}"),
            Reply::Kicked => f.write_str("you have been kicked for inactivity"),
            Reply::LineTooLong(limit) => write!(f, "line too long (limit {limit} bytes)"),
            Reply::InvalidUtf8 => f.write_str("line is not valid utf-8"),
        }
    }
}

impl From<Reply> for String {
    fn from(reply: Reply) -> Self {
        reply.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_format() {
        let reply = Reply::broadcast("10.0.0.1:4000", "ann", "hello");
        assert_eq!(reply.to_string(), "[10.0.0.1:4000]ann: hello");
        assert_eq!(
            Reply::joined("10.0.0.1:4000", "ann").to_string(),
            "[10.0.0.1:4000]ann: joined"
        );
    }

    #[test]
    fn test_notices() {
        assert_eq!(Reply::Renamed("x".into()).to_string(), "you are now known as x");
        assert_eq!(Reply::NoSuchUser("z".into()).to_string(), "no such user: z");
        assert_eq!(
            Reply::NameReserved("1.2.3.4:5".into()).to_string(),
            "name 1.2.3.4:5 is reserved for connection addresses"
        );
        assert_eq!(
            Reply::Usage(Usage::Private).to_string(),
            "usage: to|<name>|<message>"
        );
        assert_eq!(
            Reply::Private { from: "a".into(), text: "psst".into() }.to_string(),
            "a (private): psst"
        );
    }

    #[test]
    fn test_usage_from_parse_error() {
        assert_eq!(Usage::from(ParseError::EmptyName), Usage::Rename);
        assert_eq!(Usage::from(ParseError::MissingContent), Usage::Private);
    }
}
