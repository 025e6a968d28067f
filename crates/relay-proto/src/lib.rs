//! # relay-proto
//!
//! Wire protocol shared by the `relayd` server and the `relay` terminal
//! client.
//!
//! The protocol is line oriented: every frame is a UTF-8 line terminated by
//! `\n` (a preceding `\r` is tolerated and stripped).
//!
//! - [`Command`]: what a client may send (`who`, `rename|<name>`,
//!   `to|<name>|<content>`, or any other text as a public message).
//! - [`Reply`]: every line the server sends back.
//! - [`LineCodec`]: a `tokio_util` codec framing those lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use relay_proto::{Command, Reply};
//!
//! let cmd: Command = "to|alice|hi there".parse().expect("valid command");
//! assert_eq!(cmd, Command::Private { target: "alice".into(), content: "hi there".into() });
//!
//! let line = Reply::Broadcast {
//!     addr: "127.0.0.1:5000".into(),
//!     name: "bob".into(),
//!     text: "hello".into(),
//! };
//! assert_eq!(line.to_string(), "[127.0.0.1:5000]bob: hello");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod reply;

pub use self::command::{Command, RENAME_PREFIX, TO_PREFIX, WHO};
pub use self::error::{ParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::reply::{Reply, Usage};
