//! Client commands.
//!
//! Commands are matched in priority order: the exact text `who`, then the
//! `rename|` prefix, then the `to|` prefix. Everything else is public chat.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Exact text of the listing command.
pub const WHO: &str = "who";

/// Prefix of the rename command.
pub const RENAME_PREFIX: &str = "rename|";

/// Prefix of the private message command.
pub const TO_PREFIX: &str = "to|";

/// Field separator inside prefixed commands.
const SEPARATOR: char = '|';

/// A command sent by a client, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every online session.
    Who,
    /// Change the sender's display name.
    Rename(String),
    /// Deliver `content` to `target` only.
    Private {
        /// Display name of the recipient.
        target: String,
        /// Message body; may itself contain `|`.
        content: String,
    },
    /// Broadcast to everybody online.
    Public(String),
}

impl Command {
    /// Build a private message command.
    pub fn private(target: impl Into<String>, content: impl Into<String>) -> Self {
        Command::Private {
            target: target.into(),
            content: content.into(),
        }
    }

    /// Static name for logging and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Who => "who",
            Command::Rename(_) => "rename",
            Command::Private { .. } => "to",
            Command::Public(_) => "public",
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if line == WHO {
            return Ok(Command::Who);
        }

        if let Some(rest) = line.strip_prefix(RENAME_PREFIX) {
            // The name ends at the next separator, anything after it is ignored.
            let name = rest.split(SEPARATOR).next().unwrap_or_default();
            if name.is_empty() {
                return Err(ParseError::EmptyName);
            }
            return Ok(Command::Rename(name.to_string()));
        }

        if let Some(rest) = line.strip_prefix(TO_PREFIX) {
            let mut fields = rest.splitn(2, SEPARATOR);
            let target = fields.next().unwrap_or_default();
            if target.is_empty() {
                return Err(ParseError::MissingTarget);
            }
            let content = fields.next().unwrap_or_default();
            if content.is_empty() {
                return Err(ParseError::MissingContent);
            }
            return Ok(Command::private(target, content));
        }

        Ok(Command::Public(line.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Who => f.write_str(WHO),
            Command::Rename(name) => write!(f, "{RENAME_PREFIX}{name}"),
            Command::Private { target, content } => {
                write!(f, "{TO_PREFIX}{target}{SEPARATOR}{content}")
            }
            Command::Public(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_who_must_match_exactly() {
        assert_eq!("who".parse::<Command>(), Ok(Command::Who));
        assert_eq!(
            "who is here".parse::<Command>(),
            Ok(Command::Public("who is here".to_string()))
        );
        assert_eq!("WHO".parse::<Command>(), Ok(Command::Public("WHO".to_string())));
    }

    #[test]
    fn test_rename_takes_first_field() {
        assert_eq!(
            "rename|alice".parse::<Command>(),
            Ok(Command::Rename("alice".to_string()))
        );
        assert_eq!(
            "rename|alice|ignored".parse::<Command>(),
            Ok(Command::Rename("alice".to_string()))
        );
        assert_eq!("rename|".parse::<Command>(), Err(ParseError::EmptyName));
        assert_eq!("rename||x".parse::<Command>(), Err(ParseError::EmptyName));
    }

    #[test]
    fn test_private_message_shapes() {
        assert_eq!(
            "to|bob|hello".parse::<Command>(),
            Ok(Command::private("bob", "hello"))
        );
        assert_eq!(
            "to|bob|a|b|c".parse::<Command>(),
            Ok(Command::private("bob", "a|b|c"))
        );
        assert_eq!("to|".parse::<Command>(), Err(ParseError::MissingTarget));
        assert_eq!("to||hello".parse::<Command>(), Err(ParseError::MissingTarget));
        assert_eq!("to|bob".parse::<Command>(), Err(ParseError::MissingContent));
        assert_eq!("to|bob|".parse::<Command>(), Err(ParseError::MissingContent));
    }

    #[test]
    fn test_anything_else_is_public() {
        for line in ["hello", "to", "rename", "tomorrow|x", ""] {
            assert_eq!(
                line.parse::<Command>(),
                Ok(Command::Public(line.to_string())),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn test_display_produces_wire_form() {
        assert_eq!(Command::Who.to_string(), "who");
        assert_eq!(Command::Rename("zed".into()).to_string(), "rename|zed");
        assert_eq!(Command::private("zed", "yo").to_string(), "to|zed|yo");
        assert_eq!(Command::Public("plain".into()).to_string(), "plain");
    }
}
