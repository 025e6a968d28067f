//! Command handlers.
//!
//! [`dispatch`] parses one inbound line and routes it, in priority order, to
//! `who`, `rename|`, `to|` or the public broadcast. Handlers never await:
//! every effect is a registry operation or a push onto an unbounded queue.

mod context;
mod messaging;
mod query;
mod rename;

pub use context::Context;

use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use relay_proto::Command;
use tracing::debug;

/// Route one line from an active session.
///
/// Client-visible failures come back as `Err`; the caller turns them into
/// notices with [`HandlerError::to_reply`].
pub fn dispatch(ctx: &Context<'_>, line: &str) -> HandlerResult {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            metrics::record_command_error("malformed", "malformed");
            return Err(HandlerError::Malformed(e));
        }
    };
    let name = command.name();
    metrics::record_command(name);
    debug!(command = name, "Dispatching command");

    let result = match command {
        Command::Who => query::handle_who(ctx),
        Command::Rename(new_name) => rename::handle_rename(ctx, &new_name),
        Command::Private { target, content } => messaging::handle_private(ctx, &target, &content),
        Command::Public(text) => messaging::handle_public(ctx, &text),
    };

    if let Err(e) = &result {
        metrics::record_command_error(name, e.error_code());
    }
    result
}
