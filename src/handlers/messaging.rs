//! Public and private messages.
//!
//! Public text goes through the broadcast queue and the dispatcher. Private
//! text is pushed straight onto the recipient's delivery queue, so its order
//! relative to a concurrent broadcast is unspecified.

use super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use relay_proto::Reply;
use tracing::debug;

/// `to|<target>|<content>`: deliver to one online session.
pub fn handle_private(ctx: &Context<'_>, target: &str, content: &str) -> HandlerResult {
    let Some(recipient) = ctx.hub.registry.lookup(target) else {
        return Err(HandlerError::NoSuchUser(target.to_string()));
    };

    let line = Reply::Private {
        from: ctx.session.name(),
        text: content.to_string(),
    };
    // The recipient may have closed between lookup and send.
    if !recipient.send(line) {
        return Err(HandlerError::NoSuchUser(target.to_string()));
    }

    metrics::inc_private_messages();
    debug!(to = %target, "Private message delivered");
    Ok(())
}

/// Anything else: broadcast tagged with the sender's address and name.
pub fn handle_public(ctx: &Context<'_>, text: &str) -> HandlerResult {
    ctx.hub.broadcast(ctx.session, text);
    Ok(())
}
