//! `who`: list every online session to the requester.

use super::Context;
use crate::error::HandlerResult;
use relay_proto::Reply;

/// Queue one `[addr]name: online` line per session.
///
/// The whole listing is one registry snapshot.
pub fn handle_who(ctx: &Context<'_>) -> HandlerResult {
    let entries = ctx.hub.registry.snapshot(|session| Reply::Online {
        addr: session.addr().to_string(),
        name: session.name(),
    });

    for entry in entries {
        ctx.reply(entry)?;
    }
    Ok(())
}
