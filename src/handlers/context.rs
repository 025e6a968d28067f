//! Handler context.

use crate::error::HandlerResult;
use crate::state::{Hub, Session};
use relay_proto::Reply;
use std::sync::Arc;

/// Everything a handler may touch: the shared hub and the sending session.
pub struct Context<'a> {
    /// Shared relay state.
    pub hub: &'a Arc<Hub>,
    /// The session the line came from.
    pub session: &'a Arc<Session>,
}

impl<'a> Context<'a> {
    pub fn new(hub: &'a Arc<Hub>, session: &'a Arc<Session>) -> Self {
        Self { hub, session }
    }

    /// Send a reply to the originating session.
    pub fn reply(&self, reply: Reply) -> HandlerResult {
        self.session.reply(reply)
    }
}
