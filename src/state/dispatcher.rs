//! Broadcast dispatcher.
//!
//! A single task drains the broadcast queue in FIFO order and copies each
//! line onto the delivery queue of every online session. The registry lock
//! is held for the whole fan-out of one line, so a session that joins or
//! leaves concurrently either gets the entire line or none of it.

use super::{BroadcastQueue, Hub};
use crate::metrics;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Run the dispatcher until the broadcast queue closes.
#[instrument(skip_all, name = "dispatcher")]
pub async fn run_dispatcher(hub: Arc<Hub>, mut queue: BroadcastQueue) {
    info!("Broadcast dispatcher started");
    while let Some(line) = queue.recv().await {
        let recipients = fan_out(&hub, &line);
        debug!(recipients, "Broadcast dispatched");
    }
    info!("Broadcast queue closed - dispatcher exiting");
}

/// Deliver one line to every online session. Returns the number reached.
///
/// A shared lock suffices: every registry mutation needs the exclusive one.
pub fn fan_out(hub: &Hub, line: &str) -> usize {
    let mut delivered = 0;
    hub.registry.for_each(|session| {
        // A closed queue just means the session is on its way out.
        if session.send(line) {
            delivered += 1;
        }
    });
    metrics::record_broadcast(delivered);
    delivered
}
