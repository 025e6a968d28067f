//! The Hub - central shared state for the relay.
//!
//! Holds the session registry and the producer side of the broadcast queue.
//! One `Hub` exists per process and is shared behind an `Arc` by the
//! gateway, every connection task and the dispatcher.

use super::{Registry, Session};
use crate::config::Config;
use crate::metrics;
use relay_proto::Reply;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Consumer side of the broadcast queue, owned by the dispatcher.
pub type BroadcastQueue = mpsc::UnboundedReceiver<String>;

/// This server's identity and per-connection settings.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    /// Inbound silence that gets a session evicted.
    pub idle_timeout: Duration,
    /// Maximum inbound line length in bytes.
    pub max_line_len: usize,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            idle_timeout: config.timeouts.idle_duration(),
            max_line_len: config.limits.max_line_len,
        }
    }
}

/// Central shared state container.
pub struct Hub {
    /// This server's identity.
    pub server_info: ServerInfo,
    /// Online sessions by display name.
    pub registry: Registry,
    /// Producer side of the process-wide broadcast queue.
    broadcast_tx: mpsc::UnboundedSender<String>,
}

impl Hub {
    /// Create the hub and the broadcast queue consumer for the dispatcher.
    pub fn new(server_info: ServerInfo) -> (Self, BroadcastQueue) {
        let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();
        let hub = Self {
            server_info,
            registry: Registry::new(),
            broadcast_tx,
        };
        (hub, broadcast_rx)
    }

    /// Bring a session online: register it, then announce it.
    pub fn online(&self, session: &Arc<Session>) {
        self.registry.add(session);
        metrics::set_online_sessions(self.registry.len());
        info!(addr = %session.addr(), name = %session.name(), "Session online");
        self.publish(Reply::joined(session.addr(), &session.name()));
    }

    /// Take a session offline: unregister it, then announce it.
    ///
    /// Returns `false` (and announces nothing) if it was already offline.
    pub fn offline(&self, session: &Arc<Session>) -> bool {
        if !self.registry.remove(session) {
            return false;
        }
        metrics::set_online_sessions(self.registry.len());
        info!(addr = %session.addr(), name = %session.name(), "Session offline");
        self.publish(Reply::left(session.addr(), &session.name()));
        true
    }

    /// Queue a public message from `session` for every online session.
    pub fn broadcast(&self, session: &Session, text: &str) {
        self.publish(Reply::broadcast(session.addr(), &session.name(), text));
    }

    /// Push a preformatted line onto the broadcast queue. Never blocks.
    pub fn publish(&self, line: impl Into<String>) {
        // The dispatcher holds the receiver for the life of the process.
        let _ = self.broadcast_tx.send(line.into());
    }
}
