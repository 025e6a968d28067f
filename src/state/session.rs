//! Per-connection session state.
//!
//! A `Session` is shared between its connection task (which owns the read
//! side of the socket), its delivery task (which owns the write side) and,
//! while online, the [`Registry`](super::Registry).

use crate::error::{HandlerError, HandlerResult};
use parking_lot::{Mutex, RwLock};
use relay_proto::Reply;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receiving end of a session's delivery queue, drained by its delivery task.
pub type Outbox = mpsc::UnboundedReceiver<String>;

/// A connected client.
#[derive(Debug)]
pub struct Session {
    /// Remote address, also the initial display name.
    addr: String,
    /// Display name. Only written by the registry while it holds its
    /// exclusive lock, so registry readers always see keys equal to names.
    name: RwLock<String>,
    /// Sending end of the delivery queue; `None` once closed.
    outbox: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

impl Session {
    /// Create a session for a freshly accepted connection.
    ///
    /// Returns the shared session and the receiving end of its delivery queue.
    pub fn new(addr: SocketAddr) -> (Arc<Self>, Outbox) {
        Self::with_name(addr.to_string())
    }

    /// Create a session whose address and initial name are `addr`.
    pub fn with_name(addr: impl Into<String>) -> (Arc<Self>, Outbox) {
        let addr = addr.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Arc::new(Self {
            name: RwLock::new(addr.clone()),
            addr,
            outbox: Mutex::new(Some(tx)),
        });
        (session, rx)
    }

    /// Remote address as shown in broadcasts.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Current display name.
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub(super) fn set_name(&self, name: &str) {
        *self.name.write() = name.to_string();
    }

    /// Queue a line for delivery.
    ///
    /// Returns `false` if the queue was closed or the delivery task is gone.
    pub fn send(&self, line: impl Into<String>) -> bool {
        match self.outbox.lock().as_ref() {
            Some(tx) => tx.send(line.into()).is_ok(),
            None => false,
        }
    }

    /// Queue a server reply to this session.
    pub fn reply(&self, reply: Reply) -> HandlerResult {
        if self.send(reply) {
            Ok(())
        } else {
            Err(HandlerError::SessionClosed)
        }
    }

    /// Close the delivery queue.
    ///
    /// Lines already queued are still delivered. Returns `true` only for the
    /// call that actually closed it; later calls are no-ops.
    pub fn close(&self) -> bool {
        self.outbox.lock().take().is_some()
    }

    #[cfg(test)]
    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.outbox.lock().is_none()
    }
}
