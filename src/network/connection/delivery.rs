//! Per-session delivery task.
//!
//! Owns the write side of the socket. Drains the session's queue in order,
//! writing each line plus a terminator, and shuts the write side down once
//! the queue is closed and empty.

use crate::metrics;
use crate::state::Outbox;
use futures_util::SinkExt;
use relay_proto::{LineCodec, ProtocolError};
use tokio::io::AsyncWrite;
use tokio_util::codec::FramedWrite;

pub(super) type DeliveryResult = Result<(), ProtocolError>;

/// Write queued lines until the queue closes or a write fails.
pub(super) async fn run_delivery<W>(writer: W, mut outbox: Outbox) -> DeliveryResult
where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, LineCodec::new());
    while let Some(line) = outbox.recv().await {
        sink.send(line).await?;
        metrics::inc_lines_sent();
    }
    sink.close().await
}
