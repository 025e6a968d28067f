//! Connection handling.
//!
//! One task per accepted socket. The task owns the read side; a spawned
//! delivery task owns the write side and drains the session's queue.
//!
//! Lifecycle:
//! 1. Register the session and announce it (`Hub::online`)
//! 2. Read lines until the client leaves, the watchdog fires or a write fails
//! 3. Queue any farewell notice, close the queue, unregister and announce
//! 4. Let delivery flush and shut down the write side, then drop the reader

mod delivery;
mod error_handling;
mod event_loop;
mod liveness;

use crate::handlers::Context;
use crate::metrics;
use crate::state::{Hub, Outbox, Session};
use delivery::{DeliveryResult, run_delivery};
use event_loop::{Exit, event_loop};
use liveness::{Activity, ActivityReader, Watchdog};
use relay_proto::LineCodec;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, instrument, warn};

/// How long teardown waits for queued lines to reach a slow client.
const DELIVERY_GRACE: Duration = Duration::from_secs(5);

/// A client connection handler.
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    hub: Arc<Hub>,
}

impl Connection {
    pub fn new(stream: TcpStream, addr: SocketAddr, hub: Arc<Hub>) -> Self {
        Self { stream, addr, hub }
    }

    /// Run the connection until the session ends.
    #[instrument(skip(self), fields(addr = %self.addr), name = "connection")]
    pub async fn run(self) {
        metrics::inc_connections();
        if let Err(e) = self.stream.set_nodelay(true) {
            debug!(error = %e, "Failed to set TCP_NODELAY");
        }
        let (session, outbox) = Session::new(self.addr);
        let (reader, writer) = self.stream.into_split();
        let exit = serve(&self.hub, &session, outbox, reader, writer).await;
        info!(?exit, "Connection closed");
    }
}

/// Drive a session over an arbitrary byte stream pair.
async fn serve<R, W>(
    hub: &Arc<Hub>,
    session: &Arc<Session>,
    outbox: Outbox,
    reader: R,
    writer: W,
) -> Exit
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let activity = Activity::new();
    let mut reader = FramedRead::new(
        ActivityReader::new(reader, activity.clone()),
        LineCodec::with_max_len(hub.server_info.max_line_len),
    );
    let mut delivery = tokio::spawn(run_delivery(writer, outbox));
    let mut watchdog = Watchdog::new(hub.server_info.idle_timeout, activity);

    hub.online(session);

    let ctx = Context::new(hub, session);
    let exit = event_loop(&ctx, &mut reader, &mut watchdog, &mut delivery).await;

    if let Some(reply) = exit.farewell() {
        if matches!(exit, Exit::Evicted) {
            metrics::inc_evictions();
            info!(idle = ?watchdog.idle(), "Evicting idle session");
        }
        session.send(reply);
    }
    session.close();
    hub.offline(session);

    if !matches!(exit, Exit::DeliveryEnded) {
        finish_delivery(delivery).await;
    }
    drop(reader);
    exit
}

/// Wait for the delivery task to flush and close the write side.
async fn finish_delivery(mut delivery: JoinHandle<DeliveryResult>) {
    match tokio::time::timeout(DELIVERY_GRACE, &mut delivery).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => debug!(error = %e, "Write failed during teardown"),
        Ok(Err(e)) => warn!(error = %e, "Delivery task aborted"),
        Err(_) => {
            warn!("Delivery did not drain in time");
            delivery.abort();
        }
    }
}
