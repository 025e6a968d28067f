//! Main read loop for an online session.
//!
//! Races three things: the next inbound line, the idle watchdog and the
//! delivery task. Whichever finishes first decides how the session ends.

use super::delivery::DeliveryResult;
use super::error_handling::{ReadErrorAction, classify_read_error};
use super::liveness::{ActivityReader, Watchdog};
use crate::handlers::{self, Context};
use futures_util::StreamExt;
use relay_proto::{LineCodec, ProtocolError, Reply};
use tokio::io::AsyncRead;
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tracing::{debug, warn};

/// Why the read loop stopped.
#[derive(Debug)]
pub(super) enum Exit {
    /// Clean end of stream from the client.
    PeerClosed,
    /// The watchdog fired.
    Evicted,
    /// Framing violation; the reply explains it to the client.
    Rejected(Reply),
    /// The socket failed under the reader.
    ReadFailed(ProtocolError),
    /// The delivery task ended on its own, so the write side is gone.
    DeliveryEnded,
}

impl Exit {
    /// Notice owed to the client before the connection goes away.
    pub(super) fn farewell(&self) -> Option<Reply> {
        match self {
            Self::Evicted => Some(Reply::Kicked),
            Self::Rejected(reply) => Some(reply.clone()),
            _ => None,
        }
    }
}

pub(super) async fn event_loop<R>(
    ctx: &Context<'_>,
    reader: &mut FramedRead<ActivityReader<R>, LineCodec>,
    watchdog: &mut Watchdog,
    delivery: &mut JoinHandle<DeliveryResult>,
) -> Exit
where
    R: AsyncRead + Unpin,
{
    loop {
        tokio::select! {
            frame = reader.next() => match frame {
                None => return Exit::PeerClosed,
                Some(Ok(line)) => {
                    // Empty lines only count as activity.
                    if line.is_empty() {
                        continue;
                    }
                    debug!(raw = %line, "Received line");
                    if let Err(e) = handlers::dispatch(ctx, &line) {
                        debug!(error = %e, "Handler error");
                        if let Some(reply) = e.to_reply() {
                            let _ = ctx.reply(reply);
                        }
                    }
                }
                Some(Err(e)) => {
                    return match classify_read_error(&e) {
                        ReadErrorAction::FatalProtocolError { reply } => {
                            warn!(error = %e, "Protocol error");
                            Exit::Rejected(reply)
                        }
                        ReadErrorAction::IoError => Exit::ReadFailed(e),
                    };
                }
            },
            () = watchdog.expired() => return Exit::Evicted,
            result = &mut *delivery => {
                match result {
                    Ok(Ok(())) => debug!("Delivery task finished"),
                    Ok(Err(e)) => debug!(error = %e, "Write failed"),
                    Err(e) => warn!(error = %e, "Delivery task aborted"),
                }
                return Exit::DeliveryEnded;
            }
        }
    }
}
