//! Idle-eviction watchdog.
//!
//! Every read that yields bytes is a pulse, whether or not it completes a
//! line. [`ActivityReader`] records pulses as the codec pulls from the
//! socket; the [`Watchdog`] fires once `idle` has passed since the last one.

use parking_lot::Mutex;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, ReadBuf};
use tokio::time::{Instant, Sleep, sleep};

/// Time of the last inbound bytes, shared by the reader and the watchdog.
#[derive(Debug, Clone)]
pub struct Activity(Arc<Mutex<Instant>>);

impl Activity {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Instant::now())))
    }

    pub fn pulse(&self) {
        *self.0.lock() = Instant::now();
    }

    fn last(&self) -> Instant {
        *self.0.lock()
    }
}

/// Read half wrapper that pulses [`Activity`] on every non-empty read.
#[derive(Debug)]
pub struct ActivityReader<R> {
    inner: R,
    activity: Activity,
}

impl<R> ActivityReader<R> {
    pub fn new(inner: R, activity: Activity) -> Self {
        Self { inner, activity }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for ActivityReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = poll {
            if buf.filled().len() > before {
                self.activity.pulse();
            }
        }
        poll
    }
}

/// Idle timer for one connection.
#[derive(Debug)]
pub struct Watchdog {
    idle: Duration,
    activity: Activity,
    deadline: Pin<Box<Sleep>>,
}

impl Watchdog {
    /// Arm a watchdog that fires after `idle` without a pulse on `activity`.
    pub fn new(idle: Duration, activity: Activity) -> Self {
        let deadline = Box::pin(sleep(idle));
        Self {
            idle,
            activity,
            deadline,
        }
    }

    /// Resolve once the connection has been idle for the full threshold.
    ///
    /// Pulses never end the wait: when the deadline passes the watchdog
    /// re-arms it from the last pulse and keeps waiting. Cancel safe.
    pub async fn expired(&mut self) {
        loop {
            self.deadline.as_mut().await;
            let due = self.activity.last() + self.idle;
            if Instant::now() >= due {
                return;
            }
            self.deadline.as_mut().reset(due);
        }
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_idle_threshold() {
        let mut watchdog = Watchdog::new(Duration::from_secs(300), Activity::new());
        let start = Instant::now();
        watchdog.expired().await;
        assert_eq!(start.elapsed(), Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pulse_pushes_deadline_back() {
        let activity = Activity::new();
        let mut watchdog = Watchdog::new(Duration::from_secs(10), activity.clone());

        advance(Duration::from_secs(8)).await;
        activity.pulse();
        advance(Duration::from_secs(8)).await;

        // 16s since start but only 8s since the pulse.
        assert!(timeout(Duration::from_secs(1), watchdog.expired()).await.is_err());

        let start = Instant::now();
        watchdog.expired().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reader_pulses_on_bytes_not_on_eof() {
        let (mut client, server) = tokio::io::duplex(64);
        let activity = Activity::new();
        let mut reader = ActivityReader::new(server, activity.clone());
        let start = activity.last();

        advance(Duration::from_secs(5)).await;
        client.write_all(b"a").await.unwrap();
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte).await.unwrap();
        assert_eq!(activity.last() - start, Duration::from_secs(5));

        drop(client);
        advance(Duration::from_secs(5)).await;
        assert_eq!(reader.read(&mut byte).await.unwrap(), 0);
        assert_eq!(activity.last() - start, Duration::from_secs(5));
    }
}
