//! Prometheus metrics collection for relayd.
//!
//! Metrics are registered by [`init`] at startup. Until then every recording
//! helper is a no-op, which keeps unit tests free of global registration.
//!
//! - `relay_online_sessions` - Sessions currently in the registry
//! - `relay_connections_total` - Connections accepted
//! - `relay_broadcasts_total` - Lines fanned out by the dispatcher
//! - `relay_broadcast_fanout` - Recipients per broadcast line (histogram)
//! - `relay_private_messages_total` - Point-to-point deliveries
//! - `relay_lines_sent_total` - Lines written to sockets
//! - `relay_evictions_total` - Sessions kicked for inactivity
//! - `relay_command_total{command}` - Commands processed by type
//! - `relay_command_errors_total{command,error}` - Rejected commands

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

pub static CONNECTIONS: OnceLock<IntCounter> = OnceLock::new();

pub static BROADCASTS: OnceLock<IntCounter> = OnceLock::new();

pub static PRIVATE_MESSAGES: OnceLock<IntCounter> = OnceLock::new();

/// Total lines successfully written to clients.
pub static LINES_SENT: OnceLock<IntCounter> = OnceLock::new();

pub static EVICTIONS: OnceLock<IntCounter> = OnceLock::new();

pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Gauges and histograms
// ========================================================================

pub static ONLINE_SESSIONS: OnceLock<IntGauge> = OnceLock::new();

pub static BROADCAST_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(CONNECTIONS, IntCounter::new("relay_connections_total", "Connections accepted"));
    register!(BROADCASTS, IntCounter::new("relay_broadcasts_total", "Lines fanned out by the dispatcher"));
    register!(PRIVATE_MESSAGES, IntCounter::new("relay_private_messages_total", "Point-to-point deliveries"));
    register!(LINES_SENT, IntCounter::new("relay_lines_sent_total", "Lines written to clients"));
    register!(EVICTIONS, IntCounter::new("relay_evictions_total", "Sessions evicted for inactivity"));
    register!(ONLINE_SESSIONS, IntGauge::new("relay_online_sessions", "Sessions currently online"));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("relay_command_total", "Commands processed by type"), &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("relay_command_errors_total", "Rejected commands by type and error"), &["command", "error"]));
    register!(BROADCAST_FANOUT, Histogram::with_opts(
        HistogramOpts::new("relay_broadcast_fanout", "Recipients per broadcast line")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

#[inline]
pub fn inc_connections() {
    if let Some(c) = CONNECTIONS.get() {
        c.inc();
    }
}

#[inline]
pub fn inc_private_messages() {
    if let Some(c) = PRIVATE_MESSAGES.get() {
        c.inc();
    }
}

#[inline]
pub fn inc_lines_sent() {
    if let Some(c) = LINES_SENT.get() {
        c.inc();
    }
}

#[inline]
pub fn inc_evictions() {
    if let Some(c) = EVICTIONS.get() {
        c.inc();
    }
}

#[inline]
pub fn set_online_sessions(count: usize) {
    if let Some(g) = ONLINE_SESSIONS.get() {
        g.set(count as i64);
    }
}

/// Record one dispatched broadcast and how many sessions it reached.
#[inline]
pub fn record_broadcast(recipients: usize) {
    if let Some(c) = BROADCASTS.get() {
        c.inc();
    }
    if let Some(h) = BROADCAST_FANOUT.get() {
        h.observe(recipients as f64);
    }
}

#[inline]
pub fn record_command(command: &str) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
}

#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}
