//! State management module.
//!
//! Contains the Hub (shared relay state), the session registry, sessions and
//! the broadcast dispatcher.

mod dispatcher;
mod hub;
mod registry;
mod session;

#[cfg(test)]
pub use dispatcher::fan_out;
pub use dispatcher::run_dispatcher;
pub use hub::{BroadcastQueue, Hub, ServerInfo};
pub use registry::{Registry, is_reserved};
pub use session::{Outbox, Session};
