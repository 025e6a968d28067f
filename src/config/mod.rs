//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, IdleTimeoutsConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Inbound line limits (LimitsConfig)
//! - [`validation`]: Startup checks over a loaded config

mod limits;
mod listen;
mod types;
pub mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, IdleTimeoutsConfig, ServerConfig};
