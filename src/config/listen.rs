//! Network listener configuration.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port used when neither the config file nor the command line names one.
pub const DEFAULT_PORT: u16 = 8888;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:8888").
    #[serde(default = "default_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

impl ListenConfig {
    /// Replace the IP and/or port given on the command line.
    pub fn override_with(&mut self, ip: Option<IpAddr>, port: Option<u16>) {
        if let Some(ip) = ip {
            self.address.set_ip(ip);
        }
        if let Some(port) = port {
            self.address.set_port(port);
        }
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
}
