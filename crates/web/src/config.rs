use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use utility::env::{self, ConfigError};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Serve from an in-process store instead of MongoDB.
    pub in_memory: bool,
}

impl WebConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::parsed_or("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: env::parsed_or("PORT", DEFAULT_PORT)?,
            in_memory: env::flag("LOKASI_IN_MEMORY"),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            in_memory: false,
        }
    }
}
