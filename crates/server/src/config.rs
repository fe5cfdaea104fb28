//! Server bind configuration

use crate::error::{Result, ServerError};
use std::net::SocketAddr;

/// Port the HTTP API listens on unless configured otherwise
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Where the HTTP server binds
///
/// ```
/// use server::config::ServerConfig;
///
/// let config = ServerConfig::new("127.0.0.1", 8000);
/// assert_eq!(config.addr().unwrap().port(), 8000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port 0 asks the OS for an ephemeral port
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Loopback with an ephemeral port, for tests
    pub fn ephemeral() -> Self {
        Self::new("127.0.0.1", 0)
    }

    /// Parse the socket address from host and port
    pub fn addr(&self) -> Result<SocketAddr> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ServerError::InvalidAddress(address))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_HTTP_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig::new("not a host", 8000);
        assert!(matches!(config.addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[test]
    fn test_ephemeral() {
        assert_eq!(ServerConfig::ephemeral().addr().unwrap().port(), 0);
    }
}
