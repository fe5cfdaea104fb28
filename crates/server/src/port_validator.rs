//! Port checks before binding
//!
//! A successful check does not reserve the port: another process can take it
//! before the server binds. The bind in [`crate::HttpServer`] stays the source
//! of truth; these checks only give an early, readable error at startup.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Check that the configured port can be bound right now
pub async fn validate_port_available(config: &ServerConfig) -> Result<()> {
    validate_port_range(config.port)?;

    let addr = config.addr()?;
    debug!(%addr, "Checking HTTP port");

    match TcpListener::bind(addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.to_string(), e))?;
            drop(listener);

            info!("HTTP port {} is available ({})", config.port, local_addr);
            Ok(())
        }
        Err(e) => {
            error!("HTTP port {} is NOT available: {}", config.port, e);
            Err(ServerError::port_in_use(config.port, e.to_string()))
        }
    }
}

/// Returns `true` if the port appears to be in use
pub async fn is_port_in_use(host: &str, port: u16) -> bool {
    let addr = format!("{}:{}", host, port);
    TcpListener::bind(&addr).await.is_err()
}

/// Reject port 0 and warn on privileged ports
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        return Err(ServerError::ConfigError(
            "Port cannot be 0 (ephemeral port assignment not supported for explicit binding)"
                .to_string(),
        ));
    }
    if port < 1024 {
        warn!(
            "Port {} is a privileged port (requires root/admin privileges)",
            port
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_port_range() {
        assert!(validate_port_range(0).is_err());
        assert!(validate_port_range(80).is_ok());
        assert!(validate_port_range(8000).is_ok());
        assert!(validate_port_range(65535).is_ok());
    }

    #[tokio::test]
    async fn test_port_in_use_detection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(is_port_in_use("127.0.0.1", port).await);
        let err = validate_port_available(&ServerConfig::new("127.0.0.1", port))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::PortInUse { port: p, .. } if p == port));

        drop(listener);
        assert!(!is_port_in_use("127.0.0.1", port).await);
    }

    #[tokio::test]
    async fn test_ephemeral_port_is_rejected() {
        let err = validate_port_available(&ServerConfig::ephemeral())
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::ConfigError(_)));
    }
}
