//! HTTP server implementation using Axum
//!
//! Wraps a fully built [`Router`] and runs it until the shutdown token is
//! cancelled, draining in-flight requests before returning.

use async_trait::async_trait;
use axum::{routing::get, Router};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::traits::Server;

/// HTTP server implementation using Axum
///
/// ```ignore
/// use server::{HttpServer, ServerConfig, ServerExt};
///
/// let server = HttpServer::new(ServerConfig::new("127.0.0.1", 8000), router);
/// server.run_with_ctrl_c().await?;
/// ```
#[derive(Clone)]
pub struct HttpServer {
    name: String,
    config: ServerConfig,
    router: Router,
    running: Arc<AtomicBool>,
    bound_addr: Arc<RwLock<Option<SocketAddr>>>,
}

impl HttpServer {
    /// Create a new HTTP server with a custom router
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            name: "http".to_string(),
            config,
            router,
            running: Arc::new(AtomicBool::new(false)),
            bound_addr: Arc::new(RwLock::new(None)),
        }
    }

    /// Server answering only `GET /health`
    pub fn simple(config: ServerConfig) -> Self {
        let router = Router::new().route("/health", get(crate::health::health_handler));
        Self::new(config, router)
    }

    /// Name used in logs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Answer 408 for requests that take longer than `timeout`
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.router = self.router.layer(TimeoutLayer::new(timeout));
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[async_trait]
impl Server for HttpServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Option<SocketAddr> {
        *self.bound_addr.read()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run(&self, shutdown_token: CancellationToken) -> Result<()> {
        let addr = self.config.addr()?;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::bind(addr.to_string(), e))?;
        let local_addr = listener.local_addr()?;

        *self.bound_addr.write() = Some(local_addr);
        self.running.store(true, Ordering::SeqCst);
        info!(server = %self.name, %local_addr, "HTTP server listening");

        let name = self.name.clone();
        let result = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
                info!(server = %name, "HTTP server received shutdown signal");
            })
            .await;

        self.running.store(false, Ordering::SeqCst);
        *self.bound_addr.write() = None;

        match result {
            Ok(()) => {
                info!(server = %self.name, "HTTP server shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!(server = %self.name, %e, "HTTP server error");
                Err(ServerError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ServerExt;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn wait_for_address(server: &HttpServer) -> SocketAddr {
        for _ in 0..100 {
            if let Some(addr) = server.address() {
                return addr;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("server did not bind");
    }

    #[tokio::test]
    async fn test_serves_health_and_shuts_down() {
        let server = HttpServer::simple(ServerConfig::ephemeral()).with_name("decayviz-test");
        let token = CancellationToken::new();
        let handle = tokio::spawn({
            let server = server.clone();
            let token = token.clone();
            async move { server.run(token).await }
        });

        let addr = wait_for_address(&server).await;
        assert!(server.is_running());

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with(r#"{"status":"ok"}"#));

        token.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(result.is_ok(), "Server should shutdown within timeout");
        assert!(!server.is_running());
        assert!(server.address().is_none());
    }

    #[tokio::test]
    async fn test_bind_conflict() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let server = HttpServer::simple(ServerConfig::new("127.0.0.1", port));
        let err = server.run(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ServerError::BindError { .. }));
    }

    #[test]
    fn test_http_server_name() {
        let server = HttpServer::simple(ServerConfig::default());
        assert_eq!(server.name(), "http");
        assert_eq!(server.with_name("decayviz").name(), "decayviz");
    }
}
