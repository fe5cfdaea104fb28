//! HTTP server lifecycle for DecayViz
//!
//! The API router is built elsewhere and handed to an [`HttpServer`], which
//! binds, serves and shuts down gracefully through the [`Server`] trait.
//! Shutdown is coordinated with `CancellationToken` from `tokio_util`.
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! let server = HttpServer::new(ServerConfig::new("0.0.0.0", 8000), router);
//! server.run_with_ctrl_c().await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Bind address
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`health`] - Liveness handler
//! - [`port_validator`] - Early port availability checks
//! - [`shutdown`] - Graceful shutdown utilities

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{ServerConfig, DEFAULT_HTTP_PORT};
pub use error::{Result, ServerError};
pub use health::{health_handler, HealthStatus};
pub use http::HttpServer;
pub use port_validator::{validate_port_available, validate_port_range};
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
