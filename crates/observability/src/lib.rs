//! Observability for DecayViz
//!
//! - Structured logging via tracing
//! - Prometheus request metrics, one label set per endpoint
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("decayviz", LogFormat::Pretty)?;
//!
//! // Optional
//! observability::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, EndpointMetrics, RequestMetricsGuard};
