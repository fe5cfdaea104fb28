//! HTTP layer for the DecayViz API

pub mod handlers;
pub mod routes;

pub use handlers::{ApiMetrics, DecayApiState};
pub use routes::create_router;
