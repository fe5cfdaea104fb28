//! HTTP API for DecayViz
//!
//! Two rendering endpoints sit on top of the `decay` and `render` crates:
//!
//! - `POST {prefix}/decay-chain` - diagram of a nuclide's decay chain
//! - `POST {prefix}/evolution` - activity, mass, amount or fraction over time
//! - `GET {prefix}/units` - accepted time and y-axis units
//! - `GET {prefix}/health` - liveness
//!
//! Services do the work synchronously; handlers move it onto the blocking
//! pool so rendering never stalls the runtime.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use api::{create_router, DecayApiState};
pub use error::ApiError;
pub use services::{DecayChainService, EvolutionDefaults, EvolutionService, RenderSettings};
