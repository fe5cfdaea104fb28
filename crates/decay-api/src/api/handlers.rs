//! HTTP request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use common::{units_catalog, UnitsCatalog};
use config::DecayVizConfig;
use decay::Dataset;
use observability::{EndpointMetrics, RequestMetricsGuard};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{DecayChainRequest, DecayChainResponse, EvolutionRequest, EvolutionResponse};
use crate::services::{DecayChainService, EvolutionDefaults, EvolutionService, RenderSettings};

/// Per-endpoint request metrics
pub struct ApiMetrics {
    pub decay_chain: EndpointMetrics,
    pub evolution: EndpointMetrics,
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self {
            decay_chain: EndpointMetrics::new("decay_chain"),
            evolution: EndpointMetrics::new("evolution"),
        }
    }
}

/// Shared state for API handlers.
pub struct DecayApiState {
    pub decay_chain: DecayChainService,
    pub evolution: EvolutionService,
    pub metrics: ApiMetrics,
}

impl DecayApiState {
    pub fn new(dataset: &'static Dataset, render: RenderSettings, defaults: EvolutionDefaults) -> Self {
        Self {
            decay_chain: DecayChainService::new(dataset, render),
            evolution: EvolutionService::new(dataset, render, defaults),
            metrics: ApiMetrics::default(),
        }
    }

    /// State for the embedded dataset with `render` and `evolution` taken from config
    pub fn from_config(config: &DecayVizConfig) -> Self {
        Self::new(
            Dataset::embedded(),
            RenderSettings::from(&config.render()),
            EvolutionDefaults::from(&config.evolution()),
        )
    }
}

fn status_of<T>(result: &Result<T, ApiError>) -> u16 {
    match result {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    }
}

/// POST {prefix}/decay-chain
pub async fn decay_chain(
    State(state): State<Arc<DecayApiState>>,
    payload: Result<Json<DecayChainRequest>, JsonRejection>,
) -> Result<Json<DecayChainResponse>, ApiError> {
    let mut guard = RequestMetricsGuard::new(&state.metrics.decay_chain);

    let result: Result<Json<DecayChainResponse>, ApiError> = async {
        let Json(request) = payload?;
        let isotope = request.isotope.trim().to_string();
        if isotope.is_empty() {
            return Err(ApiError::validation("isotope must not be empty"));
        }
        debug!(%isotope, "Decay chain requested");

        let worker = Arc::clone(&state);
        let response =
            tokio::task::spawn_blocking(move || worker.decay_chain.generate(&isotope)).await??;
        Ok(Json(response))
    }
    .await;

    guard.set_status(status_of(&result));
    result
}

/// POST {prefix}/evolution
pub async fn evolution(
    State(state): State<Arc<DecayApiState>>,
    payload: Result<Json<EvolutionRequest>, JsonRejection>,
) -> Result<Json<EvolutionResponse>, ApiError> {
    let mut guard = RequestMetricsGuard::new(&state.metrics.evolution);

    let result: Result<Json<EvolutionResponse>, ApiError> = async {
        let Json(request) = payload?;
        debug!(entries = request.nuclides.len(), "Evolution requested");

        let worker = Arc::clone(&state);
        let response =
            tokio::task::spawn_blocking(move || worker.evolution.generate(&request)).await??;
        Ok(Json(response))
    }
    .await;

    guard.set_status(status_of(&result));
    result
}

/// GET {prefix}/units
pub async fn units() -> Json<UnitsCatalog> {
    Json(units_catalog())
}
