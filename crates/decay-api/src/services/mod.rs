//! Request orchestration
//!
//! Services are synchronous and CPU bound. Each call owns its own render
//! context, so a service can be shared across requests behind an `Arc`.

pub mod decay_chain;
pub mod evolution;

pub use decay_chain::DecayChainService;
pub use evolution::{EvolutionDefaults, EvolutionService};

use config::RenderConfig;
use render::FigureSize;

/// Resolution and figure sizes for every render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub dpi: u32,
    pub chain_figure: FigureSize,
    pub evolution_figure: FigureSize,
}

impl From<&RenderConfig> for RenderSettings {
    fn from(config: &RenderConfig) -> Self {
        let figure = |f: config::FigureConfig| FigureSize::new(f.width_in, f.height_in);
        Self {
            dpi: config.dpi,
            chain_figure: figure(config.chain_figure),
            evolution_figure: figure(config.evolution_figure),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}
