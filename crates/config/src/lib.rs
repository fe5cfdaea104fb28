//! DecayViz configuration
//!
//! A single YAML document with one section per concern. Every section and
//! every field is optional; missing values fall back to [`defaults`] and are
//! listed in the [`ValidationReport`] produced by [`validate_config`].

use common::{TimeUnit, YUnit};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecayVizConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution: Option<EvolutionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsConfig>,
}

impl DecayVizConfig {
    pub fn service(&self) -> ServiceConfig {
        self.service.clone().unwrap_or_default()
    }

    pub fn api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }

    pub fn render(&self) -> RenderConfig {
        self.render.clone().unwrap_or_default()
    }

    pub fn evolution(&self) -> EvolutionConfig {
        self.evolution.clone().unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    pub fn metrics(&self) -> MetricsConfig {
        self.metrics.clone().unwrap_or_default()
    }
}

/// Where the HTTP server listens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Requests still running after this many seconds get a 408
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Get the full HTTP address (host:port)
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Path every endpoint is mounted under; empty mounts at the root
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Figure dimensions in inches
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Base size of a decay-chain diagram; grows with the chain
    #[serde(default = "default_chain_figure")]
    pub chain_figure: FigureConfig,
    #[serde(default = "default_evolution_figure")]
    pub evolution_figure: FigureConfig,
    /// TrueType candidates tried in order for chart text
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            chain_figure: default_chain_figure(),
            evolution_figure: default_evolution_figure(),
            font_paths: default_font_paths(),
        }
    }
}

/// Defaults for evolution requests that omit fields
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvolutionConfig {
    #[serde(default = "default_time_period")]
    pub default_time_period: f64,
    #[serde(default = "default_time_unit")]
    pub default_time_unit: TimeUnit,
    #[serde(default = "default_y_unit")]
    pub default_y_unit: YUnit,
    /// Number of log-spaced sample times per evolution
    #[serde(default = "default_samples")]
    pub samples: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            default_time_period: default_time_period(),
            default_time_unit: default_time_unit(),
            default_y_unit: default_y_unit(),
            samples: default_samples(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `pretty`, `json` or `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}
