use std::path::PathBuf;

use common::{QuantityUnit, TimeUnit, YUnit};

use super::FigureConfig;

pub fn default_service_name() -> String {
    "decayviz".to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_request_timeout_secs() -> u64 {
    60
}

pub fn default_prefix() -> String {
    "/api".to_string()
}

pub fn default_dpi() -> u32 {
    100
}

pub fn default_chain_figure() -> FigureConfig {
    FigureConfig {
        width_in: 12.0,
        height_in: 8.0,
    }
}

pub fn default_evolution_figure() -> FigureConfig {
    FigureConfig {
        width_in: 12.0,
        height_in: 6.0,
    }
}

pub fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

pub fn default_time_period() -> f64 {
    365.0
}

pub fn default_time_unit() -> TimeUnit {
    TimeUnit::Days
}

pub fn default_y_unit() -> YUnit {
    YUnit::Quantity(QuantityUnit::Bq)
}

pub fn default_samples() -> usize {
    500
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}
