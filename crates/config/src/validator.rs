use crate::*;
use thiserror::Error;

/// Accepted chart resolutions
const DPI_RANGE: std::ops::RangeInclusive<u32> = 50..=600;

/// Accepted sample counts per evolution
const SAMPLES_RANGE: std::ops::RangeInclusive<usize> = 10..=10_000;

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Service host is required")]
    MissingHost,

    #[error("{field} must be a non-zero port number")]
    InvalidPort { field: String },

    #[error("service.request_timeout_secs must be a positive integer")]
    InvalidRequestTimeout,

    #[error("Metrics port {port} conflicts with the service port")]
    PortConflict { port: u16 },

    #[error("Invalid API prefix '{0}'. Must be empty or start with '/' and not end with '/'")]
    InvalidPrefix(String),

    #[error("render.dpi must be between 50 and 600, got: {0}")]
    InvalidDpi(u32),

    #[error("{field} must be a positive number of inches")]
    InvalidFigure { field: String },

    #[error("{field} must be a positive float")]
    InvalidPositiveFloat { field: String },

    #[error("evolution.samples must be between 10 and 10000, got: {0}")]
    InvalidSamples(usize),

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Environment variable placeholder in '{field}' was not resolved: {value}")]
    InvalidEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &DecayVizConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    record_defaults(config, &mut report);

    let service = config.service();
    validate_service(&service, &mut report);
    validate_api(&config.api(), &mut report);
    validate_render(&config.render(), &mut report);
    validate_evolution(&config.evolution(), &mut report);
    validate_logging(&config.logging(), &mut report);
    validate_metrics(&config.metrics(), &service, &mut report);

    report
}

fn record_defaults(config: &DecayVizConfig, report: &mut ValidationReport) {
    if config.service.is_none() {
        let service = ServiceConfig::default();
        report.add_default("service.name", &service.name);
        report.add_default("service.host", &service.host);
        report.add_default("service.port", &service.port.to_string());
        report.add_default(
            "service.request_timeout_secs",
            &service.request_timeout_secs.to_string(),
        );
    }
    if config.api.is_none() {
        report.add_default("api.prefix", &default_prefix());
    }
    if config.render.is_none() {
        let render = RenderConfig::default();
        let figure = |f: FigureConfig| format!("{}x{} in", f.width_in, f.height_in);
        report.add_default("render.dpi", &render.dpi.to_string());
        report.add_default("render.chain_figure", &figure(render.chain_figure));
        report.add_default("render.evolution_figure", &figure(render.evolution_figure));
        report.add_default(
            "render.font_paths",
            &format!("{} system candidates", render.font_paths.len()),
        );
    }
    if config.evolution.is_none() {
        let evolution = EvolutionConfig::default();
        report.add_default(
            "evolution.default_time_period",
            &evolution.default_time_period.to_string(),
        );
        report.add_default("evolution.default_time_unit", evolution.default_time_unit.code());
        report.add_default("evolution.default_y_unit", evolution.default_y_unit.code());
        report.add_default("evolution.samples", &evolution.samples.to_string());
    }
    if config.logging.is_none() {
        report.add_default("logging.format", &default_log_format());
    }
    if config.metrics.is_none() {
        report.add_default("metrics.enabled", "false");
    }
}

fn validate_service(service: &ServiceConfig, report: &mut ValidationReport) {
    if service.host.trim().is_empty() {
        report.add_error(ValidationError::MissingHost);
    } else if has_unresolved_env_vars(&service.host) {
        report.add_error(ValidationError::InvalidEnvVar {
            field: "service.host".to_string(),
            value: service.host.clone(),
        });
    }

    if service.port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "service.port".to_string(),
        });
    } else if service.port < 1024 {
        report.add_warning(
            "service.port",
            "Ports below 1024 usually require elevated privileges",
        );
    }

    if service.request_timeout_secs == 0 {
        report.add_error(ValidationError::InvalidRequestTimeout);
    }
}

fn validate_api(api: &ApiConfig, report: &mut ValidationReport) {
    let prefix = api.prefix.as_str();
    if has_unresolved_env_vars(prefix) {
        report.add_error(ValidationError::InvalidEnvVar {
            field: "api.prefix".to_string(),
            value: prefix.to_string(),
        });
        return;
    }
    if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        report.add_error(ValidationError::InvalidPrefix(prefix.to_string()));
    }
}

fn validate_render(render: &RenderConfig, report: &mut ValidationReport) {
    if !DPI_RANGE.contains(&render.dpi) {
        report.add_error(ValidationError::InvalidDpi(render.dpi));
    }

    for (field, figure) in [
        ("render.chain_figure", render.chain_figure),
        ("render.evolution_figure", render.evolution_figure),
    ] {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(figure.width_in) || !positive(figure.height_in) {
            report.add_error(ValidationError::InvalidFigure {
                field: field.to_string(),
            });
        }
    }

    if !render.font_paths.iter().any(|path| path.is_file()) {
        report.add_warning(
            "render.font_paths",
            "No font file found; chart text will use the built-in bitmap font",
        );
    }
}

fn validate_evolution(evolution: &EvolutionConfig, report: &mut ValidationReport) {
    let period = evolution.default_time_period;
    if !period.is_finite() || period <= 0.0 {
        report.add_error(ValidationError::InvalidPositiveFloat {
            field: "evolution.default_time_period".to_string(),
        });
    }

    if !SAMPLES_RANGE.contains(&evolution.samples) {
        report.add_error(ValidationError::InvalidSamples(evolution.samples));
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    let format = logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}

fn validate_metrics(metrics: &MetricsConfig, service: &ServiceConfig, report: &mut ValidationReport) {
    if !metrics.enabled {
        return;
    }
    if metrics.port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "metrics.port".to_string(),
        });
    } else if metrics.port == service.port {
        report.add_error(ValidationError::PortConflict { port: metrics.port });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> DecayVizConfig {
        parse_config(yaml).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let report = validate_config(&generate_default_config());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.defaults_applied.is_empty());
    }

    #[test]
    fn test_missing_sections_are_reported_as_defaults() {
        let report = validate_config(&config("api:\n  prefix: /api\n"));
        assert!(report.is_valid());
        let fields: Vec<&str> = report
            .defaults_applied
            .iter()
            .map(|d| d.field.as_str())
            .collect();
        assert!(fields.contains(&"service.port"));
        assert!(fields.contains(&"evolution.default_y_unit"));
        assert!(!fields.contains(&"api.prefix"));
    }

    #[test]
    fn test_prefix_rules() {
        for ok in ["", "/api", "/v1/decay"] {
            let yaml = format!("api:\n  prefix: \"{}\"\n", ok);
            assert!(validate_config(&config(&yaml)).is_valid(), "{}", ok);
        }
        for bad in ["api", "/api/"] {
            let yaml = format!("api:\n  prefix: \"{}\"\n", bad);
            let report = validate_config(&config(&yaml));
            assert_eq!(report.errors, vec![ValidationError::InvalidPrefix(bad.to_string())]);
        }
    }

    #[test]
    fn test_render_and_evolution_ranges() {
        let report = validate_config(&config(
            r#"
render:
  dpi: 20
  chain_figure: { width_in: 0, height_in: 8 }
evolution:
  default_time_period: -1
  samples: 5
"#,
        ));
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors.contains(&ValidationError::InvalidDpi(20)));
        assert!(report.errors.contains(&ValidationError::InvalidFigure {
            field: "render.chain_figure".to_string()
        }));
        assert!(report.errors.contains(&ValidationError::InvalidSamples(5)));
    }

    #[test]
    fn test_ports_and_logging() {
        let report = validate_config(&config(
            r#"
service: { port: 0 }
logging: { format: xml }
metrics: { enabled: true, port: 0 }
"#,
        ));
        assert_eq!(report.errors.len(), 3);

        let report = validate_config(&config(
            "service: { port: 9090 }\nmetrics: { enabled: true, port: 9090 }\n",
        ));
        assert_eq!(report.errors, vec![ValidationError::PortConflict { port: 9090 }]);
    }

    #[test]
    fn test_warnings() {
        let report = validate_config(&config(
            "service: { port: 80 }\nrender: { font_paths: [/nonexistent/font.ttf] }\n",
        ));
        assert!(report.is_valid());
        let fields: Vec<&str> = report.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["service.port", "render.font_paths"]);
    }

    #[test]
    fn test_unresolved_placeholder() {
        std::env::remove_var("DECAYVIZ_VALIDATOR_UNSET");
        let report = validate_config(&config("service:\n  host: ${DECAYVIZ_VALIDATOR_UNSET}\n"));
        assert!(matches!(
            report.errors.as_slice(),
            [ValidationError::InvalidEnvVar { .. }]
        ));
    }
}
